//! Stock ledger read-model projection.
//!
//! Rebuildable from the inventory event stream. Idempotent: replaying the
//! same log into a fresh projection yields the same read model.

use std::collections::HashMap;

use thiserror::Error;

use medistock_core::Money;
use medistock_events::EventEnvelope;
use medistock_inventory::{InventoryEvent, InventoryItemId};

/// Read model: current stock and valuation per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReadModel {
    pub item_id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_cost: Money,
    /// quantity × unit_cost, kept in sync on every applied event.
    pub total_value: Money,
}

impl StockReadModel {
    fn recalculate_value(&mut self) {
        self.total_value = self.unit_cost.times(self.quantity.max(0));
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Sequence regressed or repeated within an item stream.
    #[error("non-monotonic sequence number (last={last}, found={found})")]
    NonMonotonicSequence { last: u64, found: u64 },

    /// Usage/restock event for an item the stream never created.
    #[error("event references unknown item {0}")]
    UnknownItem(InventoryItemId),
}

/// In-memory projection over `EventEnvelope<InventoryEvent>` streams.
#[derive(Debug, Default)]
pub struct StockLedgerProjection {
    items: HashMap<InventoryItemId, StockReadModel>,
    cursors: HashMap<InventoryItemId, u64>,
}

impl StockLedgerProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one envelope. Sequence numbers must strictly increase per item;
    /// regressions and duplicates are rejected before any state change.
    pub fn apply(&mut self, envelope: &EventEnvelope<InventoryEvent>) -> Result<(), ProjectionError> {
        let item_id = InventoryItemId::new(envelope.aggregate_id());
        let sequence = envelope.sequence_number();

        if let Some(&last) = self.cursors.get(&item_id) {
            if sequence <= last {
                return Err(ProjectionError::NonMonotonicSequence {
                    last,
                    found: sequence,
                });
            }
        }

        match envelope.payload() {
            InventoryEvent::ItemCreated(e) => {
                self.items.insert(
                    item_id,
                    StockReadModel {
                        item_id,
                        name: e.name.clone(),
                        category: e.category.clone(),
                        quantity: 0,
                        unit_cost: e.unit_cost,
                        total_value: Money::ZERO,
                    },
                );
            }
            InventoryEvent::StockUsed(e) => {
                let model = self
                    .items
                    .get_mut(&item_id)
                    .ok_or(ProjectionError::UnknownItem(item_id))?;
                model.quantity -= e.quantity_used;
                model.recalculate_value();
            }
            InventoryEvent::Restocked(e) => {
                let model = self
                    .items
                    .get_mut(&item_id)
                    .ok_or(ProjectionError::UnknownItem(item_id))?;
                model.quantity += e.quantity_added;
                model.unit_cost = e.unit_cost;
                model.recalculate_value();
            }
        }

        self.cursors.insert(item_id, sequence);
        Ok(())
    }

    /// Drop all state and replay the given log from scratch.
    pub fn rebuild<'a>(
        &mut self,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<InventoryEvent>>,
    ) -> Result<(), ProjectionError> {
        self.items.clear();
        self.cursors.clear();

        let mut applied = 0usize;
        for envelope in envelopes {
            self.apply(envelope)?;
            applied += 1;
        }
        tracing::debug!(applied, "stock ledger projection rebuilt");
        Ok(())
    }

    pub fn get(&self, item_id: &InventoryItemId) -> Option<&StockReadModel> {
        self.items.get(item_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &StockReadModel> {
        self.items.values()
    }

    /// Σ(total_value) across the read model.
    pub fn total_value(&self) -> Money {
        self.items.values().map(|m| m.total_value).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
