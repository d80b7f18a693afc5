//! Inventory valuation and history cost totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medistock_core::Money;
use medistock_inventory::{InventoryItem, Restocked, StockUsed};

/// Summary of the inventory as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub total_quantity: i64,
    pub total_value: Money,
}

/// Total inventory value: Σ(total_stock × unit_cost) over all items.
pub fn total_inventory_value(items: &[InventoryItem]) -> Money {
    items
        .iter()
        .map(|item| item.unit_cost().times(item.total_stock()))
        .sum()
}

pub fn inventory_summary(items: &[InventoryItem]) -> InventorySummary {
    InventorySummary {
        total_items: items.len(),
        low_stock_items: items.iter().filter(|item| item.is_low_stock()).count(),
        total_quantity: items.iter().map(InventoryItem::total_stock).sum(),
        total_value: total_inventory_value(items),
    }
}

/// Half-open `[from, to)` window over business time. `None` bounds are open.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl HistoryWindow {
    /// Unbounded window (the whole history).
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(from) = self.from {
            if at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if at >= to {
                return false;
            }
        }
        true
    }
}

/// Total usage cost over the window: Σ(event.total_cost).
pub fn usage_cost_total(events: &[StockUsed], window: HistoryWindow) -> Money {
    events
        .iter()
        .filter(|e| window.contains(e.occurred_at))
        .map(|e| e.total_cost)
        .sum()
}

/// Total restock cost over the window: Σ(event.total_cost).
pub fn restock_cost_total(events: &[Restocked], window: HistoryWindow) -> Money {
    events
        .iter()
        .filter(|e| window.contains(e.occurred_at))
        .map(|e| e.total_cost)
        .sum()
}
