//! Snapshot-in / snapshot-out ledger operations.
//!
//! Every call takes the current item snapshot and returns a new snapshot plus
//! the emitted event; the input is never touched. This keeps the ledger safe
//! to reason about independent of execution model — serializing concurrent
//! writers per item remains the job of the authoritative store.

use crate::item::{InventoryCommand, InventoryEvent, InventoryItem, Restock, UseStock};
use medistock_core::{Aggregate, LedgerResult};

/// Result of a committed ledger operation: the updated item and the single
/// event to append to the history log. Both come from one decision, so they
/// are consistent with each other by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub item: InventoryItem,
    pub event: InventoryEvent,
}

/// Validate a usage request against the item snapshot and compute the
/// resulting state.
///
/// Fails closed: on error the snapshot is unchanged and no event exists.
pub fn apply_usage(item: &InventoryItem, request: UseStock) -> LedgerResult<LedgerOutcome> {
    run(item, InventoryCommand::UseStock(request))
}

/// Validate a restock request against the item snapshot and compute the
/// resulting state (stock increased, unit cost replaced).
pub fn apply_restock(item: &InventoryItem, request: Restock) -> LedgerResult<LedgerOutcome> {
    run(item, InventoryCommand::Restock(request))
}

fn run(item: &InventoryItem, command: InventoryCommand) -> LedgerResult<LedgerOutcome> {
    let mut events = item.handle(&command)?;
    // Inventory commands emit exactly one event.
    debug_assert_eq!(events.len(), 1);
    let event = events.remove(0);

    let mut next = item.clone();
    next.apply(&event);

    Ok(LedgerOutcome { item: next, event })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CreateItem, InventoryItemId};
    use chrono::{DateTime, Utc};
    use medistock_core::{AggregateId, DoctorId, LedgerError, Money, PatientId};

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn item_with_stock(stock: i64, unit_cost: Money) -> InventoryItem {
        let item_id = InventoryItemId::new(AggregateId::new());
        let mut item = InventoryItem::empty(item_id);

        let create = CreateItem {
            item_id,
            name: "Gauze Roll".to_string(),
            category: "Supplies".to_string(),
            unit_cost,
            low_stock_threshold: 2,
            expiry_date: None,
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::CreateItem(create)).unwrap();
        item.apply(&events[0]);

        if stock > 0 {
            let outcome = apply_restock(
                &item,
                Restock {
                    item_id,
                    quantity_added: stock,
                    unit_cost,
                    occurred_at: test_time(),
                },
            )
            .unwrap();
            item = outcome.item;
        }
        item
    }

    fn usage(item: &InventoryItem, quantity: i64) -> UseStock {
        UseStock {
            item_id: item.id_typed(),
            doctor_id: Some(DoctorId::new()),
            patient_id: Some(PatientId::new()),
            quantity_used: quantity,
            occurred_at: test_time(),
        }
    }

    #[test]
    fn restock_example_from_the_ledger_rules() {
        // Item at stock 3, unit cost 4.00; restock 10 @ 5.00.
        let item = item_with_stock(3, Money::from_decimal(4.00));

        let outcome = apply_restock(
            &item,
            Restock {
                item_id: item.id_typed(),
                quantity_added: 10,
                unit_cost: Money::from_decimal(5.00),
                occurred_at: test_time(),
            },
        )
        .unwrap();

        assert_eq!(outcome.item.total_stock(), 13);
        assert_eq!(outcome.item.unit_cost(), Money::from_cents(500));
        match outcome.event {
            InventoryEvent::Restocked(e) => {
                assert_eq!(e.total_cost, Money::from_cents(5_000));
                assert_eq!(e.old_unit_cost, Money::from_cents(400));
            }
            other => panic!("Expected Restocked event, got {other:?}"),
        }

        // Input snapshot untouched.
        assert_eq!(item.total_stock(), 3);
        assert_eq!(item.unit_cost(), Money::from_cents(400));
    }

    #[test]
    fn usage_example_from_the_ledger_rules() {
        // Item at stock 13, unit cost 5.00; use 2.
        let item = item_with_stock(13, Money::from_decimal(5.00));

        let outcome = apply_usage(&item, usage(&item, 2)).unwrap();

        assert_eq!(outcome.item.total_stock(), 11);
        match outcome.event {
            InventoryEvent::StockUsed(e) => {
                assert_eq!(e.total_cost, Money::from_cents(1_000));
            }
            other => panic!("Expected StockUsed event, got {other:?}"),
        }
    }

    #[test]
    fn rejected_usage_returns_no_outcome_and_changes_nothing() {
        let item = item_with_stock(11, Money::from_cents(500));
        let before = item.clone();

        let err = apply_usage(&item, usage(&item, 100)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock {
                requested: 100,
                available: 11
            }
        );
        assert_eq!(item, before);

        let err = apply_usage(&item, usage(&item, 0)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn usage_and_restock_advance_the_version_by_one() {
        let item = item_with_stock(4, Money::from_cents(250));
        let version = medistock_core::AggregateRoot::version(&item);

        let outcome = apply_usage(&item, usage(&item, 1)).unwrap();
        assert_eq!(
            medistock_core::AggregateRoot::version(&outcome.item),
            version + 1
        );
    }
}
