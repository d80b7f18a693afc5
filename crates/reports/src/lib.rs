//! Derived read models and dashboard aggregates.
//!
//! Everything here is recomputed on demand from item snapshots and event
//! logs; nothing is stored, so recomputation is idempotent by construction.

pub mod patients;
pub mod projection;
pub mod treatments;
pub mod valuation;

pub use patients::{patient_stats, PatientStats};
pub use projection::{ProjectionError, StockLedgerProjection, StockReadModel};
pub use treatments::{group_by_category, Treatment};
pub use valuation::{
    inventory_summary, restock_cost_total, total_inventory_value, usage_cost_total,
    HistoryWindow, InventorySummary,
};
