//! Inventory stock ledger (pure domain logic).
//!
//! Keeps on-hand stock, usage history, and restock history mutually
//! consistent. No IO, no HTTP, no persistence concerns.

pub mod item;
pub mod snapshot;

pub use item::{
    CreateItem, InventoryCommand, InventoryEvent, InventoryItem, InventoryItemId, ItemCreated,
    Restock, Restocked, StockUsed, UseStock,
};
pub use snapshot::{apply_restock, apply_usage, LedgerOutcome};
