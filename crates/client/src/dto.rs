//! Wire DTOs for the remote clinic API.
//!
//! Field names are camelCase on the wire; monetary values are decimals with
//! 2 fraction digits and are rounded into [`Money`] on conversion (the
//! write-time rounding site); dates are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medistock_core::{AggregateId, DoctorId, Money, PatientId};
use medistock_inventory::{InventoryItem, InventoryItemId, Restocked, StockUsed};

/// Response envelope every endpoint uses: `{success, message?, data?}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit_cost: f64,
    pub total_stock: i64,
    #[serde(default)]
    pub low_stock_threshold: i64,
    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl InventoryItemDto {
    /// Convert into a domain snapshot.
    ///
    /// The remote service does not expose a stream revision, so the snapshot
    /// version starts at 0; optimistic concurrency is the server's job.
    pub fn into_domain(self) -> InventoryItem {
        InventoryItem::snapshot(
            InventoryItemId::new(AggregateId::from_uuid(self.id)),
            self.name,
            self.category.unwrap_or_default(),
            Money::from_decimal(self.unit_cost),
            self.total_stock,
            self.low_stock_threshold,
            self.entry_date,
            self.expiry_date,
            0,
        )
    }
}

/// One row of the usage history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecordDto {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub quantity_used: i64,
    pub total_cost: f64,
    pub used_date: DateTime<Utc>,
}

impl UsageRecordDto {
    /// Convert into the domain event for report aggregation.
    ///
    /// The record stores the line total; the unit cost at time of use is
    /// recovered from it (exact, since the total was computed in cents).
    pub fn into_event(self) -> StockUsed {
        let total_cost = Money::from_decimal(self.total_cost);
        let unit_cost = if self.quantity_used > 0 {
            Money::from_cents(total_cost.cents() / self.quantity_used)
        } else {
            Money::ZERO
        };
        StockUsed {
            item_id: InventoryItemId::new(AggregateId::from_uuid(self.inventory_item_id)),
            doctor_id: DoctorId::from_uuid(self.doctor_id),
            patient_id: PatientId::from_uuid(self.patient_id),
            quantity_used: self.quantity_used,
            unit_cost,
            total_cost,
            occurred_at: self.used_date,
        }
    }
}

/// One row of the restock history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockRecordDto {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub quantity_added: i64,
    pub old_unit_cost: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub restock_date: DateTime<Utc>,
}

impl RestockRecordDto {
    pub fn into_event(self) -> Restocked {
        Restocked {
            item_id: InventoryItemId::new(AggregateId::from_uuid(self.inventory_item_id)),
            quantity_added: self.quantity_added,
            old_unit_cost: Money::from_decimal(self.old_unit_cost),
            unit_cost: Money::from_decimal(self.unit_cost),
            total_cost: Money::from_decimal(self.total_cost),
            occurred_at: self.restock_date,
        }
    }
}

/// `POST /inventory/use` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUsageRequest {
    pub inventory_item_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub quantity_used: i64,
}

impl SubmitUsageRequest {
    pub fn new(
        item_id: InventoryItemId,
        doctor_id: DoctorId,
        patient_id: PatientId,
        quantity_used: i64,
    ) -> Self {
        Self {
            inventory_item_id: *item_id.0.as_uuid(),
            doctor_id: *doctor_id.as_uuid(),
            patient_id: *patient_id.as_uuid(),
            quantity_used,
        }
    }
}

/// `POST /inventory/restock` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRestockRequest {
    pub inventory_item_id: Uuid,
    pub quantity_added: i64,
    pub unit_cost: f64,
}

impl SubmitRestockRequest {
    pub fn new(item_id: InventoryItemId, quantity_added: i64, unit_cost: Money) -> Self {
        Self {
            inventory_item_id: *item_id.0.as_uuid(),
            quantity_added,
            unit_cost: unit_cost.to_decimal(),
        }
    }
}
