use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medistock_core::{
    Aggregate, AggregateId, AggregateRoot, DoctorId, LedgerError, Money, PatientId,
};
use medistock_events::Event;

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(pub AggregateId);

impl InventoryItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: InventoryItem.
///
/// The item has no status field, only the numeric stock counter, which must
/// never go negative. Stream invariant: `total_stock` equals the
/// sum of all restocked quantities minus the sum of all used quantities since
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: InventoryItemId,
    name: String,
    category: String,
    unit_cost: Money,
    total_stock: i64,
    low_stock_threshold: i64,
    entry_date: DateTime<Utc>,
    expiry_date: Option<DateTime<Utc>>,
    version: u64,
    created: bool,
}

impl InventoryItem {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: InventoryItemId) -> Self {
        Self {
            id,
            name: String::new(),
            category: String::new(),
            unit_cost: Money::ZERO,
            total_stock: 0,
            low_stock_threshold: 0,
            entry_date: DateTime::<Utc>::MIN_UTC,
            expiry_date: None,
            version: 0,
            created: false,
        }
    }

    /// Reconstruct an item from a remote read-model snapshot.
    ///
    /// The authoritative store owns the stream; the snapshot is trusted as-is
    /// and `version` tracks the remote revision for optimistic concurrency.
    #[allow(clippy::too_many_arguments)]
    pub fn snapshot(
        id: InventoryItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_cost: Money,
        total_stock: i64,
        low_stock_threshold: i64,
        entry_date: DateTime<Utc>,
        expiry_date: Option<DateTime<Utc>>,
        version: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            unit_cost,
            total_stock,
            low_stock_threshold,
            entry_date,
            expiry_date,
            version,
            created: true,
        }
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn total_stock(&self) -> i64 {
        self.total_stock
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    pub fn entry_date(&self) -> DateTime<Utc> {
        self.entry_date
    }

    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    /// Reorder flag: stock at or below the externally configured threshold.
    pub fn is_low_stock(&self) -> bool {
        self.total_stock <= self.low_stock_threshold
    }
}

impl AggregateRoot for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateItem.
///
/// Items are created by the external service; this command exists so streams
/// can be rehydrated from their first event. New items start at zero stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub item_id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub unit_cost: Money,
    pub low_stock_threshold: i64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UseStock (consume stock for a doctor/patient encounter).
///
/// Doctor and patient arrive as options so the ledger itself rejects a
/// missing selection instead of relying on the caller's form validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseStock {
    pub item_id: InventoryItemId,
    pub doctor_id: Option<DoctorId>,
    pub patient_id: Option<PatientId>,
    pub quantity_used: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Restock (add stock, possibly at a new unit cost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restock {
    pub item_id: InventoryItemId,
    pub quantity_added: i64,
    pub unit_cost: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    CreateItem(CreateItem),
    UseStock(UseStock),
    Restock(Restock),
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub unit_cost: Money,
    pub low_stock_threshold: i64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockUsed. Immutable once created; append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUsed {
    pub item_id: InventoryItemId,
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub quantity_used: i64,
    /// Unit cost at time of use.
    pub unit_cost: Money,
    /// quantity_used × unit cost at time of use.
    pub total_cost: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Restocked. Immutable once created; append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restocked {
    pub item_id: InventoryItemId,
    pub quantity_added: i64,
    pub old_unit_cost: Money,
    pub unit_cost: Money,
    /// quantity_added × new unit cost.
    pub total_cost: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemCreated(ItemCreated),
    StockUsed(StockUsed),
    Restocked(Restocked),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemCreated(_) => "inventory.item.created",
            InventoryEvent::StockUsed(_) => "inventory.item.stock_used",
            InventoryEvent::Restocked(_) => "inventory.item.restocked",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemCreated(e) => e.occurred_at,
            InventoryEvent::StockUsed(e) => e.occurred_at,
            InventoryEvent::Restocked(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryItem {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = LedgerError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemCreated(e) => {
                self.id = e.item_id;
                self.name = e.name.clone();
                self.category = e.category.clone();
                self.unit_cost = e.unit_cost;
                self.total_stock = 0;
                self.low_stock_threshold = e.low_stock_threshold;
                self.entry_date = e.occurred_at;
                self.expiry_date = e.expiry_date;
                self.created = true;
            }
            InventoryEvent::StockUsed(e) => {
                self.total_stock -= e.quantity_used;
            }
            InventoryEvent::Restocked(e) => {
                self.total_stock += e.quantity_added;
                self.unit_cost = e.unit_cost;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::CreateItem(cmd) => self.handle_create(cmd),
            InventoryCommand::UseStock(cmd) => self.handle_use(cmd),
            InventoryCommand::Restock(cmd) => self.handle_restock(cmd),
        }
    }
}

impl InventoryItem {
    fn ensure_item_id(&self, item_id: InventoryItemId) -> Result<(), LedgerError> {
        if self.id != item_id {
            return Err(LedgerError::invalid_id(format!(
                "command targets item {item_id}, aggregate is {}",
                self.id
            )));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<InventoryEvent>, LedgerError> {
        if self.created {
            return Err(LedgerError::conflict("item already exists"));
        }
        if cmd.unit_cost.is_negative() {
            return Err(LedgerError::invalid_cost("unit cost cannot be negative"));
        }
        if cmd.low_stock_threshold < 0 {
            return Err(LedgerError::invalid_quantity(
                "low stock threshold cannot be negative",
            ));
        }

        Ok(vec![InventoryEvent::ItemCreated(ItemCreated {
            item_id: cmd.item_id,
            name: cmd.name.clone(),
            category: cmd.category.clone(),
            unit_cost: cmd.unit_cost,
            low_stock_threshold: cmd.low_stock_threshold,
            expiry_date: cmd.expiry_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_use(&self, cmd: &UseStock) -> Result<Vec<InventoryEvent>, LedgerError> {
        if !self.created {
            return Err(LedgerError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        let doctor_id = cmd
            .doctor_id
            .ok_or_else(|| LedgerError::missing_selection("doctor"))?;
        let patient_id = cmd
            .patient_id
            .ok_or_else(|| LedgerError::missing_selection("patient"))?;

        if cmd.quantity_used <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "quantity used must be a positive integer, got {}",
                cmd.quantity_used
            )));
        }

        // Invariant: stock never goes negative. Rejected before any mutation.
        if cmd.quantity_used > self.total_stock {
            return Err(LedgerError::insufficient_stock(
                cmd.quantity_used,
                self.total_stock,
            ));
        }

        Ok(vec![InventoryEvent::StockUsed(StockUsed {
            item_id: cmd.item_id,
            doctor_id,
            patient_id,
            quantity_used: cmd.quantity_used,
            unit_cost: self.unit_cost,
            total_cost: self.unit_cost.times(cmd.quantity_used),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_restock(&self, cmd: &Restock) -> Result<Vec<InventoryEvent>, LedgerError> {
        if !self.created {
            return Err(LedgerError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        if cmd.quantity_added <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "quantity added must be a positive integer, got {}",
                cmd.quantity_added
            )));
        }
        if cmd.unit_cost.is_negative() {
            return Err(LedgerError::invalid_cost(format!(
                "unit cost cannot be negative, got {}",
                cmd.unit_cost
            )));
        }

        Ok(vec![InventoryEvent::Restocked(Restocked {
            item_id: cmd.item_id,
            quantity_added: cmd.quantity_added,
            old_unit_cost: self.unit_cost,
            unit_cost: cmd.unit_cost,
            total_cost: cmd.unit_cost.times(cmd.quantity_added),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medistock_core::AggregateId;

    fn test_item_id() -> InventoryItemId {
        InventoryItemId::new(AggregateId::new())
    }

    fn test_doctor_id() -> DoctorId {
        DoctorId::new()
    }

    fn test_patient_id() -> PatientId {
        PatientId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn created_item(item_id: InventoryItemId, unit_cost: Money) -> InventoryItem {
        let mut item = InventoryItem::empty(item_id);
        let cmd = CreateItem {
            item_id,
            name: "Paracetamol 500mg".to_string(),
            category: "Medicine".to_string(),
            unit_cost,
            low_stock_threshold: 5,
            expiry_date: None,
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::CreateItem(cmd)).unwrap();
        item.apply(&events[0]);
        item
    }

    fn restocked_item(item_id: InventoryItemId, quantity: i64, unit_cost: Money) -> InventoryItem {
        let mut item = created_item(item_id, unit_cost);
        let cmd = Restock {
            item_id,
            quantity_added: quantity,
            unit_cost,
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::Restock(cmd)).unwrap();
        item.apply(&events[0]);
        item
    }

    #[test]
    fn create_item_emits_item_created_and_starts_at_zero_stock() {
        let item_id = test_item_id();
        let item = created_item(item_id, Money::from_decimal(4.00));

        assert_eq!(item.total_stock(), 0);
        assert_eq!(item.unit_cost(), Money::from_cents(400));
        assert_eq!(item.version(), 1);
        assert!(item.is_low_stock());
    }

    #[test]
    fn duplicate_creation_is_a_conflict() {
        let item_id = test_item_id();
        let item = created_item(item_id, Money::from_cents(400));

        let cmd = CreateItem {
            item_id,
            name: "Paracetamol 500mg".to_string(),
            category: "Medicine".to_string(),
            unit_cost: Money::from_cents(400),
            low_stock_threshold: 5,
            expiry_date: None,
            occurred_at: test_time(),
        };
        let err = item
            .handle(&InventoryCommand::CreateItem(cmd))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn use_stock_emits_stock_used_with_cost_at_time_of_use() {
        let item_id = test_item_id();
        let item = restocked_item(item_id, 13, Money::from_decimal(5.00));
        let doctor_id = test_doctor_id();
        let patient_id = test_patient_id();

        let cmd = UseStock {
            item_id,
            doctor_id: Some(doctor_id),
            patient_id: Some(patient_id),
            quantity_used: 2,
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::UseStock(cmd)).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            InventoryEvent::StockUsed(e) => {
                assert_eq!(e.doctor_id, doctor_id);
                assert_eq!(e.patient_id, patient_id);
                assert_eq!(e.quantity_used, 2);
                assert_eq!(e.unit_cost, Money::from_cents(500));
                assert_eq!(e.total_cost, Money::from_cents(1_000));
            }
            _ => panic!("Expected StockUsed event"),
        }
    }

    #[test]
    fn use_stock_without_doctor_or_patient_is_rejected() {
        let item_id = test_item_id();
        let item = restocked_item(item_id, 10, Money::from_cents(500));

        let no_doctor = UseStock {
            item_id,
            doctor_id: None,
            patient_id: Some(test_patient_id()),
            quantity_used: 1,
            occurred_at: test_time(),
        };
        assert_eq!(
            item.handle(&InventoryCommand::UseStock(no_doctor))
                .unwrap_err(),
            LedgerError::MissingSelection("doctor")
        );

        let no_patient = UseStock {
            item_id,
            doctor_id: Some(test_doctor_id()),
            patient_id: None,
            quantity_used: 1,
            occurred_at: test_time(),
        };
        assert_eq!(
            item.handle(&InventoryCommand::UseStock(no_patient))
                .unwrap_err(),
            LedgerError::MissingSelection("patient")
        );
    }

    #[test]
    fn overdraught_fails_with_insufficient_stock() {
        let item_id = test_item_id();
        let item = restocked_item(item_id, 5, Money::from_cents(500));

        let cmd = UseStock {
            item_id,
            doctor_id: Some(test_doctor_id()),
            patient_id: Some(test_patient_id()),
            quantity_used: 6,
            occurred_at: test_time(),
        };
        let err = item.handle(&InventoryCommand::UseStock(cmd)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock {
                requested: 6,
                available: 5
            }
        );
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        let item_id = test_item_id();
        let item = restocked_item(item_id, 5, Money::from_cents(500));

        for qty in [0, -3] {
            let use_cmd = UseStock {
                item_id,
                doctor_id: Some(test_doctor_id()),
                patient_id: Some(test_patient_id()),
                quantity_used: qty,
                occurred_at: test_time(),
            };
            assert!(matches!(
                item.handle(&InventoryCommand::UseStock(use_cmd)).unwrap_err(),
                LedgerError::InvalidQuantity(_)
            ));

            let restock_cmd = Restock {
                item_id,
                quantity_added: qty,
                unit_cost: Money::from_cents(500),
                occurred_at: test_time(),
            };
            assert!(matches!(
                item.handle(&InventoryCommand::Restock(restock_cmd))
                    .unwrap_err(),
                LedgerError::InvalidQuantity(_)
            ));
        }
    }

    #[test]
    fn negative_unit_cost_is_rejected() {
        let item_id = test_item_id();
        let item = restocked_item(item_id, 5, Money::from_cents(500));

        let cmd = Restock {
            item_id,
            quantity_added: 1,
            unit_cost: Money::from_decimal(-0.01),
            occurred_at: test_time(),
        };
        assert!(matches!(
            item.handle(&InventoryCommand::Restock(cmd)).unwrap_err(),
            LedgerError::InvalidCost(_)
        ));
    }

    #[test]
    fn restock_replaces_unit_cost_and_records_the_old_one() {
        let item_id = test_item_id();
        let mut item = restocked_item(item_id, 3, Money::from_decimal(4.00));

        let cmd = Restock {
            item_id,
            quantity_added: 10,
            unit_cost: Money::from_decimal(5.00),
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::Restock(cmd)).unwrap();
        match &events[0] {
            InventoryEvent::Restocked(e) => {
                assert_eq!(e.old_unit_cost, Money::from_cents(400));
                assert_eq!(e.unit_cost, Money::from_cents(500));
                assert_eq!(e.total_cost, Money::from_cents(5_000));
            }
            _ => panic!("Expected Restocked event"),
        }

        item.apply(&events[0]);
        assert_eq!(item.total_stock(), 13);
        assert_eq!(item.unit_cost(), Money::from_cents(500));
    }

    #[test]
    fn operations_against_unknown_item_are_not_found() {
        let item = InventoryItem::empty(test_item_id());

        let cmd = Restock {
            item_id: item.id_typed(),
            quantity_added: 1,
            unit_cost: Money::from_cents(100),
            occurred_at: test_time(),
        };
        assert_eq!(
            item.handle(&InventoryCommand::Restock(cmd)).unwrap_err(),
            LedgerError::NotFound
        );
    }

    #[test]
    fn mismatched_item_id_is_rejected() {
        let item = restocked_item(test_item_id(), 5, Money::from_cents(500));

        let cmd = Restock {
            item_id: test_item_id(),
            quantity_added: 1,
            unit_cost: Money::from_cents(100),
            occurred_at: test_time(),
        };
        assert!(matches!(
            item.handle(&InventoryCommand::Restock(cmd)).unwrap_err(),
            LedgerError::InvalidId(_)
        ));
    }

    #[test]
    fn low_stock_flag_tracks_threshold() {
        let item_id = test_item_id();
        let mut item = restocked_item(item_id, 6, Money::from_cents(500));
        assert!(!item.is_low_stock());

        let cmd = UseStock {
            item_id,
            doctor_id: Some(test_doctor_id()),
            patient_id: Some(test_patient_id()),
            quantity_used: 1,
            occurred_at: test_time(),
        };
        let events = item.handle(&InventoryCommand::UseStock(cmd)).unwrap();
        item.apply(&events[0]);

        // threshold is 5; stock == threshold counts as low
        assert_eq!(item.total_stock(), 5);
        assert!(item.is_low_stock());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// A random valid-or-invalid operation against the item.
        #[derive(Debug, Clone)]
        enum Op {
            Use(i64),
            Restock(i64, i64),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (-5i64..50).prop_map(Op::Use),
                ((-5i64..50), (0i64..10_000)).prop_map(|(q, c)| Op::Restock(q, c)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: after any sequence of operations (accepted or
            /// rejected), stock equals restocked minus used quantities, and
            /// never goes negative.
            #[test]
            fn stock_equals_restocks_minus_usages(ops in prop::collection::vec(op_strategy(), 0..40)) {
                let item_id = test_item_id();
                let mut item = created_item(item_id, Money::from_cents(100));

                let mut used: i64 = 0;
                let mut restocked: i64 = 0;

                for op in ops {
                    let cmd = match op {
                        Op::Use(q) => InventoryCommand::UseStock(UseStock {
                            item_id,
                            doctor_id: Some(test_doctor_id()),
                            patient_id: Some(test_patient_id()),
                            quantity_used: q,
                            occurred_at: test_time(),
                        }),
                        Op::Restock(q, cents) => InventoryCommand::Restock(Restock {
                            item_id,
                            quantity_added: q,
                            unit_cost: Money::from_cents(cents),
                            occurred_at: test_time(),
                        }),
                    };

                    let before = item.clone();
                    match item.handle(&cmd) {
                        Ok(events) => {
                            for event in &events {
                                match event {
                                    InventoryEvent::StockUsed(e) => used += e.quantity_used,
                                    InventoryEvent::Restocked(e) => restocked += e.quantity_added,
                                    InventoryEvent::ItemCreated(_) => {}
                                }
                                item.apply(event);
                            }
                        }
                        Err(_) => {
                            // Rejected operations must not have touched state.
                            prop_assert_eq!(&before, &item);
                        }
                    }

                    prop_assert!(item.total_stock() >= 0);
                    prop_assert_eq!(item.total_stock(), restocked - used);
                }
            }

            /// Property: handle is deterministic and never mutates state.
            #[test]
            fn handle_is_pure(quantity in 1i64..20, stock in 0i64..40) {
                let item_id = test_item_id();
                let item = restocked_item(item_id, stock.max(1), Money::from_cents(250));

                let cmd = InventoryCommand::UseStock(UseStock {
                    item_id,
                    doctor_id: Some(test_doctor_id()),
                    patient_id: Some(test_patient_id()),
                    quantity_used: quantity,
                    occurred_at: item.entry_date(),
                });

                let state_before = item.clone();
                let first = item.handle(&cmd);
                let second = item.handle(&cmd);

                prop_assert_eq!(&state_before, &item);
                prop_assert_eq!(first, second);
            }
        }
    }
}
