//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter — only the values matter. To
/// "modify" a value object, create a new one with the new values.
///
/// Example: `Money::from_cents(500)` is a value object; an `InventoryItem`
/// with an id is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
