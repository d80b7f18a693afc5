//! `medistock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{LedgerError, LedgerResult};
pub use id::{AggregateId, DoctorId, PatientId};
pub use money::Money;
pub use value_object::ValueObject;
