//! Monetary amounts in smallest currency unit (cents).
//!
//! All monetary values in the domain are stored as exact cents. Decimal input
//! is rounded **once**, at construction (write time), to 2 fraction places —
//! never again at display time, so computed and displayed totals cannot drift.

use core::iter::Sum;
use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A monetary amount in cents.
///
/// Negative amounts are representable so validation can reject them; items and
/// emitted events only ever carry non-negative amounts.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Construct from a decimal amount (e.g. `4.005`), rounding half away
    /// from zero to 2 fraction places.
    ///
    /// This is the single rounding site in the system.
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Decimal representation (for wire DTOs; lossless for amounts well below
    /// 2^53 cents).
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Line total: unit amount × quantity, in exact cents.
    pub const fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl ValueObject for Money {}
