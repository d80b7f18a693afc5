//! Month-over-month patient registration stats.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStats {
    pub total: usize,
    pub this_month: usize,
    /// Whole-percent growth vs. the previous calendar month; 0 when the
    /// previous month had no registrations.
    pub growth_pct: i32,
}

/// Compute registration stats from patient creation timestamps.
///
/// `now` is passed in rather than read from the clock so the computation
/// stays pure and testable across month boundaries.
pub fn patient_stats(registered: &[DateTime<Utc>], now: DateTime<Utc>) -> PatientStats {
    let this = (now.year(), now.month());
    let last = previous_month(this);

    let this_month = registered
        .iter()
        .filter(|d| (d.year(), d.month()) == this)
        .count();
    let last_month = registered
        .iter()
        .filter(|d| (d.year(), d.month()) == last)
        .count();

    let growth_pct = if last_month > 0 {
        let delta = this_month as f64 - last_month as f64;
        (delta / last_month as f64 * 100.0).round() as i32
    } else {
        0
    };

    PatientStats {
        total: registered.len(),
        this_month,
        growth_pct,
    }
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
