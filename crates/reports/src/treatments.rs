//! Treatment catalog grouping.

use serde::{Deserialize, Serialize};

use medistock_core::{AggregateId, Money};

/// A bookable treatment as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: AggregateId,
    pub name: String,
    pub category: String,
    pub price: Money,
}

/// Group treatments by category, preserving the order in which categories
/// first appear in the input (the catalog's display order).
pub fn group_by_category(treatments: &[Treatment]) -> Vec<(String, Vec<&Treatment>)> {
    let mut groups: Vec<(String, Vec<&Treatment>)> = Vec::new();

    for treatment in treatments {
        match groups.iter_mut().find(|(cat, _)| cat == &treatment.category) {
            Some((_, members)) => members.push(treatment),
            None => groups.push((treatment.category.clone(), vec![treatment])),
        }
    }

    groups
}
