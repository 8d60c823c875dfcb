//! Reconciliation of computed shares against the bill total.
//!
//! The shares do not always add up to the bill: weights that do not sum to one
//! allocate more or less than the amount, and the area cost of a room without
//! occupants is charged to nobody. This module reports the gap; it never
//! corrects it.

use rentsplit_types::{Bill, CalculationWeights, ShareResult};
use serde::{Deserialize, Serialize};

/// Largest absolute difference still displayed as "balanced".
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Total the shares should add up to when every room has occupants:
/// `amount * (area + person_days)`.
pub fn expected_total(bill: &Bill, weights: &CalculationWeights) -> f64 {
    bill.amount * weights.total()
}

/// Comparison of the shares' sum with the bill amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub calculated_total: f64,
    pub bill_total: f64,
    /// `bill_total - calculated_total`
    pub difference: f64,
}

impl Reconciliation {
    pub fn new(results: &[ShareResult], bill_total: f64) -> Self {
        let calculated_total: f64 = results.iter().map(|r| r.share).sum();
        Self { calculated_total, bill_total, difference: bill_total - calculated_total }
    }

    pub fn is_balanced(&self) -> bool {
        self.difference.abs() <= BALANCE_TOLERANCE
    }
}
