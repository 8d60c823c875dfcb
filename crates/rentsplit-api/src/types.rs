//! Request and response payloads of the HTTP API.
//!
//! Requests reuse [`rentsplit_types::BillScenario`] directly, so the JSON a form
//! holds can be posted as-is.

use rentsplit_calculator::{Allocation, Reconciliation};
use rentsplit_types::{Currency, ShareResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplitQuery {
    /// Include the per-room breakdown
    #[serde(default)]
    pub detailed: bool,
}

/// Reconciliation numbers as shown under the results table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub calculated_total: f64,
    pub bill_total: f64,
    /// `amount * (area + personDays)`
    pub expected_total: f64,
    /// `billTotal - calculatedTotal`
    pub difference: f64,
    pub balanced: bool,
}

impl ReconciliationSummary {
    pub fn new(reconciliation: Reconciliation, expected_total: f64) -> Self {
        Self {
            calculated_total: reconciliation.calculated_total,
            bill_total: reconciliation.bill_total,
            expected_total,
            difference: reconciliation.difference,
            balanced: reconciliation.is_balanced(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SplitResponse {
    /// One row per occupant, room order then occupant order. Empty when there is
    /// nothing to split yet.
    pub results: Vec<ShareResult>,
    pub reconciliation: ReconciliationSummary,
    /// `false` when the weights do not add up to one
    pub weights_normalized: bool,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Allocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
}
