//! Glue between the boundary and the allocation engine, shared by the HTTP
//! handlers and the `split` CLI command.

use anyhow::{Context, Result};
use rentsplit_calculator::{Reconciliation, expected_total, split_bill_detailed};
use rentsplit_types::{BillScenario, period};
use std::path::Path;
use tracing::{debug, info};

use crate::config::LimitsConfig;
use crate::error::ApiError;
use crate::types::{ReconciliationSummary, SplitResponse};
use crate::validation::validate_scenario;

/// Runs the engine on an already validated scenario.
pub fn compute_split(scenario: &BillScenario, detailed: bool) -> SplitResponse {
    let allocation = split_bill_detailed(&scenario.rooms, &scenario.bill, &scenario.weights);
    let results = allocation.as_ref().map(|a| a.results()).unwrap_or_default();

    let reconciliation = Reconciliation::new(&results, scenario.bill.amount);
    let expected = expected_total(&scenario.bill, &scenario.weights);

    debug!(
        rooms = scenario.rooms.len(),
        occupants = scenario.occupant_count(),
        rows = results.len(),
        difference = reconciliation.difference,
        "Computed split"
    );

    SplitResponse {
        results,
        reconciliation: ReconciliationSummary::new(reconciliation, expected),
        weights_normalized: scenario.weights.is_normalized(),
        currency: scenario.bill.currency,
        breakdown: if detailed { allocation } else { None },
    }
}

/// Resolves date ranges, validates `scenario` against `limits`, then computes
/// the split.
pub fn validate_and_split(
    mut scenario: BillScenario,
    limits: &LimitsConfig,
    detailed: bool,
) -> Result<SplitResponse, ApiError> {
    resolve_periods(&mut scenario)?;
    validate_scenario(&scenario, limits)?;
    Ok(compute_split(&scenario, detailed))
}

/// Replaces the day counts of the bill and of every occupant that carry a
/// date range with the inclusive length of that range.
pub fn resolve_periods(scenario: &mut BillScenario) -> Result<(), ApiError> {
    let bill = &mut scenario.bill;
    let range = (bill.period_start.as_deref(), bill.period_end.as_deref());
    if let Some(days) = range_days(range, "bill", ("periodStart", "periodEnd"))? {
        debug!(days, "Resolved billing period");
        bill.days_in_period = days;
    }

    for (room_index, room) in scenario.rooms.iter_mut().enumerate() {
        for (index, occupant) in room.occupants.iter_mut().enumerate() {
            let range = (occupant.present_from.as_deref(), occupant.present_to.as_deref());
            let prefix = format!("rooms[{room_index}].occupants[{index}]");
            if let Some(days) = range_days(range, &prefix, ("presentFrom", "presentTo"))? {
                occupant.days_present = days;
            }
        }
    }
    Ok(())
}

fn range_days(
    range: (Option<&str>, Option<&str>),
    prefix: &str,
    (start_key, end_key): (&str, &str),
) -> Result<Option<u32>, ApiError> {
    match range {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => period::days_between(start, end).map(Some).map_err(|err| {
            ApiError::validation(format!("{err:#}"), format!("{prefix}.{start_key}"))
        }),
        (Some(_), None) => {
            Err(ApiError::validation("Date range has no end", format!("{prefix}.{end_key}")))
        }
        (None, Some(_)) => {
            Err(ApiError::validation("Date range has no start", format!("{prefix}.{start_key}")))
        }
    }
}

/// Scenario file formats understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    /// `.toml` files are TOML, anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn parse_scenario(contents: &str, format: ScenarioFormat) -> Result<BillScenario> {
    match format {
        ScenarioFormat::Json => serde_json::from_str(contents).context("Invalid JSON scenario"),
        ScenarioFormat::Toml => toml::from_str(contents).context("Invalid TOML scenario"),
    }
}

pub fn read_scenario_file(path: &Path) -> Result<BillScenario> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file '{}'", path.display()))?;
    let scenario = parse_scenario(&contents, ScenarioFormat::from_path(path))
        .with_context(|| format!("Failed to parse scenario file '{}'", path.display()))?;
    info!(
        path = %path.display(),
        rooms = scenario.rooms.len(),
        occupants = scenario.occupant_count(),
        "Loaded scenario"
    );
    Ok(scenario)
}
