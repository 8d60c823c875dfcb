//! Rentsplit Types
//!
//! This crate defines the data model shared by the rentsplit ecosystem
//! (currently `rentsplit-calculator` and `rentsplit-api`): rooms and their
//! occupants, the bill being split, the weighting between floor area and
//! presence, and the per-occupant result rows.
//!
//! The JSON shape (camelCase field names) is the one produced by the form layer,
//! so a scenario can travel from a client to the calculator without a mapping
//! step in between.

#![deny(missing_docs)]

pub mod period;
mod types;

pub use types::{BillScenario, Bill, CalculationWeights, Currency, Occupant, Room, ShareResult};
