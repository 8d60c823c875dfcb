//! The allocation engine of the rentsplit calculator.
//!
//! A bill is split in two stages. The amount is first cut into an area pool and
//! a person-days pool according to [`CalculationWeights`]; each room takes its
//! proportional part of both pools. Each room's cost is then shared among its
//! occupants by days present, or equally when every occupant of the room
//! recorded zero days.
//!
//! The engine is a pure function: no state, no I/O, no errors. Degenerate input
//! (non-positive amount, zero total area, zero total person-days) yields an
//! empty result, which is the normal state of a form that is still being
//! filled in.
//!
//! ```
//! use rentsplit_calculator::split_bill;
//! use rentsplit_types::{Bill, CalculationWeights, Occupant, Room};
//!
//! let rooms = vec![Room::new("Only room", 2.0).with_occupant(Occupant::new("Ann", 30))];
//! let bill = Bill { amount: 1000.0, ..Bill::default() };
//! let results = split_bill(&rooms, &bill, &CalculationWeights::new(0.4, 0.6));
//!
//! assert_eq!(results.len(), 1);
//! assert!((results[0].share - 1000.0).abs() < 1e-9);
//! ```

pub mod allocation;
pub mod built_in;
pub mod memo;
pub mod reconciliation;

pub use allocation::{Allocation, RoomAllocation, SplitMode, split_bill, split_bill_detailed};
pub use memo::MemoizedSplitter;
pub use reconciliation::{BALANCE_TOLERANCE, Reconciliation, expected_total};

// Re-export the data model so callers only need one import path
pub use rentsplit_types::{
    Bill, BillScenario, CalculationWeights, Currency, Occupant, Room, ShareResult,
};
