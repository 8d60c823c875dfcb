//! Two-stage weighted allocation of a bill between rooms and occupants.
//!
//! Stage one prices each room:
//!
//! ```text
//! area_cost        = area_pool        * (room.area        / total_area)
//! person_day_cost  = person_days_pool * (room.person_days / total_person_days)
//! room_cost        = area_cost + person_day_cost
//! ```
//!
//! Stage two shares `room_cost` among the room's occupants by days present.
//! A room whose occupants all recorded zero days splits its cost equally, so the
//! area part of an occupied room is never dropped. A room without occupants
//! still counts towards `total_area` but produces no rows.

use rentsplit_types::{Bill, CalculationWeights, Room, ShareResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::built_in::proportional::{equal_share, proportional_share};

/// How a room's cost was shared among its occupants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Proportionally to each occupant's days present
    ByPresence,
    /// Equally, because every occupant recorded zero days
    Equal,
    /// Not at all, because the room has no occupants
    Unassigned,
}

/// Intermediate numbers for one room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomAllocation {
    pub room_id: String,
    pub room_name: String,
    /// Part of the area pool charged to this room
    pub area_cost: f64,
    /// Part of the person-days pool charged to this room
    pub person_day_cost: f64,
    /// `area_cost + person_day_cost`
    pub total_cost: f64,
    pub person_days: f64,
    pub split: SplitMode,
    /// One row per occupant, in occupant order
    pub shares: Vec<ShareResult>,
}

/// Full breakdown of a computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub area_pool: f64,
    pub person_days_pool: f64,
    pub total_area: f64,
    pub total_person_days: f64,
    /// One entry per input room, in room order
    pub rooms: Vec<RoomAllocation>,
}

impl Allocation {
    /// Result rows flattened in room order, then occupant order.
    pub fn results(&self) -> Vec<ShareResult> {
        self.rooms.iter().flat_map(|room| room.shares.iter().cloned()).collect()
    }

    /// Consuming variant of [`Allocation::results`].
    pub fn into_results(self) -> Vec<ShareResult> {
        self.rooms.into_iter().flat_map(|room| room.shares).collect()
    }

    /// Sum of every room cost, including rooms nobody pays for.
    pub fn total_room_cost(&self) -> f64 {
        self.rooms.iter().map(|room| room.total_cost).sum()
    }
}

/// Splits `bill` among the occupants of `rooms`.
///
/// Returns one row per occupant, in room order then occupant order. Returns an
/// empty vector for degenerate input; never panics.
pub fn split_bill(rooms: &[Room], bill: &Bill, weights: &CalculationWeights) -> Vec<ShareResult> {
    split_bill_detailed(rooms, bill, weights).map(Allocation::into_results).unwrap_or_default()
}

/// Same computation as [`split_bill`], keeping the per-room breakdown.
///
/// Returns `None` when the amount is missing or not positive, when the rooms
/// have no area in total, or when nobody was present at all.
pub fn split_bill_detailed(
    rooms: &[Room],
    bill: &Bill,
    weights: &CalculationWeights,
) -> Option<Allocation> {
    if bill.amount.is_nan() || bill.amount <= 0.0 {
        debug!(amount = bill.amount, "Bill amount is not positive, nothing to split");
        return None;
    }

    let total_area: f64 = rooms.iter().map(|room| room.area).sum();
    let total_person_days: f64 = rooms.iter().map(Room::person_days).sum();

    if total_area == 0.0 || total_person_days == 0.0 {
        debug!(total_area, total_person_days, "Degenerate totals, nothing to split");
        return None;
    }

    let area_pool = bill.amount * weights.area;
    let person_days_pool = bill.amount * weights.person_days;

    let rooms = rooms
        .iter()
        .map(|room| {
            allocate_room(room, area_pool, person_days_pool, total_area, total_person_days)
        })
        .collect();

    Some(Allocation { area_pool, person_days_pool, total_area, total_person_days, rooms })
}

fn allocate_room(
    room: &Room,
    area_pool: f64,
    person_days_pool: f64,
    total_area: f64,
    total_person_days: f64,
) -> RoomAllocation {
    let area_cost = proportional_share(area_pool, room.area, total_area);
    let person_days = room.person_days();
    let person_day_cost = proportional_share(person_days_pool, person_days, total_person_days);
    let total_cost = area_cost + person_day_cost;

    let (split, shares) = if person_days > 0.0 {
        let shares = room
            .occupants
            .iter()
            .map(|occupant| {
                let share =
                    proportional_share(total_cost, f64::from(occupant.days_present), person_days);
                ShareResult::new(occupant.name.clone(), share)
            })
            .collect();
        (SplitMode::ByPresence, shares)
    } else if !room.occupants.is_empty() {
        let share = equal_share(total_cost, room.occupants.len());
        let shares = room
            .occupants
            .iter()
            .map(|occupant| ShareResult::new(occupant.name.clone(), share))
            .collect();
        (SplitMode::Equal, shares)
    } else {
        (SplitMode::Unassigned, Vec::new())
    };

    trace!(
        room_id = %room.id,
        area_cost,
        person_day_cost,
        total_cost,
        person_days,
        split = ?split,
        "Allocated room"
    );

    RoomAllocation {
        room_id: room.id.clone(),
        room_name: room.name.clone(),
        area_cost,
        person_day_cost,
        total_cost,
        person_days,
        split,
        shares,
    }
}
