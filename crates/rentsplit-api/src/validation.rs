//! Input boundary checks.
//!
//! The allocation engine trusts its input. Magnitudes it cannot give a meaning
//! to are rejected here, before the engine runs; nothing is clamped. A zero or
//! negative bill amount is *not* an error: it is the normal state of a form
//! whose amount field is being retyped, and the engine answers it with an empty
//! result.

use rentsplit_types::BillScenario;

use crate::config::LimitsConfig;
use crate::error::ApiError;

pub fn validate_scenario(scenario: &BillScenario, limits: &LimitsConfig) -> Result<(), ApiError> {
    if scenario.rooms.len() > limits.max_rooms {
        return Err(ApiError::limit_exceeded(
            format!(
                "{} rooms submitted, at most {} allowed",
                scenario.rooms.len(),
                limits.max_rooms
            ),
            limits.max_rooms,
        ));
    }

    if !scenario.bill.amount.is_finite() {
        return Err(ApiError::validation("Bill amount must be a finite number", "bill.amount"));
    }

    check_weight(scenario.weights.area, "weights.area")?;
    check_weight(scenario.weights.person_days, "weights.personDays")?;

    for (index, room) in scenario.rooms.iter().enumerate() {
        if !room.area.is_finite() || room.area < 0.0 {
            return Err(ApiError::validation(
                format!("Room area must be a non-negative number, got {}", room.area),
                format!("rooms[{index}].area"),
            ));
        }
        if room.occupants.len() > limits.max_occupants_per_room {
            return Err(ApiError::limit_exceeded(
                format!(
                    "Room '{}' has {} occupants, at most {} allowed",
                    room.name,
                    room.occupants.len(),
                    limits.max_occupants_per_room
                ),
                limits.max_occupants_per_room,
            ));
        }
    }

    Ok(())
}

fn check_weight(value: f64, field: &str) -> Result<(), ApiError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ApiError::validation(
            format!("Weight must be between 0 and 1, got {value}"),
            field,
        ));
    }
    Ok(())
}
