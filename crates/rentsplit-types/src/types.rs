use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tolerance used when checking whether two weights add up to one.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A person living in a room for part (or all) of the billing period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    /// Opaque identifier, stable across edits of the other fields
    #[serde(default = "new_id")]
    pub id: String,
    /// Display name, may be empty
    #[serde(default)]
    pub name: String,
    /// Number of days the occupant was present during the billing period
    #[serde(default)]
    pub days_present: u32,
    /// First day of presence (`YYYY-MM-DD`). Together with `present_to` it
    /// replaces `days_present` once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_from: Option<String>,
    /// Last day of presence, included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_to: Option<String>,
}

impl Occupant {
    /// Creates an occupant with a freshly generated id.
    pub fn new(name: impl Into<String>, days_present: u32) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            days_present,
            present_from: None,
            present_to: None,
        }
    }

    /// Sets the presence as a date range, both ends included.
    #[must_use]
    pub fn present_between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.present_from = Some(from.into());
        self.present_to = Some(to.into());
        self
    }
}

/// A room with a floor area and the occupants that live in it.
///
/// Occupant order is display order; the allocation keeps it in its output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Opaque identifier
    #[serde(default = "new_id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Floor area, in any unit as long as every room uses the same one
    #[serde(default)]
    pub area: f64,
    /// Occupants, owned exclusively by this room
    #[serde(default)]
    pub occupants: Vec<Occupant>,
}

impl Room {
    /// Creates an empty room with a freshly generated id.
    pub fn new(name: impl Into<String>, area: f64) -> Self {
        Self { id: new_id(), name: name.into(), area, occupants: Vec::new() }
    }

    /// Builder-style helper appending an occupant.
    #[must_use]
    pub fn with_occupant(mut self, occupant: Occupant) -> Self {
        self.occupants.push(occupant);
        self
    }

    /// Appends a new occupant present for the whole billing period of `bill`
    /// and returns it for further editing.
    pub fn add_occupant(&mut self, name: impl Into<String>, bill: &Bill) -> &mut Occupant {
        self.occupants.push(Occupant::new(name, bill.days_in_period));
        let last = self.occupants.len() - 1;
        &mut self.occupants[last]
    }

    /// Sum of `days_present` over the room's occupants.
    pub fn person_days(&self) -> f64 {
        self.occupants.iter().map(|o| f64::from(o.days_present)).sum()
    }

    /// Returns `true` when nobody is assigned to the room.
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

/// Currency tag of a bill. Carried through untouched, never used in arithmetic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    #[default]
    Eur,
    /// US dollar
    Usd,
    /// Iranian toman
    Toman,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
            Self::Toman => write!(f, "TOMAN"),
        }
    }
}

/// The bill being split.
///
/// The default bill is empty: a zero amount over a zero-day period, which the
/// calculator answers with no shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Total amount to split. A missing amount deserializes to zero, which the
    /// calculator treats as "nothing to split yet".
    #[serde(default)]
    pub amount: f64,
    /// Length of the billing period in days. The allocation never reads it;
    /// [`Room::add_occupant`] uses it as the presence of a new occupant.
    #[serde(default)]
    pub days_in_period: u32,
    /// Currency tag
    #[serde(default)]
    pub currency: Currency,
    /// First day of the billing period (`YYYY-MM-DD`). Together with
    /// `period_end` it replaces `days_in_period` once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    /// Last day of the billing period, included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
}

impl Bill {
    /// Creates a bill without a date range.
    pub fn new(amount: f64, days_in_period: u32, currency: Currency) -> Self {
        Self { amount, days_in_period, currency, period_start: None, period_end: None }
    }
}

/// Split of the bill between the floor-area criterion and the presence
/// criterion.
///
/// The two weights are independent multipliers. They are expected to add up to
/// one but nothing normalizes them: weights summing to 0.8 allocate 80% of the
/// bill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationWeights {
    /// Fraction of the bill allocated by floor area
    pub area: f64,
    /// Fraction of the bill allocated by occupant-days
    pub person_days: f64,
}

impl Default for CalculationWeights {
    fn default() -> Self {
        Self { area: 0.4, person_days: 0.6 }
    }
}

impl CalculationWeights {
    /// Creates weights from explicit fractions.
    pub const fn new(area: f64, person_days: f64) -> Self {
        Self { area, person_days }
    }

    /// Builds complementary weights from a single area percentage, the way a
    /// slider going from "all presence" (0) to "all area" (100) does.
    /// Percentages above 100 are treated as 100.
    pub fn from_area_percentage(percentage: u8) -> Self {
        let percentage = percentage.min(100);
        Self {
            area: f64::from(percentage) / 100.0,
            person_days: f64::from(100 - percentage) / 100.0,
        }
    }

    /// Sum of both weights, i.e. the fraction of the bill that gets allocated.
    pub fn total(&self) -> f64 {
        self.area + self.person_days
    }

    /// Returns `true` when the weights add up to one.
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_EPSILON
    }
}

/// Amount owed by one occupant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareResult {
    /// Occupant display name. Two occupants may share a name; they still get
    /// separate rows.
    pub name: String,
    /// Unrounded monetary share
    pub share: f64,
}

impl ShareResult {
    /// Creates a result row.
    pub fn new(name: impl Into<String>, share: f64) -> Self {
        Self { name: name.into(), share }
    }
}

/// Everything the calculator needs for one computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillScenario {
    /// Rooms, in display order
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Bill descriptor
    #[serde(default)]
    pub bill: Bill,
    /// Weights between area and presence
    #[serde(default)]
    pub weights: CalculationWeights,
}

impl BillScenario {
    /// Creates a scenario from its parts.
    pub fn new(rooms: Vec<Room>, bill: Bill, weights: CalculationWeights) -> Self {
        Self { rooms, bill, weights }
    }

    /// Three rooms, four occupants, a 1000 EUR bill over 30 days with a 40/60
    /// area/presence split. Handy for bootstrapping a form or trying the CLI.
    pub fn demo() -> Self {
        let rooms = vec![
            Room::new("Large room 1", 2.0).with_occupant(Occupant::new("First person", 30)),
            Room::new("Large room 2", 2.0)
                .with_occupant(Occupant::new("Second person", 30))
                .with_occupant(Occupant::new("Third person", 15)),
            Room::new("Small room", 1.0).with_occupant(Occupant::new("Fourth person", 20)),
        ];
        let bill = Bill::new(1000.0, 30, Currency::Eur);
        Self { rooms, bill, weights: CalculationWeights::default() }
    }

    /// Total number of occupants across all rooms.
    pub fn occupant_count(&self) -> usize {
        self.rooms.iter().map(|r| r.occupants.len()).sum()
    }
}
