use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A point of the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// The abscissa.
    pub x: f64,
    /// The ordinate.
    pub y: f64,
}

impl Position {
    /// Builds a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance between two positions.
    pub fn distance_to(&self, other: &Position) -> f64 {
        f64::hypot(self.x - other.x, self.y - other.y)
    }
}

/// Where passengers are dropped off.
///
/// When a destination is given, the distance from a passenger to its destination is added to the cost of serving it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DestinationPolicy {
    /// Only the pickup distance counts.
    #[default]
    None,
    /// All passengers go to the same place.
    Common(Position),
    /// Each passenger has its own destination, indexed by passenger identifier.
    PerPassenger(BTreeMap<String, Position>),
}

impl DestinationPolicy {
    /// Returns the destination of a passenger, if the policy defines one.
    ///
    /// For [`DestinationPolicy::PerPassenger`], `None` is returned for unknown passengers.
    pub fn destination_of(&self, passenger_id: &str) -> Option<&Position> {
        match self {
            DestinationPolicy::None => None,
            DestinationPolicy::Common(p) => Some(p),
            DestinationPolicy::PerPassenger(m) => m.get(passenger_id),
        }
    }

    /// Returns the name of this policy, as used in the instance documents.
    pub fn mode_name(&self) -> &'static str {
        match self {
            DestinationPolicy::None => "none",
            DestinationPolicy::Common(_) => "common",
            DestinationPolicy::PerPassenger(_) => "per_passenger",
        }
    }
}
