use super::{Cost, DestinationPolicy, EncodingError, Instance, Passenger, Position, Vehicle, Weights};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_INSTANCE_NAME: &str = "ride_sharing";

/// The portable form of an [`Instance`].
///
/// This is the document exchanged between the tools that build instances and the encoders.
/// It holds the costs, so that an instance can be rebuilt from it without running the cost model again.
/// Maps are ordered, so that serializing a document always gives the same text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceDocument {
    /// The name of the instance.
    #[serde(default = "default_name")]
    pub name: String,
    /// The vehicles, in declaration order.
    pub vehicles: Vec<VehicleEntry>,
    /// The passenger identifiers, in declaration order.
    pub passengers: Vec<String>,
    /// The pickup positions, indexed by passenger identifier.
    #[serde(default)]
    pub passenger_positions: BTreeMap<String, Position>,
    /// The costs, indexed by vehicle identifier then passenger identifier.
    #[serde(default)]
    pub costs: BTreeMap<String, BTreeMap<String, Cost>>,
    /// The kind of destination policy.
    #[serde(default)]
    pub destination_mode: DestinationMode,
    /// The common destination, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Position>,
    /// The per-passenger destinations, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<BTreeMap<String, Position>>,
    /// The weight of the pickup distances.
    #[serde(default = "default_weight")]
    pub pickup_weight: f64,
    /// The weight of the drop-off distances.
    #[serde(default = "default_weight")]
    pub dropoff_weight: f64,
}

/// A vehicle, as written in an [`InstanceDocument`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleEntry {
    /// The identifier of the vehicle.
    pub id: String,
    /// The capacity of the vehicle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// The position of the vehicle.
    pub pos: Position,
}

/// The kind of destination policy, as written in an [`InstanceDocument`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationMode {
    /// See [`DestinationPolicy::None`].
    #[default]
    None,
    /// See [`DestinationPolicy::Common`].
    Common,
    /// See [`DestinationPolicy::PerPassenger`].
    PerPassenger,
}

fn default_name() -> String {
    DEFAULT_INSTANCE_NAME.to_string()
}

fn default_weight() -> f64 {
    1.
}

impl From<&Instance> for InstanceDocument {
    fn from(instance: &Instance) -> Self {
        let (destination_mode, destination, destinations) = match instance.destination() {
            DestinationPolicy::None => (DestinationMode::None, None, None),
            DestinationPolicy::Common(p) => (DestinationMode::Common, Some(*p), None),
            DestinationPolicy::PerPassenger(m) => {
                (DestinationMode::PerPassenger, None, Some(m.clone()))
            }
        };
        Self {
            name: instance.name().to_string(),
            vehicles: instance
                .vehicles()
                .iter()
                .map(|v| VehicleEntry {
                    id: v.id().to_string(),
                    capacity: Some(v.capacity()),
                    pos: *v.position(),
                })
                .collect(),
            passengers: instance
                .passengers()
                .iter()
                .map(|p| p.id().to_string())
                .collect(),
            passenger_positions: instance
                .passengers()
                .iter()
                .map(|p| (p.id().to_string(), *p.position()))
                .collect(),
            costs: instance
                .vehicles()
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let row = instance
                        .passengers()
                        .iter()
                        .enumerate()
                        .map(|(j, p)| (p.id().to_string(), instance.cost(i, j)))
                        .collect();
                    (v.id().to_string(), row)
                })
                .collect(),
            destination_mode,
            destination,
            destinations,
            pickup_weight: instance.weights().pickup(),
            dropoff_weight: instance.weights().dropoff(),
        }
    }
}

impl TryFrom<&InstanceDocument> for Instance {
    type Error = EncodingError;

    fn try_from(document: &InstanceDocument) -> Result<Self, Self::Error> {
        let vehicles = document
            .vehicles
            .iter()
            .map(|v| match v.capacity {
                Some(c) => Ok(Vehicle::new(&v.id, c, v.pos)),
                None => Err(EncodingError::MissingCapacity {
                    vehicle: v.id.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let passengers = document
            .passengers
            .iter()
            .map(|id| match document.passenger_positions.get(id) {
                Some(pos) => Ok(Passenger::new(id, *pos)),
                None => Err(EncodingError::MissingPosition {
                    passenger: id.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let destination = match document.destination_mode {
            DestinationMode::None => DestinationPolicy::None,
            DestinationMode::Common => match (document.destination, passengers.first()) {
                (Some(p), _) => DestinationPolicy::Common(p),
                (None, Some(first)) => {
                    return Err(EncodingError::MissingDestination {
                        passenger: first.id().to_string(),
                    })
                }
                (None, None) => DestinationPolicy::None,
            },
            DestinationMode::PerPassenger => {
                DestinationPolicy::PerPassenger(document.destinations.clone().unwrap_or_default())
            }
        };
        let weights = Weights::new(document.pickup_weight, document.dropoff_weight)?;
        Instance::with_costs(
            &document.name,
            vehicles,
            passengers,
            destination,
            weights,
            |v, p| {
                document
                    .costs
                    .get(v.id())
                    .and_then(|row| row.get(p.id()))
                    .copied()
            },
        )
    }
}
