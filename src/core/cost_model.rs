use super::{DestinationPolicy, EncodingError, Passenger, Vehicle};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The cost of a vehicle serving a passenger.
///
/// Costs are either integers (when the cost model rounds them) or reals.
/// Both kinds are kept as is by the encoders.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    /// An integer cost.
    Integer(u64),
    /// A real cost.
    Real(f64),
}

impl Cost {
    /// Returns this cost as a real value.
    pub fn as_f64(&self) -> f64 {
        match self {
            Cost::Integer(n) => *n as f64,
            Cost::Real(r) => *r,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        match self {
            Cost::Integer(_) => true,
            Cost::Real(r) => r.is_finite() && *r >= 0.,
        }
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cost::Integer(n) => write!(f, "{}", n),
            Cost::Real(r) => write!(f, "{}", r),
        }
    }
}

/// Tells whether the cost model rounds its values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CostRounding {
    /// Costs are rounded to the nearest integer; halves are rounded away from zero (thus up, since costs are non-negative).
    #[default]
    NearestInteger,
    /// Costs are kept as reals.
    Keep,
}

impl CostRounding {
    fn apply(&self, value: f64) -> Cost {
        match self {
            CostRounding::NearestInteger => Cost::Integer(value.round() as u64),
            CostRounding::Keep => Cost::Real(value),
        }
    }
}

/// The coefficients applied to the pickup and drop-off distances.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weights {
    pickup: f64,
    dropoff: f64,
}

impl Weights {
    /// Builds new weights.
    ///
    /// Both weights must be finite and non-negative.
    pub fn new(pickup: f64, dropoff: f64) -> Result<Self, EncodingError> {
        if [pickup, dropoff].iter().any(|w| !w.is_finite() || *w < 0.) {
            return Err(EncodingError::InvalidWeight);
        }
        Ok(Self { pickup, dropoff })
    }

    /// Returns the weight of the distance from the vehicle to the passenger.
    pub fn pickup(&self) -> f64 {
        self.pickup
    }

    /// Returns the weight of the distance from the passenger to its destination.
    pub fn dropoff(&self) -> f64 {
        self.dropoff
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            pickup: 1.,
            dropoff: 1.,
        }
    }
}

/// The costs of every (vehicle, passenger) pair of an instance.
///
/// The matrix is complete by construction: a cost is stored for each vehicle index and each passenger index.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    n_vehicles: usize,
    n_passengers: usize,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Builds a cost matrix by calling a function for each pair of vehicle and passenger indices.
    ///
    /// The function is called vehicle by vehicle, passengers in increasing order.
    pub fn try_from_fn<F>(
        n_vehicles: usize,
        n_passengers: usize,
        mut f: F,
    ) -> Result<Self, EncodingError>
    where
        F: FnMut(usize, usize) -> Result<Cost, EncodingError>,
    {
        let mut costs = Vec::with_capacity(n_vehicles * n_passengers);
        for i in 0..n_vehicles {
            for j in 0..n_passengers {
                costs.push(f(i, j)?);
            }
        }
        Ok(Self {
            n_vehicles,
            n_passengers,
            costs,
        })
    }

    /// Returns the number of vehicles (rows) of the matrix.
    pub fn n_vehicles(&self) -> usize {
        self.n_vehicles
    }

    /// Returns the number of passengers (columns) of the matrix.
    pub fn n_passengers(&self) -> usize {
        self.n_passengers
    }

    /// Returns the cost for a vehicle to serve a passenger, given their indices.
    ///
    /// # Panics
    ///
    /// This function panics if an index is out of bounds.
    pub fn get(&self, vehicle_index: usize, passenger_index: usize) -> Cost {
        assert!(vehicle_index < self.n_vehicles && passenger_index < self.n_passengers);
        self.costs[vehicle_index * self.n_passengers + passenger_index]
    }
}

/// Computes the cost of each vehicle serving each passenger.
///
/// The cost is the weighted sum of the distance from the vehicle to the passenger and the distance from the passenger to its destination.
/// If the destination policy is [`DestinationPolicy::None`], the second distance counts for zero.
/// Passengers with no destination under a [`DestinationPolicy::PerPassenger`] policy make this function fail before any computation.
/// A cost that is not a finite number, which happens when a position is not finite, makes this function fail with [`EncodingError::InvalidCost`].
pub fn compute_cost_matrix(
    vehicles: &[Vehicle],
    passengers: &[Passenger],
    destination: &DestinationPolicy,
    weights: &Weights,
    rounding: CostRounding,
) -> Result<CostMatrix, EncodingError> {
    let dropoff_distances = passengers
        .iter()
        .map(|p| match destination {
            DestinationPolicy::None => Ok(0.),
            _ => destination
                .destination_of(p.id())
                .map(|d| p.position().distance_to(d))
                .ok_or_else(|| EncodingError::MissingDestination {
                    passenger: p.id().to_string(),
                }),
        })
        .collect::<Result<Vec<f64>, EncodingError>>()?;
    CostMatrix::try_from_fn(vehicles.len(), passengers.len(), |i, j| {
        let pickup_distance = vehicles[i].position().distance_to(passengers[j].position());
        let value = weights.pickup() * pickup_distance + weights.dropoff() * dropoff_distances[j];
        if !value.is_finite() || value < 0. {
            return Err(EncodingError::InvalidCost {
                vehicle: vehicles[i].id().to_string(),
                passenger: passengers[j].id().to_string(),
            });
        }
        Ok(rounding.apply(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use std::collections::BTreeMap;

    fn scenario() -> (Vec<Vehicle>, Vec<Passenger>) {
        (
            vec![
                Vehicle::new("v1", 1, Position::new(0., 0.)),
                Vehicle::new("v2", 1, Position::new(10., 0.)),
            ],
            vec![
                Passenger::new("p1", Position::new(3., 4.)),
                Passenger::new("p2", Position::new(10., 2.5)),
            ],
        )
    }

    #[test]
    fn test_no_destination() {
        let (vehicles, passengers) = scenario();
        let costs = compute_cost_matrix(
            &vehicles,
            &passengers,
            &DestinationPolicy::None,
            &Weights::default(),
            CostRounding::Keep,
        )
        .unwrap();
        assert_eq!(Cost::Real(5.), costs.get(0, 0));
        assert_eq!(Cost::Real(2.5), costs.get(1, 1));
        assert_eq!(
            Cost::Real(f64::hypot(10., 2.5)),
            costs.get(0, 1)
        );
    }

    #[test]
    fn test_rounding_half_up() {
        let (vehicles, passengers) = scenario();
        let costs = compute_cost_matrix(
            &vehicles,
            &passengers,
            &DestinationPolicy::None,
            &Weights::default(),
            CostRounding::NearestInteger,
        )
        .unwrap();
        assert_eq!(Cost::Integer(5), costs.get(0, 0));
        assert_eq!(Cost::Integer(3), costs.get(1, 1));
    }

    #[test]
    fn test_common_destination_and_weights() {
        let (vehicles, passengers) = scenario();
        let costs = compute_cost_matrix(
            &vehicles,
            &passengers,
            &DestinationPolicy::Common(Position::new(0., 0.)),
            &Weights::new(2., 0.5).unwrap(),
            CostRounding::Keep,
        )
        .unwrap();
        assert_eq!(Cost::Real(2. * 5. + 0.5 * 5.), costs.get(0, 0));
    }

    #[test]
    fn test_per_passenger_destination() {
        let (vehicles, passengers) = scenario();
        let mut destinations = BTreeMap::new();
        destinations.insert("p1".to_string(), Position::new(3., 0.));
        destinations.insert("p2".to_string(), Position::new(10., 0.));
        let costs = compute_cost_matrix(
            &vehicles,
            &passengers,
            &DestinationPolicy::PerPassenger(destinations),
            &Weights::default(),
            CostRounding::Keep,
        )
        .unwrap();
        assert_eq!(Cost::Real(9.), costs.get(0, 0));
        assert_eq!(Cost::Real(5.), costs.get(1, 1));
    }

    #[test]
    fn test_missing_destination() {
        let (vehicles, passengers) = scenario();
        let mut destinations = BTreeMap::new();
        destinations.insert("p1".to_string(), Position::new(3., 0.));
        assert_eq!(
            EncodingError::MissingDestination {
                passenger: "p2".to_string()
            },
            compute_cost_matrix(
                &vehicles,
                &passengers,
                &DestinationPolicy::PerPassenger(destinations),
                &Weights::default(),
                CostRounding::Keep,
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_non_finite_positions() {
        let (mut vehicles, passengers) = scenario();
        vehicles[1] = Vehicle::new("v2", 1, Position::new(f64::NAN, 0.));
        assert_eq!(
            EncodingError::InvalidCost {
                vehicle: "v2".to_string(),
                passenger: "p1".to_string()
            },
            compute_cost_matrix(
                &vehicles,
                &passengers,
                &DestinationPolicy::None,
                &Weights::default(),
                CostRounding::NearestInteger,
            )
            .unwrap_err()
        );
        let (vehicles, mut passengers) = scenario();
        passengers[1] = Passenger::new("p2", Position::new(f64::INFINITY, 0.));
        assert_eq!(
            EncodingError::InvalidCost {
                vehicle: "v1".to_string(),
                passenger: "p2".to_string()
            },
            compute_cost_matrix(
                &vehicles,
                &passengers,
                &DestinationPolicy::None,
                &Weights::default(),
                CostRounding::Keep,
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_non_finite_destination() {
        let (vehicles, passengers) = scenario();
        assert_eq!(
            EncodingError::InvalidCost {
                vehicle: "v1".to_string(),
                passenger: "p1".to_string()
            },
            compute_cost_matrix(
                &vehicles,
                &passengers,
                &DestinationPolicy::Common(Position::new(0., f64::NEG_INFINITY)),
                &Weights::default(),
                CostRounding::Keep,
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_invalid_weights() {
        assert_eq!(EncodingError::InvalidWeight, Weights::new(-1., 1.).unwrap_err());
        assert_eq!(
            EncodingError::InvalidWeight,
            Weights::new(1., f64::NAN).unwrap_err()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("3", Cost::Integer(3).to_string());
        assert_eq!("2.5", Cost::Real(2.5).to_string());
        assert_eq!("2", Cost::Real(2.).to_string());
    }
}
