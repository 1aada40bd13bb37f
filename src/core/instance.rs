use super::{
    compute_cost_matrix, Cost, CostMatrix, CostRounding, DestinationPolicy, EncodingError,
    Position, Weights,
};
use rustc_hash::FxHashSet;

/// A vehicle, which may pick up a limited number of passengers.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    id: String,
    capacity: u32,
    position: Position,
}

impl Vehicle {
    /// Builds a new vehicle.
    pub fn new(id: &str, capacity: u32, position: Position) -> Self {
        Self {
            id: id.to_string(),
            capacity,
            position,
        }
    }

    /// Returns the identifier of the vehicle.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the maximal number of passengers this vehicle can take.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the position of the vehicle.
    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// A passenger waiting to be picked up.
#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    id: String,
    position: Position,
}

impl Passenger {
    /// Builds a new passenger.
    pub fn new(id: &str, position: Position) -> Self {
        Self {
            id: id.to_string(),
            position,
        }
    }

    /// Returns the identifier of the passenger.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the pickup position of the passenger.
    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// A ride-sharing assignment problem.
///
/// An instance is made of vehicles, passengers, and the cost of each vehicle serving each passenger.
/// It also keeps the destination policy and the weights that were used to compute the costs.
///
/// Instances are checked when they are built (unique identifiers, complete and valid costs, destinations for all passengers) and cannot be modified afterwards.
/// The encoders are pure functions of an instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    name: String,
    vehicles: Vec<Vehicle>,
    passengers: Vec<Passenger>,
    costs: CostMatrix,
    destination: DestinationPolicy,
    weights: Weights,
}

impl Instance {
    /// Builds an instance from the positions of its elements, computing the costs with the cost model.
    ///
    /// See [`compute_cost_matrix`] for the cost formula.
    pub fn from_positions(
        name: &str,
        vehicles: Vec<Vehicle>,
        passengers: Vec<Passenger>,
        destination: DestinationPolicy,
        weights: Weights,
        rounding: CostRounding,
    ) -> Result<Self, EncodingError> {
        check_unique_ids(&vehicles, &passengers)?;
        let costs = compute_cost_matrix(&vehicles, &passengers, &destination, &weights, rounding)?;
        Ok(Self {
            name: name.to_string(),
            vehicles,
            passengers,
            costs,
            destination,
            weights,
        })
    }

    /// Builds an instance for which the costs are already known.
    ///
    /// The cost function is called once for each (vehicle, passenger) pair, vehicle by vehicle.
    /// A pair for which it returns `None` makes the construction fail.
    pub fn with_costs<F>(
        name: &str,
        vehicles: Vec<Vehicle>,
        passengers: Vec<Passenger>,
        destination: DestinationPolicy,
        weights: Weights,
        mut cost_of: F,
    ) -> Result<Self, EncodingError>
    where
        F: FnMut(&Vehicle, &Passenger) -> Option<Cost>,
    {
        check_unique_ids(&vehicles, &passengers)?;
        if let DestinationPolicy::PerPassenger(_) = destination {
            if let Some(p) = passengers
                .iter()
                .find(|p| destination.destination_of(p.id()).is_none())
            {
                return Err(EncodingError::MissingDestination {
                    passenger: p.id().to_string(),
                });
            }
        }
        let costs = CostMatrix::try_from_fn(vehicles.len(), passengers.len(), |i, j| {
            let (v, p) = (&vehicles[i], &passengers[j]);
            match cost_of(v, p) {
                Some(c) if c.is_valid() => Ok(c),
                Some(_) => Err(EncodingError::InvalidCost {
                    vehicle: v.id().to_string(),
                    passenger: p.id().to_string(),
                }),
                None => Err(EncodingError::MissingCost {
                    vehicle: v.id().to_string(),
                    passenger: p.id().to_string(),
                }),
            }
        })?;
        Ok(Self {
            name: name.to_string(),
            vehicles,
            passengers,
            costs,
            destination,
            weights,
        })
    }

    /// Returns the name of the instance.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the vehicles, in declaration order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Returns the passengers, in declaration order.
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Returns the cost for the vehicle at the given index to serve the passenger at the given index.
    ///
    /// # Panics
    ///
    /// This function panics if an index is out of bounds.
    pub fn cost(&self, vehicle_index: usize, passenger_index: usize) -> Cost {
        self.costs.get(vehicle_index, passenger_index)
    }

    /// Returns the destination policy used to compute the costs.
    pub fn destination(&self) -> &DestinationPolicy {
        &self.destination
    }

    /// Returns the weights used to compute the costs.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

fn check_unique_ids(vehicles: &[Vehicle], passengers: &[Passenger]) -> Result<(), EncodingError> {
    let mut seen = FxHashSet::default();
    if let Some(v) = vehicles.iter().find(|v| !seen.insert(v.id())) {
        return Err(EncodingError::DuplicateVehicle(v.id().to_string()));
    }
    let mut seen = FxHashSet::default();
    if let Some(p) = passengers.iter().find(|p| !seen.insert(p.id())) {
        return Err(EncodingError::DuplicatePassenger(p.id().to_string()));
    }
    Ok(())
}
