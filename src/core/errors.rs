use thiserror::Error;

/// The conditions under which an instance cannot be built or encoded.
///
/// Every variant is raised before any output is produced.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// A declared vehicle has no capacity.
    #[error(r#"missing capacity for vehicle "{vehicle}""#)]
    MissingCapacity {
        /// The vehicle identifier.
        vehicle: String,
    },
    /// A (vehicle, passenger) pair has no cost.
    #[error(r#"missing cost for vehicle "{vehicle}" and passenger "{passenger}""#)]
    MissingCost {
        /// The vehicle identifier.
        vehicle: String,
        /// The passenger identifier.
        passenger: String,
    },
    /// A (vehicle, passenger) cost is negative or not finite.
    #[error(r#"invalid cost for vehicle "{vehicle}" and passenger "{passenger}""#)]
    InvalidCost {
        /// The vehicle identifier.
        vehicle: String,
        /// The passenger identifier.
        passenger: String,
    },
    /// The destination policy has no destination for a passenger.
    #[error(r#"missing destination for passenger "{passenger}""#)]
    MissingDestination {
        /// The passenger identifier.
        passenger: String,
    },
    /// A declared passenger has no position.
    #[error(r#"missing position for passenger "{passenger}""#)]
    MissingPosition {
        /// The passenger identifier.
        passenger: String,
    },
    /// Two vehicles share the same identifier.
    #[error(r#"duplicate vehicle identifier "{0}""#)]
    DuplicateVehicle(String),
    /// Two passengers share the same identifier.
    #[error(r#"duplicate passenger identifier "{0}""#)]
    DuplicatePassenger(String),
    /// A pickup or drop-off weight is negative or not finite.
    #[error("cost weights must be finite and non-negative")]
    InvalidWeight,
    /// The dimensions of a generation area are negative or not finite.
    #[error("the area must have finite and non-negative dimensions")]
    InvalidArea,
    /// Variables must be owned by vehicles but there is none.
    #[error("no vehicles to own the variables")]
    NoVehicles,
    /// The requested modeling does not exist.
    #[error(r#"unsupported modeling "{0}""#)]
    UnsupportedModeling(String),
    /// The number of constraints to emit is higher than the allowed one.
    #[error("the encoding would emit {predicted} constraints, more than the budget of {budget}")]
    ConstraintBudgetExceeded {
        /// The number of constraints the encoding would emit.
        predicted: u128,
        /// The maximal number of constraints allowed.
        budget: u128,
    },
}
