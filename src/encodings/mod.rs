use crate::core::{EncodedProblem, EncodingError, Instance};
use std::{fmt::Display, str::FromStr};
use tracing::debug;

mod assignment_indicator_encoding;
pub use assignment_indicator_encoding::AssignmentIndicatorEncoding;

mod passenger_domain_encoding;
pub use passenger_domain_encoding::PassengerDomainEncoding;

mod subsets;
pub use subsets::Subsets;

/// The format tag written in the presentation of the encoded problems by default.
pub const DEFAULT_FORMAT: &str = "XCSP 2.1_FRODO";

/// A trait implemented by the structures encoding an instance into a DCOP.
///
/// The structures implementing this trait check the instance when they are built,
/// so that producing the problem cannot fail.
pub trait ToEncodedProblem {
    /// Builds the encoded problem.
    fn to_encoded_problem(&self) -> EncodedProblem;

    /// Returns the number of variables of the encoded problem.
    fn n_variables(&self) -> usize;

    /// Returns the number of constraints of the encoded problem, without building it.
    ///
    /// The value saturates at `u128::MAX`.
    fn n_constraints(&self) -> u128;
}

/// Parameters of the encoders that do not depend on the instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingOptions {
    /// The format tag written in the presentation.
    pub format: String,
    /// The maximal number of constraints an encoding may emit, if any.
    pub constraint_budget: Option<u128>,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            constraint_budget: None,
        }
    }
}

/// The available ways to encode an instance.
///
/// Both modelings fail with [`EncodingError::NoVehicles`] on an instance with passengers but no vehicles:
/// the assignment-indicator modeling cannot express that a passenger is picked up without any vehicle variable,
/// and the passenger-domain modeling has no agent to own the passenger variables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Modeling {
    /// A binary variable for each (vehicle, passenger) pair; see [`AssignmentIndicatorEncoding`].
    AssignmentIndicator,
    /// A variable for each passenger, which values are the vehicles; see [`PassengerDomainEncoding`].
    PassengerDomain,
}

impl Modeling {
    /// Returns all the modelings, by increasing index.
    pub fn all() -> [Modeling; 2] {
        [Modeling::AssignmentIndicator, Modeling::PassengerDomain]
    }

    /// Returns the index of the modeling (1 or 2).
    pub fn index(&self) -> usize {
        match self {
            Modeling::AssignmentIndicator => 1,
            Modeling::PassengerDomain => 2,
        }
    }

    /// Checks the instance and returns the encoder of this modeling.
    ///
    /// See [`Modeling`] for the instances no modeling can encode.
    pub fn encoding<'a>(
        &self,
        instance: &'a Instance,
        options: &'a EncodingOptions,
    ) -> Result<Box<dyn ToEncodedProblem + 'a>, EncodingError> {
        Ok(match self {
            Modeling::AssignmentIndicator => {
                Box::new(AssignmentIndicatorEncoding::try_new(instance, options)?)
            }
            Modeling::PassengerDomain => {
                Box::new(PassengerDomainEncoding::try_new(instance, options)?)
            }
        })
    }

    /// Encodes an instance.
    ///
    /// All the checks are made before the problem is built, including the one on the constraint budget.
    /// In case of an error, nothing is built.
    pub fn encode(
        &self,
        instance: &Instance,
        options: &EncodingOptions,
    ) -> Result<EncodedProblem, EncodingError> {
        let encoding = self.encoding(instance, options)?;
        let predicted = encoding.n_constraints();
        if let Some(budget) = options.constraint_budget {
            if predicted > budget {
                return Err(EncodingError::ConstraintBudgetExceeded { predicted, budget });
            }
        }
        debug!(
            "encoding {:?} with modeling {}: {} variables, {} constraints",
            instance.name(),
            self,
            encoding.n_variables(),
            predicted
        );
        Ok(encoding.to_encoded_problem())
    }
}

impl Display for Modeling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modeling::AssignmentIndicator => write!(f, "1 (assignment-indicator)"),
            Modeling::PassengerDomain => write!(f, "2 (passenger-domain)"),
        }
    }
}

impl FromStr for Modeling {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "assignment-indicator" => Ok(Modeling::AssignmentIndicator),
            "2" | "passenger-domain" => Ok(Modeling::PassengerDomain),
            _ => Err(EncodingError::UnsupportedModeling(s.to_string())),
        }
    }
}

impl TryFrom<usize> for Modeling {
    type Error = EncodingError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Modeling::all()
            .into_iter()
            .find(|m| m.index() == value)
            .ok_or_else(|| EncodingError::UnsupportedModeling(value.to_string()))
    }
}
