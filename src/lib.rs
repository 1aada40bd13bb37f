//! Encodes ride-sharing assignment problems into Distributed Constraint Optimization Problems,
//! written in the XCSP 2.1 dialect read by the FRODO solver.
//!
//! Instances are built from positions through the cost model, or read from their JSON document,
//! and are encoded by one of the [`Modeling`] variants.

mod core;
pub use crate::core::compute_cost_matrix;
pub use crate::core::Constraint;
pub use crate::core::Cost;
pub use crate::core::CostMatrix;
pub use crate::core::CostRounding;
pub use crate::core::DestinationKind;
pub use crate::core::DestinationMode;
pub use crate::core::DestinationPolicy;
pub use crate::core::Domain;
pub use crate::core::EncodedProblem;
pub use crate::core::EncodingError;
pub use crate::core::generate_positions;
pub use crate::core::Instance;
pub use crate::core::InstanceDocument;
pub use crate::core::Passenger;
pub use crate::core::Position;
pub use crate::core::Presentation;
pub use crate::core::Relation;
pub use crate::core::RelationCost;
pub use crate::core::ScenarioGenerator;
pub use crate::core::VariableDecl;
pub use crate::core::Vehicle;
pub use crate::core::VehicleEntry;
pub use crate::core::Weights;

mod encodings;
pub use encodings::AssignmentIndicatorEncoding;
pub use encodings::EncodingOptions;
pub use encodings::Modeling;
pub use encodings::PassengerDomainEncoding;
pub use encodings::Subsets;
pub use encodings::ToEncodedProblem;
pub use encodings::DEFAULT_FORMAT;

mod io;
pub use io::InstanceJsonReader;
pub use io::InstanceJsonWriter;
pub use io::XcspWriter;
