mod cost_model;
pub use cost_model::compute_cost_matrix;
pub use cost_model::Cost;
pub use cost_model::CostMatrix;
pub use cost_model::CostRounding;
pub use cost_model::Weights;

mod document;
pub use document::DestinationMode;
pub use document::InstanceDocument;
pub use document::VehicleEntry;

mod errors;
pub use errors::EncodingError;

mod generator;
pub use generator::generate_positions;
pub use generator::DestinationKind;
pub use generator::ScenarioGenerator;

mod geometry;
pub use geometry::DestinationPolicy;
pub use geometry::Position;

mod instance;
pub use instance::Instance;
pub use instance::Passenger;
pub use instance::Vehicle;

mod problem;
pub use problem::Constraint;
pub use problem::Domain;
pub use problem::EncodedProblem;
pub use problem::Presentation;
pub use problem::Relation;
pub use problem::RelationCost;
pub use problem::VariableDecl;
