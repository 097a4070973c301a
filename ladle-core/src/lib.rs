//! Core types and report algorithms for the ladle meal-delivery engine.

/// Kitchen count report builders: component totals and meal lines.
pub mod kitchen;
/// Meal label sheet layout and pagination.
pub mod labels;
/// Domain models and identifiers shared by all collaborators.
pub mod model;
/// Traits describing the external collaborator interfaces.
pub mod ports;
/// Delivery route sheet builders: summary lines and sequence merge.
pub mod route;
/// High-level service facade used by clients.
pub mod service;

pub use kitchen::*;
pub use labels::*;
pub use model::*;
pub use ports::*;
pub use route::*;
pub use service::*;
