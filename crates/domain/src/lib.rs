//! Domain layer for Pirinku
//!
//! Contains the recipe-suggestion vocabulary: validated form input, the
//! cooking-tool selection and its usage counters, and the recipes returned
//! by the suggestion provider. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod messages;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
