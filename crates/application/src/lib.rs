//! Application layer - Use cases and orchestration
//!
//! Holds the ports to the suggestion provider, the image provider, the
//! tool-frequency store and the speech capability, plus the services that
//! drive the recipe form and the result view on top of them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
