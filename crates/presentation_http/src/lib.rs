//! Pirinku HTTP presentation layer
//!
//! Serves the suggestion and image flows plus tool ranking over JSON.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, ValidatedJson};
pub use routes::create_router;
pub use state::AppState;
