//! Entities - request-scoped domain objects

mod recipe;
mod suggestion_request;

pub use recipe::{PLACEHOLDER_IMAGE_URL, Recipe};
pub use suggestion_request::SuggestionRequest;
