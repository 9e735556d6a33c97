//! Application services - Use case implementations

mod image_service;
mod recipe_card;
mod recipe_finder;
mod recipe_form;
mod suggestion_service;
mod tool_selector;
mod tool_usage_service;
mod voice_capture;

pub use image_service::ImageService;
pub use recipe_card::{CardImage, CardImageHandle, ImageLoadOutcome, ImageLoader, RecipeCard};
pub use recipe_finder::{
    CardSnapshot, FinderStatus, FinderView, RecipeFinder, SKELETON_CARD_COUNT, SearchOutcome,
    SubmitOutcome,
};
pub use recipe_form::{FormErrors, RecipeForm};
pub use suggestion_service::SuggestionService;
pub use tool_selector::{ToolSelector, ToolSelectorMode};
pub use tool_usage_service::{DEFAULT_STORAGE_KEY, ToolUsageService};
pub use voice_capture::{VoiceCapture, VoiceNotice, VoiceState, VoiceTarget};
