//! Application state shared across handlers

use std::sync::Arc;

use application::{
    ImageService, RecognitionOptions, SuggestionService, ToolSelectorMode, ToolUsageService,
};
use domain::PredefinedToolSet;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Recipe suggestions from the text model
    pub suggestions: Arc<SuggestionService>,
    /// Recipe illustrations from the image model
    pub images: Arc<ImageService>,
    /// Persisted tool usage counters
    pub usage: Arc<ToolUsageService>,
    /// Vocabulary offered in predefined mode
    pub vocabulary: Arc<PredefinedToolSet>,
    pub tool_mode: ToolSelectorMode,
    /// Settings a client uses when it starts speech capture
    pub voice: RecognitionOptions,
}
