//! Cooking tool ranking and usage handlers

use application::{ApplicationError, RecognitionOptions, ToolSelector, ToolSelectorMode};
use axum::{Json, extract::State};
use domain::{DomainError, ToolFrequencyMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::{Validate, ValidationError};

use super::suggestions::rule_error;
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// A vocabulary entry with its recorded count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTool {
    pub name: String,
    pub count: u64,
}

/// Ranked vocabulary response
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub mode: ToolSelectorMode,
    pub tools: Vec<RankedTool>,
    /// Recognizer options for voice entry of tools and ingredients
    pub voice: RecognitionOptions,
}

/// One submitted selection
#[derive(Debug, Deserialize, Validate)]
pub struct UsageBody {
    #[validate(custom(function = "non_empty"))]
    pub tools: Vec<String>,
}

fn non_empty(tools: &[String]) -> Result<(), ValidationError> {
    if tools.iter().all(|t| t.trim().is_empty()) {
        return Err(rule_error("tools", &DomainError::NoCookingTools));
    }
    Ok(())
}

fn with_counts<'a>(
    names: impl IntoIterator<Item = &'a str>,
    frequencies: &ToolFrequencyMap,
) -> Vec<RankedTool> {
    names
        .into_iter()
        .map(|name| RankedTool {
            name: name.to_string(),
            count: frequencies.count(name),
        })
        .collect()
}

/// Predefined vocabulary, most used first
pub async fn ranked_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    let frequencies = state.usage.load().await;
    let ranked = state.vocabulary.ranked(&frequencies);

    Json(ToolsResponse {
        mode: state.tool_mode,
        voice: state.voice.clone(),
        tools: with_counts(ranked.iter().map(|t| t.as_str()), &frequencies),
    })
}

/// Count one use of every submitted tool
///
/// Names go through the same selector the form uses: free-form names are
/// lower-cased, predefined names must belong to the vocabulary.
#[instrument(skip(state, body), fields(tools = body.tools.len()))]
pub async fn record_usage(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<UsageBody>,
) -> Result<Json<ToolsResponse>, ApiError> {
    let mut selector =
        ToolSelector::for_mode(state.tool_mode, &state.vocabulary, &ToolFrequencyMap::new());
    for name in body.tools.iter().filter(|n| !n.trim().is_empty()) {
        selector.add(name).map_err(ApplicationError::from)?;
    }

    let frequencies = state.usage.record_submission(selector.selection()).await?;
    debug!(entries = frequencies.len(), "Usage recorded");

    Ok(Json(ToolsResponse {
        mode: state.tool_mode,
        voice: state.voice.clone(),
        tools: with_counts(selector.selection().iter().map(|t| t.as_str()), &frequencies),
    }))
}
