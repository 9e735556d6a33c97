//! Recipe illustration handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::{Validate, ValidationError};

use crate::{middleware::ValidatedJson, state::AppState};

/// Image request body
#[derive(Debug, Deserialize, Validate)]
pub struct ImageBody {
    /// Recipe title to illustrate
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub title: String,
}

/// Image response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Remote URL, inline `data:` URI or the placeholder
    pub image_url: String,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Generate an illustration; provider failures answer with the placeholder
#[instrument(skip(state, body), fields(title = %body.title))]
pub async fn generate_image(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ImageBody>,
) -> Json<ImageResponse> {
    Json(ImageResponse {
        image_url: state.images.get_image(body.title.trim()).await,
    })
}
