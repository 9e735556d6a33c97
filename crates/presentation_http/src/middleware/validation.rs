//! Request validation
//!
//! `ValidatedJson` deserializes a body and runs its `validator` rules,
//! rejecting with an [`ApiError`] that names each failing field.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// One message per failing field; the first rule's message wins
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errors)| {
            let first = errors.first()?;
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            Some((field.to_string(), message))
        })
        .collect()
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value.validate().map_err(|e| {
            let fields = field_messages(&e);
            let message = fields.values().cloned().collect::<Vec<_>>().join(" ");
            ApiError::Validation { message, fields }
        })?;

        Ok(Self(value))
    }
}
