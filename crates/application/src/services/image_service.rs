//! Image service - Recipe illustrations with placeholder fallback

use std::{fmt, sync::Arc, time::Duration};

use domain::PLACEHOLDER_IMAGE_URL;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::ImagePort};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Requests one illustration per recipe title
pub struct ImageService {
    provider: Arc<dyn ImagePort>,
    placeholder: String,
    timeout: Duration,
}

impl fmt::Debug for ImageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageService")
            .field("placeholder", &self.placeholder)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ImageService {
    pub fn new(provider: Arc<dyn ImagePort>) -> Self {
        Self {
            provider,
            placeholder: PLACEHOLDER_IMAGE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Request an image, reporting failures
    ///
    /// A missing or empty URL in an otherwise successful answer is replaced
    /// by the placeholder and is not an error.
    #[instrument(skip(self), fields(timeout_ms = self.timeout.as_millis()))]
    pub async fn try_get_image(&self, title: &str) -> Result<String, ApplicationError> {
        let url = tokio::time::timeout(self.timeout, self.provider.generate_image(title))
            .await
            .map_err(|_| {
                #[allow(clippy::cast_possible_truncation)]
                let ms = self.timeout.as_millis() as u64;
                ApplicationError::Timeout(ms)
            })??;

        if url.trim().is_empty() {
            debug!("Image provider returned no image, using placeholder");
            return Ok(self.placeholder.clone());
        }

        Ok(url)
    }

    /// Request an image, never failing
    ///
    /// Any error is logged and answered with the placeholder.
    pub async fn get_image(&self, title: &str) -> String {
        match self.try_get_image(title).await {
            Ok(url) => url,
            Err(e) => {
                warn!(title, error = %e, "Image generation failed, using placeholder");
                self.placeholder.clone()
            },
        }
    }
}
