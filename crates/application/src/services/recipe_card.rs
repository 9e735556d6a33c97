//! Recipe cards and their independent image loading
//!
//! Each card owns its image state. The loader only holds a weak reference to
//! it, so a result arriving after the card was dropped (for example because
//! a newer search replaced the list) is discarded instead of applied.

use std::sync::{Arc, Weak};

use domain::Recipe;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use super::image_service::ImageService;

/// Image currently shown on a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub url: String,
    pub loading: bool,
}

/// A rendered recipe with its own image state
#[derive(Debug)]
pub struct RecipeCard {
    recipe: Recipe,
    image: Arc<Mutex<CardImage>>,
}

impl RecipeCard {
    /// New card showing the recipe's placeholder while its image loads
    pub fn new(recipe: Recipe) -> Self {
        let image = CardImage {
            url: recipe.image_url.clone(),
            loading: true,
        };
        Self {
            recipe,
            image: Arc::new(Mutex::new(image)),
        }
    }

    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn image(&self) -> CardImage {
        self.image.lock().clone()
    }

    /// Recipe with the image currently shown
    pub fn snapshot(&self) -> Recipe {
        let mut recipe = self.recipe.clone();
        recipe.image_url = self.image.lock().url.clone();
        recipe
    }

    /// Handle used by the image loader to update this card
    pub fn handle(&self) -> CardImageHandle {
        CardImageHandle {
            title: self.recipe.title.clone(),
            fallback: self.recipe.image_url.clone(),
            image: Arc::downgrade(&self.image),
        }
    }
}

/// Weak link from an in-flight image request back to its card
#[derive(Debug, Clone)]
pub struct CardImageHandle {
    title: String,
    fallback: String,
    image: Weak<Mutex<CardImage>>,
}

impl CardImageHandle {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the owning card is gone
    pub fn is_discarded(&self) -> bool {
        self.image.strong_count() == 0
    }

    /// Show `url` and stop loading; `false` if the card is gone
    pub fn apply(&self, url: String) -> bool {
        let Some(image) = self.image.upgrade() else {
            return false;
        };
        let mut image = image.lock();
        image.url = url;
        image.loading = false;
        true
    }

    /// Restore the initial placeholder and stop loading; `false` if the card is gone
    pub fn fall_back(&self) -> bool {
        self.apply(self.fallback.clone())
    }
}

/// What happened to one card's image request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadOutcome {
    /// Generated image applied
    Loaded,
    /// Request failed, placeholder kept
    FellBack,
    /// Card was dropped before the result arrived
    Discarded,
}

/// Runs one image request per card
#[derive(Debug, Clone)]
pub struct ImageLoader {
    images: Arc<ImageService>,
}

impl ImageLoader {
    pub const fn new(images: Arc<ImageService>) -> Self {
        Self { images }
    }

    /// Fetch the image for one card and apply it if the card still exists
    #[instrument(skip(self, handle), fields(title = %handle.title()))]
    pub async fn load(&self, handle: CardImageHandle) -> ImageLoadOutcome {
        if handle.is_discarded() {
            debug!("Card discarded before image request");
            return ImageLoadOutcome::Discarded;
        }

        let result = self.images.try_get_image(handle.title()).await;

        let (applied, outcome) = match result {
            Ok(url) => (handle.apply(url), ImageLoadOutcome::Loaded),
            Err(e) => {
                warn!(error = %e, "Image request failed, keeping placeholder");
                (handle.fall_back(), ImageLoadOutcome::FellBack)
            },
        };

        if applied {
            outcome
        } else {
            debug!("Card discarded, image result dropped");
            ImageLoadOutcome::Discarded
        }
    }

    /// Start loading a card's image in the background
    pub fn spawn(&self, card: &RecipeCard) -> JoinHandle<ImageLoadOutcome> {
        let loader = self.clone();
        let handle = card.handle();
        tokio::spawn(async move { loader.load(handle).await })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use domain::PLACEHOLDER_IMAGE_URL;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        error::ApplicationError,
        ports::{ImagePort, MockImagePort},
    };

    fn recipe(title: &str) -> Recipe {
        Recipe::new(title, "", vec!["a".to_string()], vec!["b".to_string()])
    }

    fn loader(mock: MockImagePort) -> ImageLoader {
        ImageLoader::new(Arc::new(ImageService::new(Arc::new(mock))))
    }

    #[test]
    fn new_card_shows_placeholder_and_loads() {
        let card = RecipeCard::new(recipe("Soto"));
        assert_eq!(
            card.image(),
            CardImage {
                url: PLACEHOLDER_IMAGE_URL.to_string(),
                loading: true
            }
        );
    }

    #[tokio::test]
    async fn successful_load_replaces_image() {
        let mut mock = MockImagePort::new();
        mock.expect_generate_image()
            .returning(|title| Ok(format!("https://img.example/{title}.png")));

        let card = RecipeCard::new(recipe("Soto"));
        let outcome = loader(mock).load(card.handle()).await;

        assert_eq!(outcome, ImageLoadOutcome::Loaded);
        assert_eq!(card.image().url, "https://img.example/Soto.png");
        assert!(!card.image().loading);
        assert_eq!(card.snapshot().image_url, "https://img.example/Soto.png");
    }

    #[tokio::test]
    async fn failure_falls_back_to_initial_placeholder() {
        let mut mock = MockImagePort::new();
        mock.expect_generate_image()
            .returning(|_| Err(ApplicationError::ExternalService("500".to_string())));

        let card = RecipeCard::new(recipe("Soto").with_placeholder("/local.png"));
        let outcome = loader(mock).load(card.handle()).await;

        assert_eq!(outcome, ImageLoadOutcome::FellBack);
        assert_eq!(
            card.image(),
            CardImage {
                url: "/local.png".to_string(),
                loading: false
            }
        );
    }

    #[tokio::test]
    async fn dropped_card_skips_request() {
        let mut mock = MockImagePort::new();
        mock.expect_generate_image().never();

        let card = RecipeCard::new(recipe("Soto"));
        let handle = card.handle();
        drop(card);

        assert_eq!(loader(mock).load(handle).await, ImageLoadOutcome::Discarded);
    }

    struct GatedImages {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ImagePort for GatedImages {
        async fn generate_image(&self, _title: &str) -> Result<String, ApplicationError> {
            self.gate.notified().await;
            Ok("late.png".to_string())
        }
    }

    #[tokio::test]
    async fn result_for_card_dropped_in_flight_is_discarded() {
        let gate = Arc::new(Notify::new());
        let images = ImageService::new(Arc::new(GatedImages { gate: gate.clone() }));
        let loader = ImageLoader::new(Arc::new(images));

        let card = RecipeCard::new(recipe("Soto"));
        let handle = card.handle();
        let task = loader.spawn(&card);
        tokio::task::yield_now().await;

        drop(card);
        gate.notify_one();

        assert_eq!(task.await.unwrap(), ImageLoadOutcome::Discarded);
        assert!(handle.is_discarded());
    }
}
