//! Recipe finder - Presentation state machine for one search page
//!
//! ```text
//! idle ──submit──▶ loading ──▶ success(cards) | empty | error
//!   ▲                 ▲                       │
//!   └──dismiss──      └──────re-submit────────┘
//! ```
//!
//! Every search takes a new generation number. A suggestion response is
//! applied only if its generation is still the latest, so an older response
//! can never overwrite the state of a newer search.

use std::{fmt, sync::Arc};

use domain::{Recipe, SuggestionRequest, messages};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::{
    image_service::ImageService,
    recipe_card::{ImageLoadOutcome, ImageLoader, RecipeCard},
    recipe_form::{FormErrors, RecipeForm},
    suggestion_service::SuggestionService,
    tool_usage_service::ToolUsageService,
};

/// Skeleton cards rendered while suggestions load
pub const SKELETON_CARD_COUNT: usize = 2;

/// Terminal or transient state reached by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderStatus {
    Idle,
    Loading,
    /// Number of cards shown
    Success(usize),
    Empty,
    Error,
}

/// Result of running a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response was applied to the view
    Applied(FinderStatus),
    /// A newer search started meanwhile; the response was dropped
    Stale,
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A search is already loading; nothing was sent
    Busy,
    /// Local validation failed; nothing was sent
    Rejected(FormErrors),
    Completed(SearchOutcome),
}

/// One card as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSnapshot {
    /// Recipe with the image currently shown
    pub recipe: Recipe,
    pub image_loading: bool,
}

/// What the results area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderView {
    Idle,
    Loading { skeletons: usize },
    Success { heading: String, cards: Vec<CardSnapshot> },
    Empty { message: String },
    Error { title: String, message: String },
}

#[derive(Debug)]
enum Phase {
    Idle,
    Loading,
    Success(Vec<RecipeCard>),
    Empty,
    Error,
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    phase: Phase,
    image_tasks: Vec<JoinHandle<ImageLoadOutcome>>,
}

impl Inner {
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        // Cards of the previous list are dropped; their pending images discard themselves.
        self.image_tasks.clear();
        self.generation
    }
}

/// Coordinates submission, suggestion search and per-card image loading
pub struct RecipeFinder {
    suggestions: Arc<SuggestionService>,
    images: ImageLoader,
    usage: Option<Arc<ToolUsageService>>,
    inner: Mutex<Inner>,
}

impl fmt::Debug for RecipeFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeFinder")
            .field("suggestions", &self.suggestions)
            .field("generation", &self.inner.lock().generation)
            .finish_non_exhaustive()
    }
}

impl RecipeFinder {
    pub fn new(suggestions: Arc<SuggestionService>, images: Arc<ImageService>) -> Self {
        Self {
            suggestions,
            images: ImageLoader::new(images),
            usage: None,
            inner: Mutex::new(Inner {
                generation: 0,
                phase: Phase::Idle,
                image_tasks: Vec::new(),
            }),
        }
    }

    /// Record tool usage on every valid submission
    #[must_use]
    pub fn with_usage(mut self, usage: Arc<ToolUsageService>) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.inner.lock().phase, Phase::Loading)
    }

    pub fn status(&self) -> FinderStatus {
        match &self.inner.lock().phase {
            Phase::Idle => FinderStatus::Idle,
            Phase::Loading => FinderStatus::Loading,
            Phase::Success(cards) => FinderStatus::Success(cards.len()),
            Phase::Empty => FinderStatus::Empty,
            Phase::Error => FinderStatus::Error,
        }
    }

    /// Render the current state
    pub fn view(&self) -> FinderView {
        match &self.inner.lock().phase {
            Phase::Idle => FinderView::Idle,
            Phase::Loading => FinderView::Loading {
                skeletons: SKELETON_CARD_COUNT,
            },
            Phase::Success(cards) => FinderView::Success {
                heading: messages::RESULTS_HEADING.to_string(),
                cards: cards
                    .iter()
                    .map(|card| CardSnapshot {
                        recipe: card.snapshot(),
                        image_loading: card.image().loading,
                    })
                    .collect(),
            },
            Phase::Empty => FinderView::Empty {
                message: messages::NO_RECIPES_FOUND.to_string(),
            },
            Phase::Error => FinderView::Error {
                title: messages::ERROR_BANNER_TITLE.to_string(),
                message: messages::SUGGESTION_FAILED.to_string(),
            },
        }
    }

    /// Validate the form and run a search
    ///
    /// Rejected while a search is loading. On success the selected tools are
    /// counted before the suggestion request is sent; a failure to persist
    /// the counters does not fail the submission.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &mut RecipeForm) -> SubmitOutcome {
        if self.is_loading() {
            return SubmitOutcome::Busy;
        }

        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => {
                debug!(?errors, "Submission rejected by validation");
                return SubmitOutcome::Rejected(errors);
            },
        };

        let generation = {
            let mut inner = self.inner.lock();
            if matches!(inner.phase, Phase::Loading) {
                return SubmitOutcome::Busy;
            }
            inner.begin()
        };

        if let Some(usage) = &self.usage {
            if let Err(e) = usage.record_submission(request.cooking_tools()).await {
                warn!(error = %e, "Failed to record tool usage");
            }
        }

        SubmitOutcome::Completed(self.run(generation, &request).await)
    }

    /// Run a search for an already validated request
    ///
    /// May overlap with a running search; only the latest one updates the view.
    pub async fn search(&self, request: &SuggestionRequest) -> SearchOutcome {
        let generation = self.inner.lock().begin();
        self.run(generation, request).await
    }

    /// Back to idle; any in-flight response becomes stale
    pub fn dismiss(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.phase = Phase::Idle;
        inner.image_tasks.clear();
    }

    /// Wait for the image requests of the current cards
    pub async fn settle_images(&self) -> Vec<ImageLoadOutcome> {
        let tasks = std::mem::take(&mut self.inner.lock().image_tasks);
        futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter_map(|joined| joined.inspect_err(|e| warn!(error = %e, "Image task failed")).ok())
            .collect()
    }

    #[instrument(skip(self, request))]
    async fn run(&self, generation: u64, request: &SuggestionRequest) -> SearchOutcome {
        let result = self.suggestions.get_suggestions(request).await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(latest = inner.generation, "Discarding stale suggestion response");
            return SearchOutcome::Stale;
        }

        let status = match result {
            Ok(recipes) if recipes.is_empty() => {
                info!("No recipes found");
                inner.phase = Phase::Empty;
                FinderStatus::Empty
            },
            Ok(recipes) => {
                let cards: Vec<RecipeCard> = recipes.into_iter().map(RecipeCard::new).collect();
                inner.image_tasks = cards.iter().map(|card| self.images.spawn(card)).collect();
                let count = cards.len();
                inner.phase = Phase::Success(cards);
                info!(recipe_count = count, "Showing recipe suggestions");
                FinderStatus::Success(count)
            },
            Err(e) => {
                warn!(error = %e, "Recipe search failed");
                inner.phase = Phase::Error;
                FinderStatus::Error
            },
        };

        SearchOutcome::Applied(status)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use domain::PLACEHOLDER_IMAGE_URL;
    use tokio::sync::oneshot;

    use super::*;
    use crate::{
        error::ApplicationError,
        ports::{MockImagePort, MockSuggestionPort, MockToolFrequencyStore, SuggestionPort},
    };

    type Reply = Result<Vec<Recipe>, ApplicationError>;

    fn recipe(title: &str) -> Recipe {
        Recipe::new(title, "", vec!["telur".to_string()], vec!["masak".to_string()])
    }

    fn images_ok() -> Arc<ImageService> {
        let mut mock = MockImagePort::new();
        mock.expect_generate_image()
            .returning(|title| Ok(format!("img:{title}")));
        Arc::new(ImageService::new(Arc::new(mock)))
    }

    fn finder_with(mock: MockSuggestionPort) -> RecipeFinder {
        RecipeFinder::new(Arc::new(SuggestionService::new(Arc::new(mock))), images_ok())
    }

    fn valid_form() -> RecipeForm {
        let mut form = RecipeForm::default();
        form.set_ingredients("telur, nasi");
        form.tools_mut().add("wajan").unwrap();
        form
    }

    fn titles(view: &FinderView) -> Vec<String> {
        match view {
            FinderView::Success { cards, .. } => {
                cards.iter().map(|c| c.recipe.title.clone()).collect()
            },
            other => panic!("expected success view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn short_ingredients_never_reach_provider() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().never();
        let finder = finder_with(mock);

        let mut form = valid_form();
        form.set_ingredients("ab");
        let outcome = finder.submit(&mut form).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.ingredients.is_some()));
        assert_eq!(finder.view(), FinderView::Idle);
    }

    #[tokio::test]
    async fn empty_tools_are_rejected_with_root_error() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().never();
        let finder = finder_with(mock);

        let mut form = RecipeForm::default();
        form.set_ingredients("telur, nasi");
        let SubmitOutcome::Rejected(errors) = finder.submit(&mut form).await else {
            panic!("expected rejection");
        };
        assert_eq!(errors.root.as_deref(), Some(messages::TOOLS_REQUIRED));
    }

    #[tokio::test]
    async fn success_renders_cards_in_order_with_loading_placeholders() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .returning(|_| Ok(vec![recipe("Telur Dadar"), recipe("Nasi Goreng")]));
        let finder = finder_with(mock);

        let outcome = finder.submit(&mut valid_form()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Completed(SearchOutcome::Applied(FinderStatus::Success(2)))
        );

        let view = finder.view();
        assert_eq!(titles(&view), vec!["Telur Dadar", "Nasi Goreng"]);
        let FinderView::Success { cards, heading } = view else {
            unreachable!()
        };
        assert_eq!(heading, messages::RESULTS_HEADING);
        assert!(cards.iter().all(|c| c.image_loading));
        assert!(cards.iter().all(|c| c.recipe.image_url == PLACEHOLDER_IMAGE_URL));

        let outcomes = finder.settle_images().await;
        assert_eq!(outcomes, vec![ImageLoadOutcome::Loaded; 2]);
        let FinderView::Success { cards, .. } = finder.view() else {
            unreachable!()
        };
        assert_eq!(cards[0].recipe.image_url, "img:Telur Dadar");
        assert!(!cards[1].image_loading);
    }

    #[tokio::test]
    async fn empty_result_is_informational() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| Ok(Vec::new()));
        let finder = finder_with(mock);

        finder.submit(&mut valid_form()).await;
        assert_eq!(
            finder.view(),
            FinderView::Empty {
                message: messages::NO_RECIPES_FOUND.to_string()
            }
        );
    }

    #[tokio::test]
    async fn provider_failure_shows_one_banner_and_no_cards() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .times(1)
            .returning(|_| Err(ApplicationError::InvalidResponse("schema".to_string())));
        let finder = finder_with(mock);

        let outcome = finder.submit(&mut valid_form()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Completed(SearchOutcome::Applied(FinderStatus::Error))
        );
        assert_eq!(
            finder.view(),
            FinderView::Error {
                title: messages::ERROR_BANNER_TITLE.to_string(),
                message: messages::SUGGESTION_FAILED.to_string(),
            }
        );
        assert!(finder.settle_images().await.is_empty());
    }

    #[tokio::test]
    async fn failing_image_only_affects_its_own_card() {
        let mut suggestions = MockSuggestionPort::new();
        suggestions
            .expect_suggest()
            .returning(|_| Ok(vec![recipe("A"), recipe("B"), recipe("C")]));
        let mut images = MockImagePort::new();
        images.expect_generate_image().returning(|title| {
            if title == "B" {
                Err(ApplicationError::ExternalService("quota".to_string()))
            } else {
                Ok(format!("img:{title}"))
            }
        });
        let finder = RecipeFinder::new(
            Arc::new(SuggestionService::new(Arc::new(suggestions))),
            Arc::new(ImageService::new(Arc::new(images))),
        );

        finder.submit(&mut valid_form()).await;
        let outcomes = finder.settle_images().await;
        assert_eq!(
            outcomes,
            vec![
                ImageLoadOutcome::Loaded,
                ImageLoadOutcome::FellBack,
                ImageLoadOutcome::Loaded
            ]
        );

        let FinderView::Success { cards, .. } = finder.view() else {
            panic!("image failure must not change the finder state");
        };
        let urls: Vec<&str> = cards.iter().map(|c| c.recipe.image_url.as_str()).collect();
        assert_eq!(urls, vec!["img:A", PLACEHOLDER_IMAGE_URL, "img:C"]);
        assert!(cards.iter().all(|c| !c.image_loading));
    }

    #[tokio::test]
    async fn identical_submissions_call_provider_twice() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().times(2).returning(|_| Ok(vec![recipe("A")]));
        let finder = finder_with(mock);

        let mut form = valid_form();
        finder.submit(&mut form).await;
        finder.submit(&mut form).await;
        assert_eq!(finder.generation(), 2);
    }

    #[tokio::test]
    async fn submission_records_tool_usage() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| Ok(Vec::new()));
        let mut store = MockToolFrequencyStore::new();
        store.expect_read().returning(|_| Ok(domain::ToolFrequencyMap::new()));
        store
            .expect_write()
            .withf(|_, map| map.count("wajan") == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let finder = finder_with(mock).with_usage(Arc::new(ToolUsageService::new(Arc::new(store))));
        finder.submit(&mut valid_form()).await;
    }

    #[tokio::test]
    async fn failed_usage_write_does_not_block_search() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().times(1).returning(|_| Ok(vec![recipe("A")]));
        let mut store = MockToolFrequencyStore::new();
        store.expect_read().returning(|_| Ok(domain::ToolFrequencyMap::new()));
        store
            .expect_write()
            .returning(|_, _| Err(ApplicationError::Storage("read-only".to_string())));

        let finder = finder_with(mock).with_usage(Arc::new(ToolUsageService::new(Arc::new(store))));
        let outcome = finder.submit(&mut valid_form()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Completed(SearchOutcome::Applied(FinderStatus::Success(1)))
        );
    }

    /// Suggestion provider whose replies are released by the test
    struct ScriptedProvider {
        replies: parking_lot::Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<oneshot::Receiver<Reply>>) -> Self {
            Self {
                replies: parking_lot::Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl SuggestionPort for ScriptedProvider {
        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<Recipe>, ApplicationError> {
            let reply = self.replies.lock().pop_front();
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApplicationError::Internal("dropped".to_string()))),
                None => Err(ApplicationError::Internal("no reply scripted".to_string())),
            }
        }

        async fn is_healthy(&self) -> bool {
            true
        }

        fn model_name(&self) -> String {
            "scripted".to_string()
        }
    }

    fn scripted_finder(replies: Vec<oneshot::Receiver<Reply>>) -> Arc<RecipeFinder> {
        let provider = Arc::new(ScriptedProvider::new(replies));
        Arc::new(RecipeFinder::new(
            Arc::new(SuggestionService::new(provider)),
            images_ok(),
        ))
    }

    async fn wait_for_generation(finder: &RecipeFinder, generation: u64) {
        while finder.generation() < generation {
            tokio::task::yield_now().await;
        }
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest::from_raw("telur, nasi", "wajan").unwrap()
    }

    #[tokio::test]
    async fn older_response_arriving_last_is_discarded() {
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_b, rx_b) = oneshot::channel();
        let finder = scripted_finder(vec![rx_a, rx_b]);

        let a = tokio::spawn({
            let finder = finder.clone();
            async move { finder.search(&request()).await }
        });
        wait_for_generation(&finder, 1).await;

        let b = tokio::spawn({
            let finder = finder.clone();
            async move { finder.search(&request()).await }
        });
        wait_for_generation(&finder, 2).await;

        tx_b.send(Ok(vec![recipe("B")])).unwrap();
        assert_eq!(
            b.await.unwrap(),
            SearchOutcome::Applied(FinderStatus::Success(1))
        );

        tx_a.send(Ok(vec![recipe("A1"), recipe("A2")])).unwrap();
        assert_eq!(a.await.unwrap(), SearchOutcome::Stale);

        assert_eq!(titles(&finder.view()), vec!["B"]);
    }

    #[tokio::test]
    async fn older_response_cannot_replace_newer_loading_state() {
        let (tx_a, rx_a) = oneshot::channel();
        let (_tx_b, rx_b) = oneshot::channel::<Reply>();
        let finder = scripted_finder(vec![rx_a, rx_b]);

        let a = tokio::spawn({
            let finder = finder.clone();
            async move { finder.search(&request()).await }
        });
        wait_for_generation(&finder, 1).await;

        let _b = tokio::spawn({
            let finder = finder.clone();
            async move { finder.search(&request()).await }
        });
        wait_for_generation(&finder, 2).await;

        tx_a.send(Err(ApplicationError::ExternalService("late".to_string()))).unwrap();
        assert_eq!(a.await.unwrap(), SearchOutcome::Stale);
        assert_eq!(finder.view(), FinderView::Loading { skeletons: 2 });
    }

    #[tokio::test]
    async fn submit_is_rejected_while_loading() {
        let (tx, rx) = oneshot::channel();
        let finder = scripted_finder(vec![rx]);

        let first = tokio::spawn({
            let finder = finder.clone();
            async move { finder.submit(&mut valid_form()).await }
        });
        wait_for_generation(&finder, 1).await;

        assert_eq!(finder.submit(&mut valid_form()).await, SubmitOutcome::Busy);

        tx.send(Ok(Vec::new())).unwrap();
        assert_eq!(
            first.await.unwrap(),
            SubmitOutcome::Completed(SearchOutcome::Applied(FinderStatus::Empty))
        );
        assert_eq!(finder.status(), FinderStatus::Empty);
    }

    #[tokio::test]
    async fn dismiss_returns_to_idle_and_drops_cards() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| Ok(vec![recipe("A")]));
        let finder = finder_with(mock);

        finder.search(&request()).await;
        finder.dismiss();
        assert_eq!(finder.view(), FinderView::Idle);
        assert!(finder.settle_images().await.is_empty());
    }
}
