//! Entry points of the suggestion pipeline.
//!
//! Read path: aggregate across categories, then rank. Write paths: user
//! actions update the dismissed flag and append to the event log. Every entry
//! point takes `&self` and may be called from several threads at once.

use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::{EventKind, EventLog, EventRecord, EventSummary, StateStore};

use super::category::{Category, default_categories};
use super::dismiss::DismissHandler;
use super::display::{DisplayBuilder, NoResources, ResourceResolver, Suggestion};
use super::eligibility::{DismissedChecker, EligibilityChain};
use super::parser::{Pipeline, SuggestionParser};
use super::ranking::{
    COUNT_NORMALIZATION_FACTOR, EventStore, FeatureVector, RECENCY_HORIZON_DAYS, RankingWeights,
    SuggestionFeaturizer, SuggestionRanker,
};
use super::source::{CandidateSource, DeviceState};

pub struct SuggestionService {
    pipeline: Pipeline,
    dismiss: DismissHandler,
    events: EventStore,
    ranker: SuggestionRanker,
}

impl SuggestionService {
    /// Start building a service over the given collaborators.
    ///
    /// Defaults: system clock, built-in categories, no resources, default
    /// ranking weights.
    #[must_use]
    pub fn builder(
        source: Arc<dyn CandidateSource>,
        device: Arc<dyn DeviceState>,
        state: Arc<dyn StateStore>,
        events: Arc<dyn EventLog>,
    ) -> ServiceBuilder {
        ServiceBuilder {
            source,
            device,
            state,
            events,
            resources: Arc::new(NoResources),
            clock: Arc::new(SystemClock),
            categories: default_categories(),
            weights: RankingWeights::default(),
            recency_horizon_days: RECENCY_HORIZON_DAYS,
            count_normalization: COUNT_NORMALIZATION_FACTOR,
        }
    }

    /// Eligible suggestions, deduplicated and ordered by relevance.
    pub fn on_get_suggestions(&self) -> Result<Vec<Suggestion>> {
        let mut suggestions = SuggestionParser::new(&self.pipeline).get_suggestions()?;
        self.ranker.rank_suggestions(&mut suggestions)?;
        info!(count = suggestions.len(), "suggestions ready");
        Ok(suggestions)
    }

    /// Hide `id` and record the dismissal.
    pub fn on_suggestion_dismissed(&self, id: &str) -> Result<()> {
        debug!(id, "dismissed by user");
        self.dismiss.mark_dismissed(id)?;
        self.events.write_event(id, EventKind::Dismissed)
    }

    pub fn on_suggestion_launched(&self, id: &str) -> Result<()> {
        debug!(id, "launched");
        self.events.write_event(id, EventKind::Clicked)
    }

    pub fn on_suggestions_shown<'s, I>(&self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = &'s str>,
    {
        for id in ids {
            self.events.write_event(id, EventKind::Shown)?;
        }
        Ok(())
    }

    pub fn event_history(&self, id: &str) -> Result<Vec<EventRecord>> {
        self.events.read_history(id)
    }

    pub fn event_summary(&self, id: &str) -> Result<EventSummary> {
        self.events.read_summary(id)
    }

    /// Current feature vector for `id`.
    pub fn features(&self, id: &str) -> Result<FeatureVector> {
        self.ranker.featurizer().featurize_id(id)
    }

    pub fn is_dismissed(&self, id: &str) -> Result<bool> {
        self.dismiss.is_dismissed(id)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.pipeline.categories
    }
}

pub struct ServiceBuilder {
    source: Arc<dyn CandidateSource>,
    device: Arc<dyn DeviceState>,
    state: Arc<dyn StateStore>,
    events: Arc<dyn EventLog>,
    resources: Arc<dyn ResourceResolver>,
    clock: Arc<dyn Clock>,
    categories: Vec<Category>,
    weights: RankingWeights,
    recency_horizon_days: u32,
    count_normalization: f64,
}

impl ServiceBuilder {
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Arc<dyn ResourceResolver>) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub const fn with_recency_horizon_days(mut self, days: u32) -> Self {
        self.recency_horizon_days = days;
        self
    }

    #[must_use]
    pub const fn with_count_normalization(mut self, factor: f64) -> Self {
        self.count_normalization = factor;
        self
    }

    #[must_use]
    pub fn build(self) -> SuggestionService {
        let dismissed = DismissedChecker::new(Arc::clone(&self.state), Arc::clone(&self.clock));
        let events = EventStore::new(self.events, Arc::clone(&self.clock));
        let featurizer = SuggestionFeaturizer::new(events.clone())
            .with_horizon_days(self.recency_horizon_days)
            .with_count_normalization(self.count_normalization);

        SuggestionService {
            dismiss: DismissHandler::new(Arc::clone(&self.state)),
            pipeline: Pipeline {
                categories: self.categories,
                source: self.source,
                chain: EligibilityChain::standard(self.device, dismissed),
                display: DisplayBuilder::new(self.resources),
                state: self.state,
                clock: self.clock,
            },
            ranker: SuggestionRanker::with_scorer(featurizer, Box::new(self.weights)),
            events,
        }
    }
}
