//! Candidate aggregation across ordered categories.
//!
//! One [`SuggestionParser`] runs one pass. Categories are visited in registry
//! order; an unexpired exclusive category that yields anything ends the pass
//! on the spot.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::{Clock, MILLIS_PER_DAY};
use crate::error::Result;
use crate::storage::StateStore;

use super::candidate::CandidateSuggestion;
use super::category::Category;
use super::display::{DisplayBuilder, Suggestion};
use super::eligibility::EligibilityChain;
use super::list_builder::SuggestionListBuilder;
use super::source::CandidateSource;

/// Everything a pass needs, shared across passes.
pub struct Pipeline {
    pub categories: Vec<Category>,
    pub source: Arc<dyn CandidateSource>,
    pub chain: EligibilityChain,
    pub display: DisplayBuilder,
    pub state: Arc<dyn StateStore>,
    pub clock: Arc<dyn Clock>,
}

pub struct SuggestionParser<'a> {
    pipeline: &'a Pipeline,
    /// Display payloads already built this pass, by id.
    add_cache: HashMap<String, Suggestion>,
}

impl<'a> SuggestionParser<'a> {
    #[must_use]
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self {
            pipeline,
            add_cache: HashMap::new(),
        }
    }

    /// Run the pass and return the deduplicated, category-ordered list.
    pub fn get_suggestions(mut self) -> Result<Vec<Suggestion>> {
        let mut builder = SuggestionListBuilder::new();
        let pipeline = self.pipeline;

        for category in &pipeline.categories {
            if category.exclusive && !self.is_exclusive_category_expired(category)? {
                let exclusive = self.read_suggestions(category, false)?;
                if !exclusive.is_empty() {
                    info!(
                        category = %category.tag,
                        count = exclusive.len(),
                        "exclusive category has suggestions, skipping the rest"
                    );
                    builder.add_suggestions(category, exclusive);
                    return Ok(builder.build());
                }
            }
            let suggestions = self.read_suggestions(category, true)?;
            builder.add_suggestions(category, suggestions);
        }

        Ok(builder.build())
    }

    /// Eligible suggestions registered under `category`, in source order.
    ///
    /// A failing candidate source yields nothing for this category; storage
    /// failures in the eligibility chain abort the pass.
    pub fn read_suggestions(
        &mut self,
        category: &Category,
        ignore_appear_rule: bool,
    ) -> Result<Vec<Suggestion>> {
        let raw_candidates = match self.pipeline.source.query_by_category(&category.tag) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(
                    category = %category.tag,
                    error = %err,
                    "candidate query failed, treating category as empty"
                );
                return Ok(Vec::new());
            }
        };

        let mut suggestions: Vec<Suggestion> = Vec::new();
        for raw in raw_candidates {
            let candidate = CandidateSuggestion::new(raw, ignore_appear_rule, &self.pipeline.chain)?;
            if !candidate.is_eligible() {
                continue;
            }
            let suggestion = match self.add_cache.get(candidate.id()) {
                Some(cached) => cached.clone(),
                None => {
                    let Some(built) = candidate.to_suggestion(&self.pipeline.display) else {
                        continue;
                    };
                    self.add_cache.insert(built.id.clone(), built.clone());
                    built
                }
            };
            if !suggestions.iter().any(|existing| existing.id == suggestion.id) {
                suggestions.push(suggestion);
            }
        }
        Ok(suggestions)
    }

    /// Whether the exclusivity window of `category` has passed.
    ///
    /// The category's setup time is recorded on first call whether or not
    /// the window is finite.
    pub fn is_exclusive_category_expired(&self, category: &Category) -> Result<bool> {
        let now = self.pipeline.clock.now_millis();
        let setup = self
            .pipeline
            .state
            .setup_time_or_insert(&category.setup_key(), now)?;

        let Some(window) = category.exclusive_expire_millis() else {
            return Ok(false);
        };
        let elapsed = now.saturating_sub(setup);
        debug!(
            category = %category.tag,
            elapsed_days = elapsed / MILLIS_PER_DAY,
            expire_days = category.exclusive_expire_days,
            "exclusive category age"
        );
        Ok(elapsed > window)
    }
}
