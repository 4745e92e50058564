//! Relevance scoring and reordering.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::suggestions::display::Suggestion;

use super::featurizer::{Feature, FeatureVector, SuggestionFeaturizer};

/// Maps a feature vector to a scalar relevance.
pub trait Scorer: Send + Sync {
    fn score(&self, features: &FeatureVector) -> f64;
}

/// Linear scoring coefficients, one per feature.
///
/// Engagement (shown, clicked) pushes a suggestion up; dismissals and
/// staleness push it down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub is_shown: f64,
    pub is_dismissed: f64,
    pub is_clicked: f64,
    pub time_from_last_shown: f64,
    pub time_from_last_dismissed: f64,
    pub time_from_last_clicked: f64,
    pub shown_count: f64,
    pub dismissed_count: f64,
    pub clicked_count: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            is_shown: 0.2,
            is_dismissed: -1.0,
            is_clicked: 1.0,
            time_from_last_shown: -0.3,
            time_from_last_dismissed: -0.5,
            time_from_last_clicked: -0.2,
            shown_count: 0.1,
            dismissed_count: -0.2,
            clicked_count: 0.5,
        }
    }
}

impl RankingWeights {
    #[must_use]
    pub const fn weight(&self, feature: Feature) -> f64 {
        match feature {
            Feature::IsShown => self.is_shown,
            Feature::IsDismissed => self.is_dismissed,
            Feature::IsClicked => self.is_clicked,
            Feature::TimeFromLastShown => self.time_from_last_shown,
            Feature::TimeFromLastDismissed => self.time_from_last_dismissed,
            Feature::TimeFromLastClicked => self.time_from_last_clicked,
            Feature::ShownCount => self.shown_count,
            Feature::DismissedCount => self.dismissed_count,
            Feature::ClickedCount => self.clicked_count,
        }
    }
}

impl Scorer for RankingWeights {
    fn score(&self, features: &FeatureVector) -> f64 {
        features
            .iter()
            .map(|(feature, value)| self.weight(feature) * value)
            .sum()
    }
}

pub struct SuggestionRanker {
    featurizer: SuggestionFeaturizer,
    scorer: Box<dyn Scorer>,
}

impl SuggestionRanker {
    #[must_use]
    pub fn new(featurizer: SuggestionFeaturizer) -> Self {
        Self::with_scorer(featurizer, Box::new(RankingWeights::default()))
    }

    #[must_use]
    pub fn with_scorer(featurizer: SuggestionFeaturizer, scorer: Box<dyn Scorer>) -> Self {
        Self { featurizer, scorer }
    }

    #[must_use]
    pub const fn featurizer(&self) -> &SuggestionFeaturizer {
        &self.featurizer
    }

    /// Relevance per suggestion id for the batch.
    pub fn relevance(&self, suggestions: &[Suggestion]) -> Result<HashMap<String, f64>> {
        let features = self.featurizer.featurize(suggestions)?;
        Ok(features
            .into_iter()
            .map(|(id, vector)| {
                let score = self.scorer.score(&vector);
                trace!(id = %id, score, "relevance");
                (id, score)
            })
            .collect())
    }

    /// Reorder by descending relevance, keeping the incoming order on ties.
    pub fn rank_suggestions(&self, suggestions: &mut [Suggestion]) -> Result<()> {
        let relevance = self.relevance(suggestions)?;
        sort_by_relevance(suggestions, &relevance);
        Ok(())
    }
}

/// Stable descending sort by `relevance`. Ids without a score sort as 0.0.
pub fn sort_by_relevance(suggestions: &mut [Suggestion], relevance: &HashMap<String, f64>) {
    let score = |s: &Suggestion| relevance.get(&s.id).copied().unwrap_or_default();
    suggestions.sort_by(|a, b| descending(score(a), score(b)));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
