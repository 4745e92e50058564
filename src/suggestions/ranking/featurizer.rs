//! Event history → feature vector.
//!
//! For every event kind K (shown, dismissed, clicked) a suggestion gets three
//! features:
//!
//! - `is_K`: 1.0 if at least one K event was ever recorded, else 0.0.
//! - `time_from_last_K`: recency of the latest K event in `[0, 1]`. 0.0 means
//!   it just happened; it saturates at 1.0 after the recency horizon, and a
//!   kind that never happened is exactly 1.0.
//! - `K_count`: number of K events divided by the count normalization
//!   factor. Not clamped, so very frequent events exceed 1.0.
//!
//! Vectors are recomputed on every ranking pass and never persisted.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::MILLIS_PER_DAY;
use crate::error::Result;
use crate::storage::{EventKind, EventSummary, KindSummary};
use crate::suggestions::display::Suggestion;

use super::event_store::EventStore;

/// Divisor applied to raw event counts.
pub const COUNT_NORMALIZATION_FACTOR: f64 = 20.0;

/// Days after which recency saturates to 1.0.
pub const RECENCY_HORIZON_DAYS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    IsShown,
    IsDismissed,
    IsClicked,
    TimeFromLastShown,
    TimeFromLastDismissed,
    TimeFromLastClicked,
    ShownCount,
    DismissedCount,
    ClickedCount,
}

impl Feature {
    pub const ALL: [Self; 9] = [
        Self::IsShown,
        Self::IsDismissed,
        Self::IsClicked,
        Self::TimeFromLastShown,
        Self::TimeFromLastDismissed,
        Self::TimeFromLastClicked,
        Self::ShownCount,
        Self::DismissedCount,
        Self::ClickedCount,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IsShown => "is_shown",
            Self::IsDismissed => "is_dismissed",
            Self::IsClicked => "is_clicked",
            Self::TimeFromLastShown => "time_from_last_shown",
            Self::TimeFromLastDismissed => "time_from_last_dismissed",
            Self::TimeFromLastClicked => "time_from_last_clicked",
            Self::ShownCount => "shown_count",
            Self::DismissedCount => "dismissed_count",
            Self::ClickedCount => "clicked_count",
        }
    }

    const fn for_kind(kind: EventKind) -> [Self; 3] {
        match kind {
            EventKind::Shown => [Self::IsShown, Self::TimeFromLastShown, Self::ShownCount],
            EventKind::Dismissed => [
                Self::IsDismissed,
                Self::TimeFromLastDismissed,
                Self::DismissedCount,
            ],
            EventKind::Clicked => [Self::IsClicked, Self::TimeFromLastClicked, Self::ClickedCount],
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized features of one suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<Feature, f64>);

impl FeatureVector {
    /// Value of `feature`; features never set read as 0.0.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.0.get(&feature).copied().unwrap_or_default()
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.0.insert(feature, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.0.iter().map(|(feature, value)| (*feature, *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone)]
pub struct SuggestionFeaturizer {
    events: EventStore,
    horizon_millis: i64,
    count_normalization: f64,
}

impl SuggestionFeaturizer {
    #[must_use]
    pub fn new(events: EventStore) -> Self {
        Self {
            events,
            horizon_millis: i64::from(RECENCY_HORIZON_DAYS) * MILLIS_PER_DAY,
            count_normalization: COUNT_NORMALIZATION_FACTOR,
        }
    }

    /// Override the recency horizon. Zero days is bumped to one.
    #[must_use]
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_millis = i64::from(days.max(1)) * MILLIS_PER_DAY;
        self
    }

    /// Override the count divisor. Non-positive values keep the default.
    #[must_use]
    pub fn with_count_normalization(mut self, factor: f64) -> Self {
        if factor > 0.0 {
            self.count_normalization = factor;
        }
        self
    }

    /// Feature vectors for the whole batch, keyed by suggestion id.
    pub fn featurize(&self, suggestions: &[Suggestion]) -> Result<HashMap<String, FeatureVector>> {
        let mut features = HashMap::with_capacity(suggestions.len());
        for suggestion in suggestions {
            if features.contains_key(&suggestion.id) {
                continue;
            }
            features.insert(suggestion.id.clone(), self.featurize_id(&suggestion.id)?);
        }
        Ok(features)
    }

    pub fn featurize_id(&self, id: &str) -> Result<FeatureVector> {
        let summary = self.events.read_summary(id)?;
        Ok(self.vector_from_summary(&summary, self.events.now_millis()))
    }

    /// Pure feature computation over an aggregated history.
    #[must_use]
    pub fn vector_from_summary(&self, summary: &EventSummary, now_millis: i64) -> FeatureVector {
        let mut vector = FeatureVector::default();
        for kind in EventKind::ALL {
            let [is_kind, recency, count] = Feature::for_kind(kind);
            let entry = summary.kind(kind);
            vector.set(is_kind, if entry.count > 0 { 1.0 } else { 0.0 });
            vector.set(recency, self.recency(entry, now_millis));
            vector.set(count, self.normalized_count(entry));
        }
        vector
    }

    #[allow(clippy::cast_precision_loss)]
    fn recency(&self, entry: &KindSummary, now_millis: i64) -> f64 {
        let Some(last) = entry.last_millis else {
            return 1.0;
        };
        let elapsed = now_millis.saturating_sub(last).max(0);
        (elapsed as f64 / self.horizon_millis as f64).min(1.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn normalized_count(&self, entry: &KindSummary) -> f64 {
        entry.count as f64 / self.count_normalization
    }
}
