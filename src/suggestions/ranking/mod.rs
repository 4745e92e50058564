//! Event-history driven ranking.
//!
//! The [`EventStore`] records what the user did with each suggestion, the
//! [`SuggestionFeaturizer`] turns that history into a fixed set of
//! normalized features, and the [`SuggestionRanker`] scores and reorders a
//! batch. Scores are a deterministic function of counts and recency.

pub mod event_store;
pub mod featurizer;
pub mod ranker;

pub use event_store::EventStore;
pub use featurizer::{
    COUNT_NORMALIZATION_FACTOR, Feature, FeatureVector, RECENCY_HORIZON_DAYS, SuggestionFeaturizer,
};
pub use ranker::{RankingWeights, Scorer, SuggestionRanker, sort_by_relevance};
