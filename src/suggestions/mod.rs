//! Suggestion pipeline.
//!
//! Candidates come from a [`CandidateSource`] per category, pass through the
//! [`EligibilityChain`], are deduplicated into one list in category order and
//! finally ranked from their event history. [`SuggestionService`] ties the
//! pieces together.

pub mod candidate;
pub mod catalog;
pub mod category;
pub mod dismiss;
pub mod display;
pub mod eligibility;
pub mod list_builder;
pub mod parser;
pub mod ranking;
pub mod service;
pub mod source;

pub use candidate::{CandidateSuggestion, ComponentName, MetadataValue, RawCandidate};
pub use catalog::{Catalog, CatalogEntry};
pub use category::{Category, default_categories};
pub use dismiss::DismissHandler;
pub use display::{DisplayBuilder, IconRef, ResourceResolver, Suggestion};
pub use eligibility::{AppearState, EligibilityChain, EligibilityCheck};
pub use list_builder::SuggestionListBuilder;
pub use parser::{Pipeline, SuggestionParser};
pub use ranking::{
    EventStore, Feature, FeatureVector, RankingWeights, Scorer, SuggestionFeaturizer, SuggestionRanker,
};
pub use service::{ServiceBuilder, SuggestionService};
pub use source::{CandidateSource, DeviceState, StaticCandidateSource, StaticDeviceState};
