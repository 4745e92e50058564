//! External collaborators: where candidates come from and what the device has.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::candidate::RawCandidate;

/// Answers "which candidates are registered under this category tag".
pub trait CandidateSource: Send + Sync {
    fn query_by_category(&self, tag: &str) -> Result<Vec<RawCandidate>>;
}

/// Current device capabilities consulted by the eligibility checks.
pub trait DeviceState: Send + Sync {
    fn is_network_connected_or_connecting(&self) -> bool;
    fn has_feature(&self, name: &str) -> bool;
    fn has_account_type(&self, account_type: &str) -> bool;
}

/// Fixed device snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDeviceState {
    #[serde(default)]
    pub network_connected: bool,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub account_types: BTreeSet<String>,
}

impl StaticDeviceState {
    #[must_use]
    pub const fn with_network(mut self, connected: bool) -> Self {
        self.network_connected = connected;
        self
    }

    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>) -> Self {
        self.features.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_types.insert(account_type.into());
        self
    }
}

impl DeviceState for StaticDeviceState {
    fn is_network_connected_or_connecting(&self) -> bool {
        self.network_connected
    }

    fn has_feature(&self, name: &str) -> bool {
        self.features.contains(name)
    }

    fn has_account_type(&self, account_type: &str) -> bool {
        self.account_types.contains(account_type)
    }
}

/// Candidate source backed by an in-memory tag → candidates map.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidateSource {
    by_category: HashMap<String, Vec<RawCandidate>>,
}

impl StaticCandidateSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: impl Into<String>, candidate: RawCandidate) -> &mut Self {
        self.by_category.entry(tag.into()).or_default().push(candidate);
        self
    }

    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, candidate: RawCandidate) -> Self {
        self.add(tag, candidate);
        self
    }
}

impl CandidateSource for StaticCandidateSource {
    fn query_by_category(&self, tag: &str) -> Result<Vec<RawCandidate>> {
        Ok(self.by_category.get(tag).cloned().unwrap_or_default())
    }
}
