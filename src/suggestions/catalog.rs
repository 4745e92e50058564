//! TOML candidate catalog.
//!
//! Stands in for the platform's candidate registry when running the CLI:
//! one file declares the candidates per category, the device snapshot the
//! eligibility checks consult, and the string resources titles may point at.
//!
//! ```toml
//! [device]
//! network_connected = true
//! features = ["fingerprint"]
//!
//! [[candidates]]
//! categories = ["suggested.category.default"]
//! system_app = true
//! label = "Set up fingerprint"
//! component = { package = "com.example.setup", class = "Fingerprint" }
//! metadata = { "suggestion.require_feature" = "fingerprint", "suggestion.title" = 1 }
//!
//! [resources."com.example.setup"]
//! 1 = "Unlock with your fingerprint"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NudgeError, Result};

use super::candidate::RawCandidate;
use super::category::Category;
use super::display::ResourceResolver;
use super::source::{CandidateSource, DeviceState, StaticDeviceState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Overrides the default category registry when non-empty.
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub candidates: Vec<CatalogEntry>,
    #[serde(default)]
    pub device: StaticDeviceState,
    /// package → resource id → string.
    #[serde(default)]
    pub resources: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub candidate: RawCandidate,
}

impl Catalog {
    /// Load a catalog; a missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no catalog file");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|err| NudgeError::Catalog(format!("read catalog {}: {err}", path.display())))?;
        Self::parse(&raw)
            .map_err(|err| NudgeError::Catalog(format!("parse catalog {}: {err}", path.display())))
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Whether any declared candidate has this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.candidates.iter().any(|entry| entry.candidate.id() == id)
    }

    /// Category override, if the catalog declares one.
    #[must_use]
    pub fn categories(&self) -> Option<&[Category]> {
        (!self.categories.is_empty()).then_some(self.categories.as_slice())
    }
}

impl CandidateSource for Catalog {
    fn query_by_category(&self, tag: &str) -> Result<Vec<RawCandidate>> {
        Ok(self
            .candidates
            .iter()
            .filter(|entry| entry.categories.iter().any(|c| c == tag))
            .map(|entry| entry.candidate.clone())
            .collect())
    }
}

impl DeviceState for Catalog {
    fn is_network_connected_or_connecting(&self) -> bool {
        self.device.is_network_connected_or_connecting()
    }

    fn has_feature(&self, name: &str) -> bool {
        self.device.has_feature(name)
    }

    fn has_account_type(&self, account_type: &str) -> bool {
        self.device.has_account_type(account_type)
    }
}

impl ResourceResolver for Catalog {
    fn string(&self, package: &str, resource: i64) -> Option<String> {
        self.resources
            .get(package)?
            .get(&resource.to_string())
            .cloned()
    }
}
