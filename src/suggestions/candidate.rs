//! Raw candidates from the candidate source and their vetted wrapper.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::display::{DisplayBuilder, Suggestion};
use super::eligibility::EligibilityChain;

// Metadata keys a candidate may declare.
pub const META_DATA_TITLE: &str = "suggestion.title";
pub const META_DATA_SUMMARY: &str = "suggestion.summary";
pub const META_DATA_ICON: &str = "suggestion.icon";
pub const META_DATA_ICON_TINTABLE: &str = "suggestion.icon_tintable";
pub const META_DATA_CUSTOM_VIEW: &str = "suggestion.custom_view";
pub const META_DATA_REQUIRE_FEATURE: &str = "suggestion.require_feature";
pub const META_DATA_REQUIRE_ACCOUNT: &str = "suggestion.require_account";
pub const META_DATA_IS_CONNECTION_REQUIRED: &str = "suggestion.is_connection_required";
/// Appear/dismiss control: comma separated day offsets, only the first is used.
pub const META_DATA_DISMISS_CONTROL: &str = "suggestion.dismiss";

/// Identity of the component a candidate launches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    #[must_use]
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Stable `package/class` form, used as the suggestion id.
    #[must_use]
    pub fn flatten(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

/// A declared metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Flag(bool),
    Int(i64),
    Text(String),
}

/// Where display text comes from: a resource in the owning package, or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource<'a> {
    Resource(i64),
    Literal(&'a str),
}

impl MetadataValue {
    #[must_use]
    pub fn as_text_source(&self) -> Option<TextSource<'_>> {
        match self {
            Self::Int(id) => Some(TextSource::Resource(*id)),
            Self::Text(text) => Some(TextSource::Literal(text)),
            Self::Flag(_) => None,
        }
    }
}

/// Candidate descriptor as returned by the candidate source. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub component: ComponentName,
    /// Whether the owning application is privileged (system installed).
    #[serde(default)]
    pub system_app: bool,
    /// Default label, used when no title is declared.
    #[serde(default)]
    pub label: String,
    /// Default icon resource; 0 means none.
    #[serde(default)]
    pub icon: i64,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl RawCandidate {
    #[must_use]
    pub fn new(component: ComponentName) -> Self {
        Self {
            component,
            system_app: false,
            label: String::new(),
            icon: 0,
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_system_app(mut self, system_app: bool) -> Self {
        self.system_app = system_app;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn with_icon(mut self, icon: i64) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: MetadataValue) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn id(&self) -> String {
        self.component.flatten()
    }

    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    #[must_use]
    pub fn meta_text(&self, key: &str) -> Option<&str> {
        match self.metadata.get(key) {
            Some(MetadataValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn meta_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Boolean metadata; absent or non-boolean values read as `false`.
    #[must_use]
    pub fn meta_flag(&self, key: &str) -> bool {
        matches!(self.metadata.get(key), Some(MetadataValue::Flag(true)))
    }
}

/// A raw candidate that has been run through the eligibility chain.
///
/// Eligible doesn't mean it will be displayed: dedup and exclusivity still
/// apply downstream.
#[derive(Debug, Clone)]
pub struct CandidateSuggestion {
    id: String,
    raw: RawCandidate,
    eligible: bool,
}

impl CandidateSuggestion {
    pub fn new(
        raw: RawCandidate,
        ignore_appear_rule: bool,
        chain: &EligibilityChain,
    ) -> Result<Self> {
        let id = raw.id();
        let eligible = chain.is_eligible(&id, &raw, ignore_appear_rule)?;
        Ok(Self { id, raw, eligible })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.eligible
    }

    #[must_use]
    pub const fn raw(&self) -> &RawCandidate {
        &self.raw
    }

    /// Display payload, or `None` when the candidate is not eligible.
    #[must_use]
    pub fn to_suggestion(&self, display: &DisplayBuilder) -> Option<Suggestion> {
        self.eligible.then(|| display.build(&self.id, &self.raw))
    }
}
