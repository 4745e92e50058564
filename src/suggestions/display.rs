//! Display payload assembly.
//!
//! Rendering is someone else's job; this only collects title, summary, icon
//! and action handle from candidate metadata, applying the label/icon
//! fallbacks when metadata is missing or unresolvable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::candidate::{
    ComponentName, META_DATA_CUSTOM_VIEW, META_DATA_ICON, META_DATA_ICON_TINTABLE,
    META_DATA_SUMMARY, META_DATA_TITLE, RawCandidate, TextSource,
};

/// Resolves string resources owned by candidate packages.
pub trait ResourceResolver: Send + Sync {
    /// `None` when the package or the resource is unknown.
    fn string(&self, package: &str, resource: i64) -> Option<String>;
}

/// Resolver that knows no resources; every reference falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn string(&self, _package: &str, _resource: i64) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef {
    pub package: String,
    pub resource: i64,
}

/// User-facing payload of an eligible suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(default)]
    pub icon_tintable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_view: Option<i64>,
    /// Component launched when the suggestion is tapped.
    pub action: ComponentName,
}

pub struct DisplayBuilder {
    resources: Arc<dyn ResourceResolver>,
}

impl Default for DisplayBuilder {
    fn default() -> Self {
        Self::new(Arc::new(NoResources))
    }
}

impl DisplayBuilder {
    #[must_use]
    pub fn new(resources: Arc<dyn ResourceResolver>) -> Self {
        Self { resources }
    }

    #[must_use]
    pub fn build(&self, id: &str, raw: &RawCandidate) -> Suggestion {
        let package = raw.component.package.as_str();

        let title = self
            .resolve_text(raw, META_DATA_TITLE)
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| raw.label.clone());
        let summary = self.resolve_text(raw, META_DATA_SUMMARY);

        let icon = raw
            .meta_int(META_DATA_ICON)
            .filter(|&resource| resource != 0)
            .or((raw.icon != 0).then_some(raw.icon))
            .map(|resource| IconRef {
                package: package.to_string(),
                resource,
            });

        Suggestion {
            id: id.to_string(),
            title,
            summary,
            icon,
            icon_tintable: raw.meta_flag(META_DATA_ICON_TINTABLE),
            custom_view: raw.meta_int(META_DATA_CUSTOM_VIEW),
            action: raw.component.clone(),
        }
    }

    fn resolve_text(&self, raw: &RawCandidate, key: &str) -> Option<String> {
        match raw.meta(key)?.as_text_source()? {
            TextSource::Literal(text) => Some(text.to_string()),
            TextSource::Resource(resource) => {
                let resolved = self.resources.string(&raw.component.package, resource);
                if resolved.is_none() {
                    debug!(
                        package = %raw.component.package,
                        resource,
                        key,
                        "couldn't resolve resource, using fallback"
                    );
                }
                resolved
            }
        }
    }
}
