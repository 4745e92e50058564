use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::clock::ManualClock;
use crate::storage::MemoryStore;
use crate::suggestions::{
    Category, ComponentName, RawCandidate, StaticCandidateSource, StaticDeviceState, Suggestion,
    SuggestionService, default_categories,
};

/// Fixed start time for fixture clocks (2023-11-14T22:13:20Z).
pub const FIXTURE_START_MILLIS: i64 = 1_700_000_000_000;

/// A privileged candidate labelled with its class name.
#[must_use]
pub fn candidate(package: &str, class: &str) -> RawCandidate {
    RawCandidate::new(ComponentName::new(package, class))
        .with_system_app(true)
        .with_label(class)
}

/// Display payload with only an id; the title doubles as the id and the
/// action is the id split at its first `/`.
#[must_use]
pub fn bare_suggestion(id: impl Into<String>) -> Suggestion {
    let id = id.into();
    let (package, class) = id.split_once('/').unwrap_or((id.as_str(), ""));
    Suggestion {
        action: ComponentName::new(package, class),
        title: id.clone(),
        id,
        summary: None,
        icon: None,
        icon_tintable: false,
        custom_view: None,
    }
}

/// In-memory pipeline with a manual clock.
///
/// Services built from one fixture share the same store and clock, so state
/// written through one is visible to the next.
pub struct PipelineFixture {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub source: StaticCandidateSource,
    pub device: StaticDeviceState,
    pub categories: Vec<Category>,
}

impl Default for PipelineFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineFixture {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            clock: Arc::new(ManualClock::new(FIXTURE_START_MILLIS)),
            source: StaticCandidateSource::new(),
            device: StaticDeviceState::default(),
            categories: default_categories(),
        }
    }

    #[must_use]
    pub fn with_candidate(mut self, tag: &str, raw: RawCandidate) -> Self {
        self.source.add(tag, raw);
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: StaticDeviceState) -> Self {
        self.device = device;
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn service(&self) -> SuggestionService {
        SuggestionService::builder(
            Arc::new(self.source.clone()),
            Arc::new(self.device.clone()),
            self.store.clone(),
            self.store.clone(),
        )
        .with_clock(self.clock.clone())
        .with_categories(self.categories.clone())
        .build()
    }
}

/// Throwaway nudge root directory.
pub struct TempRoot {
    pub temp_dir: TempDir,
}

impl TempRoot {
    /// # Panics
    ///
    /// Panics if the temp directory can't be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.path().join("nudge.db")
    }

    /// # Panics
    ///
    /// Panics if the file can't be written.
    #[must_use]
    pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    #[must_use]
    pub fn write_catalog(&self, content: &str) -> PathBuf {
        self.write_file("catalog.toml", content)
    }

    #[must_use]
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_file("config.toml", content)
    }
}

impl Default for TempRoot {
    fn default() -> Self {
        Self::new()
    }
}
