//! SQLite-backed fixture that can be "restarted" by reopening the database.

use std::sync::Arc;

use nudge::clock::ManualClock;
use nudge::storage::Database;
use nudge::suggestions::{Catalog, SuggestionService, default_categories};
use nudge::test_utils::TempRoot;
use nudge::test_utils::fixtures::FIXTURE_START_MILLIS;

pub struct E2EFixture {
    pub root: TempRoot,
    pub clock: Arc<ManualClock>,
    pub catalog: Arc<Catalog>,
}

impl E2EFixture {
    pub fn new(catalog: &str) -> Self {
        let root = TempRoot::new();
        let path = root.write_catalog(catalog);
        let catalog = Arc::new(Catalog::load(&path).unwrap());
        Self {
            root,
            clock: Arc::new(ManualClock::new(FIXTURE_START_MILLIS)),
            catalog,
        }
    }

    pub fn open_db(&self) -> Arc<Database> {
        Arc::new(Database::open(self.root.db_path()).unwrap())
    }

    /// Fresh service over a newly opened connection.
    pub fn service(&self) -> SuggestionService {
        self.service_with(self.open_db())
    }

    pub fn service_with(&self, db: Arc<Database>) -> SuggestionService {
        let categories = self
            .catalog
            .categories()
            .map_or_else(default_categories, <[_]>::to_vec);
        SuggestionService::builder(self.catalog.clone(), self.catalog.clone(), db.clone(), db)
            .with_resources(self.catalog.clone())
            .with_categories(categories)
            .with_clock(self.clock.clone())
            .build()
    }

    pub fn ids(service: &SuggestionService) -> Vec<String> {
        service
            .on_get_suggestions()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect()
    }
}
