use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::{NudgeError, Result};
use crate::storage::Database;
use crate::suggestions::{Catalog, SuggestionService, default_categories};

pub struct AppContext {
    pub nudge_root: PathBuf,
    pub config: Config,
    pub db: Arc<Database>,
    pub catalog: Arc<Catalog>,
    pub service: SuggestionService,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let nudge_root = Self::find_nudge_root()?;
        let config = Config::load(cli.config.as_deref(), &nudge_root)?;
        let mut ctx = Self::open(nudge_root, config)?;
        ctx.robot_mode |= cli.robot;
        ctx.verbosity = cli.verbose;
        Ok(ctx)
    }

    /// Open storage and the catalog under `nudge_root` and wire up the service.
    pub fn open(nudge_root: PathBuf, config: Config) -> Result<Self> {
        let db = Arc::new(Database::open(config.database_path(&nudge_root))?);
        let catalog = Arc::new(Catalog::load(&config.catalog_path(&nudge_root))?);
        debug!(
            root = %nudge_root.display(),
            candidates = catalog.candidates.len(),
            "context ready"
        );

        let categories = catalog
            .categories()
            .map_or_else(default_categories, <[_]>::to_vec);
        let ranking = &config.ranking;
        let service = SuggestionService::builder(
            catalog.clone(),
            catalog.clone(),
            db.clone(),
            db.clone(),
        )
        .with_resources(catalog.clone())
        .with_categories(categories)
        .with_weights(ranking.weights)
        .with_recency_horizon_days(ranking.recency_horizon_days)
        .with_count_normalization(ranking.count_normalization)
        .build();

        Ok(Self {
            robot_mode: config.robot.is_json(),
            nudge_root,
            config,
            db,
            catalog,
            service,
            verbosity: 0,
        })
    }

    fn find_nudge_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("NUDGE_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".nudge") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| NudgeError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("nudge"))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TempRoot;

    const CATALOG: &str = r#"
[[candidates]]
categories = ["suggested.category.default"]
system_app = true
label = "Add email"
component = { package = "com.example.mail", class = "Setup" }
"#;

    #[test]
    fn open_wires_catalog_and_database() {
        let root = TempRoot::new();
        let _ = root.write_catalog(CATALOG);

        let ctx = AppContext::open(root.path().to_path_buf(), Config::default()).unwrap();
        assert!(root.db_path().exists());
        assert!(!ctx.robot_mode);

        let suggestions = ctx.service.on_get_suggestions().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Add email");
    }

    #[test]
    fn catalog_categories_override_defaults() {
        let root = TempRoot::new();
        let _ = root.write_catalog(
            "[[categories]]\ntag = \"only\"\n[[categories]]\ntag = \"first\"\nexclusive = true\nexclusive_expire_days = 3\n",
        );
        let ctx = AppContext::open(root.path().to_path_buf(), Config::default()).unwrap();
        let tags: Vec<_> = ctx.service.categories().iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["only", "first"]);
    }

    #[test]
    fn find_upwards_locates_marker_dir() {
        let root = TempRoot::new();
        std::fs::create_dir_all(root.path().join(".nudge")).unwrap();
        let nested = root.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_upwards(&nested, ".nudge"),
            Some(root.path().join(".nudge"))
        );
        assert_eq!(find_upwards(&nested, ".absent-marker"), None);
    }
}
