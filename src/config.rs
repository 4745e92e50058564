use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NudgeError, Result};
use crate::suggestions::RankingWeights;
use crate::suggestions::ranking::{COUNT_NORMALIZATION_FACTOR, RECENCY_HORIZON_DAYS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, nudge_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("NUDGE_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(NudgeError::MissingConfig(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(nudge_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Database file, resolved against `nudge_root` when relative.
    #[must_use]
    pub fn database_path(&self, nudge_root: &Path) -> PathBuf {
        nudge_root.join(&self.storage.database)
    }

    /// Catalog file, resolved against `nudge_root` when relative.
    #[must_use]
    pub fn catalog_path(&self, nudge_root: &Path) -> PathBuf {
        nudge_root.join(&self.catalog.path)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        // No config dir (e.g. a bare container) just means no global layer.
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("nudge/config.toml"))
    }

    fn load_project(nudge_root: &Path) -> Result<Option<ConfigPatch>> {
        let path = nudge_root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| NudgeError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| NudgeError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
        if let Some(patch) = patch.catalog {
            self.catalog.merge(patch);
        }
        if let Some(patch) = patch.ranking {
            self.ranking.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if env_bool("NUDGE_ROBOT").unwrap_or(false) {
            self.robot.format = "json".to_string();
        }

        if let Some(value) = env_string("NUDGE_DATABASE") {
            self.storage.database = PathBuf::from(value);
        }
        if let Some(value) = env_string("NUDGE_CATALOG") {
            self.catalog.path = PathBuf::from(value);
        }

        if let Some(value) = env_u32("NUDGE_RECENCY_HORIZON_DAYS")? {
            self.ranking.recency_horizon_days = value;
        }
        if let Some(value) = env_f64("NUDGE_COUNT_NORMALIZATION")? {
            self.ranking.count_normalization = value;
        }

        if let Some(value) = env_string("NUDGE_ROBOT_FORMAT") {
            self.robot.format = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

fn default_database() -> PathBuf {
    PathBuf::from("nudge.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.database {
            self.database = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog")]
    pub path: PathBuf,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.toml")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog(),
        }
    }
}

impl CatalogConfig {
    fn merge(&mut self, patch: CatalogPatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub recency_horizon_days: u32,
    pub count_normalization: f64,
    pub weights: RankingWeights,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            recency_horizon_days: RECENCY_HORIZON_DAYS,
            count_normalization: COUNT_NORMALIZATION_FACTOR,
            weights: RankingWeights::default(),
        }
    }
}

impl RankingConfig {
    fn merge(&mut self, patch: RankingPatch) {
        if let Some(value) = patch.recency_horizon_days {
            self.recency_horizon_days = value;
        }
        if let Some(value) = patch.count_normalization {
            self.count_normalization = value;
        }
        if let Some(patch) = patch.weights {
            let weights = &mut self.weights;
            let fields = [
                (patch.is_shown, &mut weights.is_shown),
                (patch.is_dismissed, &mut weights.is_dismissed),
                (patch.is_clicked, &mut weights.is_clicked),
                (patch.time_from_last_shown, &mut weights.time_from_last_shown),
                (patch.time_from_last_dismissed, &mut weights.time_from_last_dismissed),
                (patch.time_from_last_clicked, &mut weights.time_from_last_clicked),
                (patch.shown_count, &mut weights.shown_count),
                (patch.dismissed_count, &mut weights.dismissed_count),
                (patch.clicked_count, &mut weights.clicked_count),
            ];
            for (value, slot) in fields {
                if let Some(value) = value {
                    *slot = value;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub format: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub storage: Option<StoragePatch>,
    pub catalog: Option<CatalogPatch>,
    pub ranking: Option<RankingPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogPatch {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RankingPatch {
    pub recency_horizon_days: Option<u32>,
    pub count_normalization: Option<f64>,
    pub weights: Option<WeightsPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct WeightsPatch {
    pub is_shown: Option<f64>,
    pub is_dismissed: Option<f64>,
    pub is_clicked: Option<f64>,
    pub time_from_last_shown: Option<f64>,
    pub time_from_last_dismissed: Option<f64>,
    pub time_from_last_clicked: Option<f64>,
    pub shown_count: Option<f64>,
    pub dismissed_count: Option<f64>,
    pub clicked_count: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    std::env::var(key)
        .ok()
        .map(|value| parse_env_value(key, &value))
        .transpose()
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    std::env::var(key)
        .ok()
        .map(|value| parse_env_value(key, &value))
        .transpose()
}

fn parse_env_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| NudgeError::Config(format!("invalid {key} value {value}: {err}")))
}
