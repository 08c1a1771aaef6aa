// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::cache::history::{DEFAULT_HISTORY_SIZE, DEFAULT_RECENT_COUNT};
use crate::cache::ttl::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, EvictionPolicy};
use crate::error::{NutritionError, Result};
use crate::models::search_result::{DEFAULT_PAGE_SIZE, DataType};
use crate::remote::DEFAULT_BASE_URL;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "NUTRIENT_RESOLVER";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub prefer_remote_first: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub search_ttl_secs: u64,
    pub details_ttl_secs: u64,
    pub max_entries: usize,
    pub eviction: EvictionPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
    pub recent_count: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_page_size: usize,
    pub data_types: Vec<DataType>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            prefer_remote_first: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            search_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            details_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            max_entries: DEFAULT_CACHE_CAPACITY,
            eviction: EvictionPolicy::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_SIZE,
            recent_count: DEFAULT_RECENT_COUNT,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            data_types: DataType::DEFAULTS.to_vec(),
        }
    }
}

impl CacheConfig {
    pub fn search_ttl(&self) -> Duration {
        Duration::from_secs(self.search_ttl_secs)
    }

    pub fn details_ttl(&self) -> Duration {
        Duration::from_secs(self.details_ttl_secs)
    }
}

impl Config {
    /// Layered load: built-in defaults, then the TOML file, then
    /// `NUTRIENT_RESOLVER__SECTION__KEY` environment variables.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| NutritionError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| NutritionError::Config(e.to_string()))?;

        config.remote.api_key = Validator::sanitize_api_key(config.remote.api_key.take());
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.remote.base_url)
            .map_err(|_| NutritionError::Config(format!("Invalid base_url: {}", self.remote.base_url)))?;

        let capacities = [
            ("cache.search_ttl_secs", self.cache.search_ttl_secs as usize),
            ("cache.details_ttl_secs", self.cache.details_ttl_secs as usize),
            ("cache.max_entries", self.cache.max_entries),
            ("history.max_entries", self.history.max_entries),
        ];
        for (name, value) in capacities {
            Validator::validate_capacity(name, value)
                .map_err(|e| NutritionError::Config(e.to_string()))?;
        }

        Validator::validate_page_size(self.search.default_page_size).map_err(|e| {
            NutritionError::Config(format!("search.default_page_size: {}", e))
        })?;

        if self.search.data_types.is_empty() {
            return Err(NutritionError::Config(
                "search.data_types must name at least one data type".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.search_ttl_secs, 1800);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.cache.eviction, EvictionPolicy::InsertionOrder);
        assert_eq!(config.history.max_entries, 50);
        assert_eq!(config.history.recent_count, 8);
        assert_eq!(config.search.default_page_size, 25);
        assert!(config.remote.prefer_remote_first);
        assert_eq!(config.remote.api_key, None);
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let file = write_config(
            r#"
[remote]
api_key = "  demo-key  "
prefer_remote_first = false

[cache]
max_entries = 10
eviction = "access_order"

[search]
data_types = ["Branded", "SR Legacy"]
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.remote.api_key.as_deref(), Some("demo-key"));
        assert!(!config.remote.prefer_remote_first);
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache.max_entries, 10);
        assert_eq!(config.cache.eviction, EvictionPolicy::AccessOrder);
        assert_eq!(config.cache.details_ttl_secs, 1800);
        assert_eq!(
            config.search.data_types,
            vec![DataType::Branded, DataType::SrLegacy]
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(NutritionError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default_config();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.cache.search_ttl_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.search.default_page_size = 500;
        assert!(matches!(
            config.validate(),
            Err(NutritionError::Config(msg)) if msg.contains("search.default_page_size")
        ));

        let mut config = Config::default_config();
        config.search.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.remote.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let file = write_config("[history]\nmax_entries = 0\n");
        assert!(Config::load(Some(file.path())).is_err());
    }
}
