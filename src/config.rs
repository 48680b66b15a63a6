use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use kitchenboard_mealplan::{MealPeriodKind, MealPeriodPolicy, MealWindow};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Remote catalog document. Without it the dashboard runs on the cache and
    /// the bundled catalog only.
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            cache_path: default_cache_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_cache_path() -> String {
    "data/catalog.json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "data/store.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// IANA name such as `Europe/Paris`; local time when unset.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default = "default_meal_periods")]
    pub meal_periods: String,
    /// Custom `[[planner.windows]]`, used with `meal_periods = "windows"`.
    #[serde(default)]
    pub windows: Option<Vec<MealWindow>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            timezone: None,
            meal_periods: default_meal_periods(),
            windows: None,
        }
    }
}

impl PlannerConfig {
    pub fn meal_period_policy(&self) -> Result<MealPeriodPolicy, String> {
        let kind = MealPeriodKind::from_str(&self.meal_periods).map_err(|_| {
            format!(
                "Unknown planner.meal_periods '{}', expected 'hour_bands' or 'windows'",
                self.meal_periods
            )
        })?;

        match (kind, &self.windows) {
            (MealPeriodKind::Windows, Some(windows)) => {
                MealPeriodPolicy::windows(windows.clone()).map_err(|e| e.to_string())
            }
            _ => Ok(MealPeriodPolicy::from_kind(kind)),
        }
    }
}

fn default_horizon_days() -> u32 {
    7
}

fn default_meal_periods() -> String {
    MealPeriodKind::HourBands.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (KITCHENBOARD__PLANNER__HORIZON_DAYS, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH` or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("catalog.cache_path", default_cache_path())?
            .set_default("catalog.timeout_secs", 10)?
            .set_default("storage.path", default_storage_path())?
            .set_default("planner.horizon_days", 7)?
            .set_default("planner.meal_periods", default_meal_periods())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a fresh checkout runs on defaults.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("KITCHENBOARD")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.horizon_days == 0 {
            return Err("Planner horizon_days must be at least 1".to_string());
        }
        if self.catalog.timeout_secs == 0 {
            return Err("Catalog timeout_secs must be greater than 0".to_string());
        }
        if let Some(url) = &self.catalog.remote_url {
            reqwest::Url::parse(url)
                .map_err(|e| format!("Catalog remote_url '{url}' is invalid: {e}"))?;
        }
        if let Some(tz) = &self.planner.timezone {
            if time_tz::timezones::get_by_name(tz).is_none() {
                return Err(format!("Unknown planner.timezone '{tz}'"));
            }
        }
        self.planner.meal_period_policy()?;
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown logging.format '{}', expected 'pretty' or 'json'",
                self.logging.format
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_horizon() {
        let config = Config {
            planner: PlannerConfig {
                horizon_days: 0,
                ..PlannerConfig::default()
            },
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = Config {
            catalog: CatalogConfig {
                timeout_secs: 0,
                ..CatalogConfig::default()
            },
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_meal_periods() {
        let config = Config {
            planner: PlannerConfig {
                meal_periods: "brunch_first".to_string(),
                ..PlannerConfig::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("brunch_first"));
    }

    #[test]
    fn test_validation_unknown_log_format() {
        let config = Config {
            logging: LoggingConfig {
                format: "xml".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timezone() {
        let mut config = Config::default();

        config.planner.timezone = Some("Europe/Paris".to_string());
        assert!(config.validate().is_ok());

        config.planner.timezone = Some("Mars/Olympus_Mons".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_remote_url() {
        let mut config = Config::default();
        config.catalog.remote_url = Some("not a url".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_windows_policy_from_config() {
        let planner = PlannerConfig {
            meal_periods: "windows".to_string(),
            ..PlannerConfig::default()
        };

        assert_eq!(
            planner.meal_period_policy().unwrap(),
            MealPeriodPolicy::Windows(MealPeriodPolicy::default_windows())
        );
    }

    #[test]
    fn test_custom_windows_from_config() {
        use kitchenboard_shared::MealCategory;

        let mut planner = PlannerConfig {
            meal_periods: "windows".to_string(),
            windows: Some(vec![
                MealWindow::new(MealCategory::Breakfast, 6, 9),
                MealWindow::new(MealCategory::Dinner, 18, 23),
            ]),
            ..PlannerConfig::default()
        };

        let policy = planner.meal_period_policy().unwrap();
        assert_eq!(policy.current(19), Ok(MealCategory::Dinner));
        assert_eq!(policy.current(12), Ok(MealCategory::Breakfast));

        planner.windows = Some(vec![MealWindow::new(MealCategory::Lunch, 11, 25)]);
        let err = planner.meal_period_policy().unwrap_err();
        assert!(err.contains("Lunch"), "{err}");
    }
}
