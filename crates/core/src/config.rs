//! Application configuration.
//!
//! Settings come from `<config dir>/boardgames/config.toml`, overridden by
//! `BOARDGAMES_*` environment variables (nested keys joined with `__`,
//! e.g. `BOARDGAMES_PRICE__STEP=50`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::filter::PriceSlider;

/// Directory under the user's config dir holding our files.
pub const CONFIG_DIR: &str = "boardgames";
/// Name of the settings file.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "BOARDGAMES";

const DEFAULT_CONFIG: &str = r##"# Board game catalog browser settings.

# Load games from a JSON file or a directory of JSON files instead of the
# builtin catalog.
# catalog_path = "/path/to/catalog.json"

# Where boardgames.log is written. Relative paths are resolved against the
# working directory.
# log_dir = "logs"

[price]
# Price slider track and step, in roubles.
min = 0
max = 5000
step = 100

[theme]
# Hex colours for the terminal palette.
# accent = "#e0a526"
# muted = "#7a7a7a"
# highlight = "#3a3a5a"
# danger = "#d04040"
"##;

/// Optional palette overrides, as `#rrggbb` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Selected buttons, headings and prices.
    pub accent: Option<String>,
    /// Secondary text.
    pub muted: Option<String>,
    /// Background of the focused row.
    pub highlight: Option<String>,
    /// Empty-state and error text.
    pub danger: Option<String>,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External catalog source; the builtin catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Directory for the log file.
    pub log_dir: PathBuf,
    /// Price slider bounds.
    pub price: PriceSlider,
    /// Palette overrides.
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_dir: PathBuf::from("logs"),
            price: PriceSlider::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from the default location plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load settings from `path` plus the environment. A missing file
    /// yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref(), environment())
    }

    fn build(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.price = config.price.normalized();
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Default settings file path.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented settings file to the default location if none exists.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write a commented settings file to `path` if none exists.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use tempfile::tempdir;

    fn no_env() -> Environment {
        environment().source(Some(Map::new()))
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::build(&dir.path().join("absent.toml"), no_env())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn default_file_round_trips_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::build(&path, no_env())?;
        assert_eq!(config, AppConfig::default());

        fs::write(&path, "log_dir = \"kept\"")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "log_dir = \"kept\"");
        Ok(())
    }

    #[test]
    fn file_values_are_applied() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r##"
catalog_path = "games.json"

[price]
max = 3000

[theme]
accent = "#ff8800"
"##,
        )?;

        let config = AppConfig::build(&path, no_env())?;
        assert_eq!(config.catalog_path, Some(PathBuf::from("games.json")));
        assert_eq!(config.price, PriceSlider { min: 0, max: 3000, step: 100 });
        assert_eq!(config.theme.accent.as_deref(), Some("#ff8800"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[price]\nstep = 100\n")?;

        let mut vars = Map::new();
        vars.insert("BOARDGAMES_PRICE__STEP".to_string(), "250".to_string());
        vars.insert("BOARDGAMES_LOG_DIR".to_string(), "/tmp/bg".to_string());
        let config = AppConfig::build(&path, environment().source(Some(vars)))?;
        assert_eq!(config.price.step, 250);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/bg"));
        Ok(())
    }

    #[test]
    fn inverted_slider_is_normalized() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[price]\nmin = 4000\nmax = 1000\nstep = 0\n")?;

        let config = AppConfig::build(&path, no_env())?;
        assert_eq!(config.price, PriceSlider { min: 1000, max: 4000, step: 1 });
        Ok(())
    }
}
