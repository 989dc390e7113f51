use std::path::{Path, PathBuf};
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

use crate::domain::page::DEFAULT_LIMIT;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Settings of a single incremental list
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Page size
    pub limit: usize,
    pub debounce_ms: u64,
    /// Request the first page as soon as the store is built
    pub init_immediately: bool,
}

impl ListConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            debounce_ms: 300,
            init_immediately: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub list: ListConfig,
    /// JSON file the demo binary serves pages from
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir(), &utils::get_data_dir())
    }

    /// Layer the embedded defaults, user config files in `config_dir` and
    /// `LISTKEEPER_*` environment variables
    pub fn load_from(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(&utils::PROJECT_NAME)
                .prefix_separator("_")
                .separator("__"),
        );

        let cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.list.limit == 0 {
            return Err(ConfigError::Message(String::from(
                "list.limit must be greater than zero",
            )));
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "listkeeper-config-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_defaults_without_user_files() {
        let dir = temp_dir("defaults");
        let cfg = Config::load_from(&dir, &dir).expect("config loads");

        assert_eq!(cfg.list, ListConfig::default());
        assert_eq!(cfg.fixture, None);
        assert_eq!(cfg.list.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.config._config_dir, dir);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = temp_dir("override");
        fs::write(
            dir.join("config.json5"),
            r#"{ list: { limit: 25 }, fixture: "games.json" }"#,
        )
        .expect("write config");

        let cfg = Config::load_from(&dir, &dir).expect("config loads");

        assert_eq!(cfg.list.limit, 25);
        assert_eq!(cfg.list.debounce_ms, 300);
        assert_eq!(cfg.fixture, Some(PathBuf::from("games.json")));
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let dir = temp_dir("zero");
        fs::write(dir.join("config.toml"), "[list]\nlimit = 0\n").expect("write config");

        let err = Config::load_from(&dir, &dir).expect_err("zero limit");
        assert!(err.to_string().contains("list.limit"));
    }
}
