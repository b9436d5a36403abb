//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use super::merge::deep_merge_all;
use super::types::Config;

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config (`$CWD/time-tracker/`)
    Project = 1,
    /// User-level config (`~/.time-tracker/`)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories searched for `config.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn discover() -> Self {
        Self {
            project_dir: Some(PathBuf::from("time-tracker")),
            user_dir: dirs::home_dir().map(|h| h.join(".time-tracker")),
        }
    }

    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Config,
    /// Highest file tier that contributed, if any.
    source: Option<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    /// Load from the process environment and the discovered tiers.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(ConfigPaths::discover(), explicit, |key| std::env::var(key).ok())
    }

    /// Load with explicit paths and an environment lookup.
    ///
    /// An explicit file (argument or `TIME_TRACKER_CONFIG_PATH`) replaces the
    /// file tiers; environment overrides still apply on top.
    pub fn load_with(
        paths: ConfigPaths,
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env("TIME_TRACKER_CONFIG_PATH").map(PathBuf::from));

        let (mut config, source) = match explicit {
            Some(path) => (Config::load(&path)?, Some((ConfigTier::User, path))),
            None => Self::merge_tiers(&paths)?,
        };

        Self::apply_env_overrides(&mut config, &env)?;

        Ok(Self { config, source })
    }

    fn merge_tiers(paths: &ConfigPaths) -> Result<(Config, Option<(ConfigTier, PathBuf)>)> {
        let mut configs: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut source = None;

        let tiers = [
            (ConfigTier::Project, &paths.project_dir),
            (ConfigTier::User, &paths.user_dir),
        ];
        for (tier, dir) in tiers {
            let Some(dir) = dir else { continue };
            let config_file = dir.join("config.yaml");
            if !config_file.exists() {
                continue;
            }
            let parsed = std::fs::read_to_string(&config_file)
                .map_err(anyhow::Error::from)
                .and_then(|content| Ok(serde_yaml::from_str::<Value>(&content)?));
            match parsed {
                Ok(value) => {
                    configs.push(value);
                    source = Some((tier, config_file));
                }
                Err(e) => warn!("Ignoring {} config {}: {}", tier, config_file.display(), e),
            }
        }

        let config = serde_json::from_value(deep_merge_all(configs))?;
        Ok((config, source))
    }

    fn apply_env_overrides(config: &mut Config, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = env("TIME_TRACKER_HOST") {
            config.server.host = host;
        }

        if let Some(port) = env("TIME_TRACKER_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("TIME_TRACKER_PORT={port}"))?;
        }

        if let Some(db_path) = env("TIME_TRACKER_DB_PATH") {
            config.database.path = PathBuf::from(db_path);
        }

        if let Some(migrate) = env("TIME_TRACKER_MIGRATE") {
            config.database.migrate = migrate
                .parse()
                .with_context(|| format!("TIME_TRACKER_MIGRATE={migrate}"))?;
        }

        if let Some(target) = env("TIME_TRACKER_LOG") {
            config.logging.target = target;
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Config file that won the merge, if any.
    pub fn source(&self) -> Option<(ConfigTier, &Path)> {
        self.source.as_ref().map(|(tier, path)| (*tier, path.as_path()))
    }
}
