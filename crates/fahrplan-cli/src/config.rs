// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub schedule: ScheduleSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            schedule: ScheduleSection::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleSection {
    pub url: Option<String>,
    pub cache_path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FAHRPLAN_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FAHRPLAN_CONFIG_PATH to the config file")
        })?;
        Ok(config_root
            .join(fahrplan_schedule::APP_NAME)
            .join("config.toml"))
    }

    /// Loads the config, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;
        if config.version != CONFIG_VERSION {
            bail!(
                "config file {} has version {}, expected {CONFIG_VERSION}; \
                 update the `version` key and check the [schedule] section",
                path.display(),
                config.version
            );
        }
        Ok(config)
    }

    pub fn url(&self) -> &str {
        self.schedule
            .url
            .as_deref()
            .unwrap_or(fahrplan_schedule::DEFAULT_URL)
    }

    pub fn cache_path(&self) -> Result<PathBuf> {
        match &self.schedule.cache_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => fahrplan_schedule::Loader::default_cache_path(),
        }
    }
}
