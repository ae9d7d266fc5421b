// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use anyhow::{Context, Result, bail};
use log::{LevelFilter, debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/beepf/console.yaml";
pub const DEFAULT_API_URL: &str = "http://beepf-server:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_CONFIG: &str = "BEEPF_CONFIG";
const ENV_API_URL: &str = "BEEPF_API_URL";
const ENV_TIMEOUT: &str = "BEEPF_TIMEOUT_SECS";
const ENV_LOG_LEVEL: &str = "BEEPF_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the BeePF backend; `/api/...` paths are appended to it.
    pub api_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn log_level(&self) -> LevelFilter {
        beepf_log::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("api_url must be an http(s) URL, got {:?}", self.api_url);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if beepf_log::parse_level(&self.log_level).is_none() {
            bail!("unknown log_level {:?}", self.log_level);
        }
        Ok(())
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub log_level: Option<String>,
}

/// Build the effective configuration: defaults, then the YAML file, then
/// `BEEPF_*` environment variables, then command-line overrides.
///
/// The config file is optional unless its path was given explicitly (flag or
/// `BEEPF_CONFIG`).
pub fn load(overrides: &Overrides) -> Result<Config> {
    let explicit = overrides
        .config_path
        .clone()
        .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));

    let mut config = match explicit {
        Some(path) => parse_file(&path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                parse_file(path)?
            } else {
                warn!(
                    "config file not found at {}, using defaults",
                    path.display()
                );
                Config::default()
            }
        }
    };

    apply_env(&mut config)?;

    if let Some(url) = &overrides.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(level) = &overrides.log_level {
        config.log_level.clone_from(level);
    }

    config.api_url = config.api_url.trim_end_matches('/').to_string();
    config.validate()?;
    debug!("effective config: {config:?}");
    Ok(config)
}

fn parse_file(path: &Path) -> Result<Config> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn apply_env(config: &mut Config) -> Result<()> {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        config.api_url = url;
    }
    if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
        config.timeout_secs = timeout
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TIMEOUT}={timeout:?} is not a number of seconds"))?;
    }
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        config.log_level = level;
    }
    Ok(())
}
