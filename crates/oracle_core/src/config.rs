use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::{
    catalog::PhraseCatalog,
    controller::CycleSettings,
    error::{CatalogError, ConfigError},
    reason::DEFAULT_REASON_ENDPOINT,
};

pub const DEFAULT_SETTINGS_FILE: &str = "oracle.toml";
pub const DEFAULT_FALLBACK_REASON: &str = "Because I said so. That's why.";
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub reason_endpoint: String,
    pub status_interval_ms: u64,
    pub fallback_reason: String,
    pub request_timeout_ms: Option<u64>,
    pub prompts_path: Option<PathBuf>,
    pub statuses_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reason_endpoint: DEFAULT_REASON_ENDPOINT.into(),
            status_interval_ms: DEFAULT_STATUS_INTERVAL_MS,
            fallback_reason: DEFAULT_FALLBACK_REASON.into(),
            request_timeout_ms: None,
            prompts_path: None,
            statuses_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    reason_endpoint: Option<String>,
    status_interval_ms: Option<u64>,
    fallback_reason: Option<String>,
    request_timeout_ms: Option<u64>,
    prompts_path: Option<PathBuf>,
    statuses_path: Option<PathBuf>,
}

impl Settings {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.reason_endpoint.trim()).map_err(|source| ConfigError::InvalidEndpoint {
            value: self.reason_endpoint.clone(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_reason.trim().is_empty() {
            return Err(ConfigError::BlankFallback);
        }
        self.endpoint_url()?;
        Ok(())
    }

    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            status_interval: self.status_interval(),
            fallback_reason: self.fallback_reason.clone(),
        }
    }

    pub fn load_catalog(&self) -> Result<PhraseCatalog, CatalogError> {
        PhraseCatalog::load(self.prompts_path.as_deref(), self.statuses_path.as_deref())
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.reason_endpoint {
            self.reason_endpoint = v;
        }
        if let Some(v) = file_cfg.status_interval_ms {
            self.status_interval_ms = v;
        }
        if let Some(v) = file_cfg.fallback_reason {
            self.fallback_reason = v;
        }
        if let Some(v) = file_cfg.request_timeout_ms {
            self.request_timeout_ms = Some(v);
        }
        if let Some(v) = file_cfg.prompts_path {
            self.prompts_path = Some(v);
        }
        if let Some(v) = file_cfg.statuses_path {
            self.statuses_path = Some(v);
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("ORACLE_REASON_ENDPOINT") {
            self.reason_endpoint = v;
        }
        if let Some(v) = env("APP__REASON_ENDPOINT") {
            self.reason_endpoint = v;
        }

        if let Some(v) = env("APP__STATUS_INTERVAL_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.status_interval_ms = parsed;
            }
        }

        if let Some(v) = env("APP__FALLBACK_REASON") {
            self.fallback_reason = v;
        }

        if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.request_timeout_ms = Some(parsed);
            }
        }

        if let Some(v) = env("APP__PROMPTS_PATH") {
            self.prompts_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env("APP__STATUSES_PATH") {
            self.statuses_path = Some(PathBuf::from(v));
        }
    }
}

/// Defaults, then the settings file, then environment overrides.
///
/// Without an explicit `path`, `oracle.toml` in the working directory is used if present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings_with_env(path, |name| std::env::var(name).ok())
}

pub fn load_settings_with_env(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    if required || path.exists() {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let file_cfg: FileSettings =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        settings.apply_file(file_cfg);
        tracing::debug!(path = %path.display(), "loaded settings file");
    }

    settings.apply_env(env);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
