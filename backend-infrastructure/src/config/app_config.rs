use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use backend_domain::RuntimeConfig;

use crate::config::validation::{validate_bind_addr, validate_log_format};

pub const CONFIG_PATH_ENV: &str = "COURT_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub seed_path: Option<String>,
    pub force_reset: bool,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_level: String,
    pub log_format: String,
    pub log_dir: Option<String>,
    /// File the values came from; `None` when running on defaults.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_dir: "./data".to_string(),
            seed_path: None,
            force_reset: false,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_dir: None,
            loaded_from: None,
        }
    }
}

impl AppConfig {
    /// Loads from `explicit`, else `COURT_CONFIG`, else `./config.toml`, with
    /// process environment overrides applied.
    pub async fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_from(&config_path(explicit), |key| env::var(key).ok()).await
    }

    pub async fn load_from<F>(file_path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", file_path.display(), err))?;
            config.loaded_from = Some(file_path.to_path_buf());
            config
        } else {
            AppConfig::default()
        };
        config.apply_overrides(lookup);
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(seed_path) = &self.seed_path {
            if seed_path.trim().is_empty() {
                self.seed_path = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.log_format = self.log_format.trim().to_lowercase();
        if self.log_level.trim().is_empty() {
            self.log_level = "info".to_string();
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        self.seed_path = self.seed_path.as_deref().map(|path| resolve_path(base, path));
        self.log_dir = self.log_dir.as_deref().map(|path| resolve_path(base, path));
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        validate_log_format(&self.log_format)?;
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            data_dir: self.data_dir.clone(),
            seed_path: self.seed_path.clone(),
            force_reset: self.force_reset,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("COURT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("PORT") {
            if let (Ok(mut addr), Ok(port)) = (
                self.bind_addr.parse::<SocketAddr>(),
                value.trim().parse::<u16>(),
            ) {
                addr.set_port(port);
                self.bind_addr = addr.to_string();
            }
        }
        if let Some(value) = lookup("COURT_DATA_DIR") {
            self.data_dir = value;
        }
        if let Some(value) = lookup("COURT_SEED_PATH") {
            self.seed_path = Some(value);
        }
        if let Some(value) = lookup("COURT_FORCE_RESET") {
            self.force_reset = value.parse().unwrap_or(self.force_reset);
        }
        if let Some(value) = lookup("COURT_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("COURT_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("COURT_LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = lookup("COURT_LOG_FORMAT") {
            self.log_format = value;
        }
        if let Some(value) = lookup("COURT_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(ToString::to_string)
        .or_else(|| env::var(CONFIG_PATH_ENV).ok())
        .unwrap_or_else(|| "./config.toml".to_string())
        .into()
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
