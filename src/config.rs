// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_app_name() -> String {
    "Cyberstats".to_string()
}

fn default_base_url() -> String {
    "https://cyberstats.io".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_address() -> IpAddr {
    "127.0.0.1".parse().expect("valid default bind address")
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StatsApiConfig {
    pub url: String,
    pub key: String,
    /// Window size for per-tag fetches backing a single category page.
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    /// Window size for full fetches backing counts, related topics, and the
    /// sitemap.
    #[serde(default = "default_window_limit")]
    pub window_limit: usize,
    /// Minimum occurrences a tag needs before it appears on the topics
    /// index page.
    #[serde(default = "default_min_tag_count")]
    pub min_tag_count: usize,
}

fn default_page_limit() -> usize {
    1000
}

fn default_window_limit() -> usize {
    10000
}

fn default_min_tag_count() -> usize {
    3
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataFilesConfig {
    #[serde(default = "default_taxonomy_path")]
    pub taxonomy: PathBuf,
    #[serde(default = "default_legacy_redirects_path")]
    pub legacy_redirects: PathBuf,
    #[serde(default = "default_category_overrides_path")]
    pub category_overrides: PathBuf,
    #[serde(default = "default_vendor_overrides_path")]
    pub vendor_overrides: PathBuf,
}

fn default_taxonomy_path() -> PathBuf {
    PathBuf::from("data/taxonomy.json")
}

fn default_legacy_redirects_path() -> PathBuf {
    PathBuf::from("data/legacy-redirects.json")
}

fn default_category_overrides_path() -> PathBuf {
    PathBuf::from("data/category-overrides.json")
}

fn default_vendor_overrides_path() -> PathBuf {
    PathBuf::from("data/vendor-overrides.json")
}

impl Default for DataFilesConfig {
    fn default() -> Self {
        Self {
            taxonomy: default_taxonomy_path(),
            legacy_redirects: default_legacy_redirects_path(),
            category_overrides: default_category_overrides_path(),
            vendor_overrides: default_vendor_overrides_path(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stats_api: StatsApiConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataFilesConfig,
}

/// Configuration that has passed startup validation. The application must
/// not start with anything less.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stats_api: StatsApiConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub data: DataFilesConfig,
}

const MIN_ADMIN_PASSWORD_LEN: usize = 8;

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails,
    /// the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;
        config.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name must not be empty".to_string(),
            ));
        }

        let base_url = self.app.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "app.base_url must start with http:// or https://, got: {}",
                self.app.base_url
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }

        if !self.stats_api.url.starts_with("http://") && !self.stats_api.url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "stats_api.url must start with http:// or https://, got: {}",
                self.stats_api.url
            )));
        }
        if self.stats_api.key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "stats_api.key must not be empty".to_string(),
            ));
        }
        if self.stats_api.page_limit == 0 || self.stats_api.window_limit == 0 {
            return Err(ConfigError::ValidationError(
                "stats_api limits must be greater than 0".to_string(),
            ));
        }

        if self.admin.password.len() < MIN_ADMIN_PASSWORD_LEN {
            return Err(ConfigError::ValidationError(format!(
                "admin.password must be at least {} characters",
                MIN_ADMIN_PASSWORD_LEN
            )));
        }

        Ok(ValidatedConfig {
            app: AppConfig {
                name: self.app.name,
                base_url,
            },
            server: self.server,
            stats_api: self.stats_api,
            admin: self.admin,
            logging: self.logging,
            data: self.data,
        })
    }
}

pub fn test_config() -> ValidatedConfig {
    Config {
        app: AppConfig {
            name: "Cyberstats".to_string(),
            base_url: "http://public.example".to_string(),
        },
        server: ServerConfig {
            bind_address: default_bind_address(),
            port: default_port(),
        },
        stats_api: StatsApiConfig {
            url: "http://stats.example/feed".to_string(),
            key: "test-key".to_string(),
            page_limit: 1000,
            window_limit: 10000,
            min_tag_count: 3,
        },
        admin: AdminConfig {
            password: "correct-horse".to_string(),
        },
        logging: LoggingConfig::default(),
        data: DataFilesConfig::default(),
    }
    .validate()
    .expect("test config valid")
}
