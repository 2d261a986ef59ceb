// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

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
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7090
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
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

/// Deployment topology. A multi-tenant deployment shares one Brushwork instance
/// between sites, which disables per-site custom CSS editing affordances.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub multi_tenant: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ThemeConfig {
    #[serde(default = "default_active_theme")]
    pub active: String,
}

fn default_active_theme() -> String {
    "default".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            active: default_active_theme(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub expiration_hours: u64,
    #[serde(default = "default_jwt_cookie_name")]
    pub cookie_name: String,
}

fn default_jwt_issuer() -> String {
    "brushwork".to_string()
}

fn default_jwt_audience() -> String {
    "brushwork-users".to_string()
}

fn default_jwt_expiration_hours() -> u64 {
    12
}

fn default_jwt_cookie_name() -> String {
    "bw_auth".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_server_config")]
    pub server: ServerConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    pub auth: AuthConfig,
}

fn default_server_config() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
        workers: default_workers(),
    }
}

/// Configuration after validation. Handlers only ever see this type.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub deployment: DeploymentConfig,
    pub theme: ThemeConfig,
    pub auth: AuthConfig,
}

impl ValidatedConfig {
    pub fn is_multi_tenant(&self) -> bool {
        self.deployment.multi_tenant
    }
}

pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::LoadError(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
        ConfigError::LoadError(format!("Failed to parse '{}': {}", path.display(), e))
    })?;
    validate_config(config)
}

pub fn validate_config(config: Config) -> Result<ValidatedConfig, ConfigError> {
    if config.app.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "app.name must not be empty".to_string(),
        ));
    }
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }
    if config.server.workers == 0 {
        return Err(ConfigError::ValidationError(
            "server.workers must be at least 1".to_string(),
        ));
    }
    if config.auth.jwt.secret.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.jwt.secret must not be empty".to_string(),
        ));
    }
    if config.auth.jwt.expiration_hours == 0 {
        return Err(ConfigError::ValidationError(
            "auth.jwt.expiration_hours must be at least 1".to_string(),
        ));
    }
    if config.theme.active.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "theme.active must not be empty".to_string(),
        ));
    }

    Ok(ValidatedConfig {
        server: config.server,
        app: config.app,
        logging: config.logging,
        deployment: config.deployment,
        theme: config.theme,
        auth: config.auth,
    })
}
