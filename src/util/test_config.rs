// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use crate::config::{
    AppConfig, AuthConfig, Config, DeploymentConfig, JwtConfig, LoggingConfig, ServerConfig,
    ThemeConfig, ValidatedConfig,
};

/// Ready-made validated config for unit tests.
pub fn test_config() -> ValidatedConfig {
    test_config_with(false)
}

pub fn test_config_with(multi_tenant: bool) -> ValidatedConfig {
    crate::config::validate_config(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7090,
            workers: 1,
        },
        app: AppConfig {
            name: "Test Site".to_string(),
            description: String::new(),
        },
        logging: LoggingConfig::default(),
        deployment: DeploymentConfig { multi_tenant },
        theme: ThemeConfig::default(),
        auth: AuthConfig {
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                issuer: "brushwork".to_string(),
                audience: "brushwork-users".to_string(),
                expiration_hours: 2,
                cookie_name: "bw_auth".to_string(),
            },
        },
    })
    .expect("test config")
}
