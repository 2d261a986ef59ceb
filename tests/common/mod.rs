// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use brushwork::api;
use brushwork::app_state::AppState;
use brushwork::config::{
    AppConfig, AuthConfig, Config, DeploymentConfig, JwtConfig, LoggingConfig, ServerConfig,
    ThemeConfig, ValidatedConfig,
};
use brushwork::content::{RecordKind, StyleRecord, StylesStore};
use brushwork::iam::{JwtAuthMiddlewareFactory, User, UserServices};
use brushwork::roles::CapabilityPolicy;
use brushwork::runtime_paths::RuntimePaths;
use brushwork::util::test_fixtures::TestFixtureRoot;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const DESIGNER_EMAIL: &str = "designer@example.com";
pub const SUBSCRIBER_EMAIL: &str = "subscriber@example.com";

pub const ACTIVE_THEME: &str = "block-canvas";

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
    pub user_services: Arc<UserServices>,
    pub policy: Arc<CapabilityPolicy>,
    pub global_styles_id: u64,
    pub content_record_id: u64,
}

pub struct AuthSession {
    pub user: User,
    pub jwt_token: String,
    pub cookie: actix_web::cookie::Cookie<'static>,
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub user_services: Arc<UserServices>,
    pub policy: Arc<CapabilityPolicy>,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::new_inner(false).await
    }

    pub async fn new_multi_tenant() -> Self {
        Self::new_inner(true).await
    }

    async fn new_inner(multi_tenant: bool) -> Self {
        let fixture = TestFixtureRoot::new_unique("global-styles-suite").expect("fixture root");
        let runtime_paths = RuntimePaths::from_root(fixture.path()).expect("runtime paths");
        let config = Arc::new(build_config(multi_tenant));

        seed_users(&runtime_paths);
        seed_themes(&runtime_paths);
        let (global_styles_id, content_record_id) = seed_style_records(&runtime_paths);

        let user_services = Arc::new(
            UserServices::new(&config, &runtime_paths.users_file).expect("user services"),
        );
        let app_state = Arc::new(AppState::new(runtime_paths.clone()));
        let policy = Arc::new(CapabilityPolicy::with_default_grants());

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
            user_services,
            policy,
            global_styles_id,
            content_record_id,
        }
    }

    pub fn auth(&self, email: &str) -> AuthSession {
        let user = self.user_services.find_user(email).expect("known user");
        let token = self
            .user_services
            .jwt_service()
            .create_token(email, &user)
            .expect("jwt token");
        let cookie = self
            .user_services
            .jwt_service()
            .create_auth_cookie(&token)
            .into_owned();
        AuthSession {
            user,
            jwt_token: token,
            cookie,
        }
    }

    pub fn admin_auth(&self) -> AuthSession {
        self.auth(ADMIN_EMAIL)
    }

    pub fn designer_auth(&self) -> AuthSession {
        self.auth(DESIGNER_EMAIL)
    }

    pub fn subscriber_auth(&self) -> AuthSession {
        self.auth(SUBSCRIBER_EMAIL)
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            app_state: self.app_state.clone(),
            user_services: self.user_services.clone(),
            policy: self.policy.clone(),
        }
    }

    pub fn styles_store(&self) -> StylesStore {
        StylesStore::new(self.runtime_paths.styles_dir.clone())
    }

    /// Register an extra theme (optionally `parent/theme`) with the given
    /// manifest document.
    pub fn seed_theme(&self, reference: &str, manifest: &Value) {
        let theme_dir = self.runtime_paths.themes_dir.join(reference);
        fs::create_dir_all(&theme_dir).expect("theme dir");
        fs::write(
            theme_dir.join("theme.json"),
            serde_json::to_string_pretty(manifest).expect("manifest json"),
        )
        .expect("write manifest");
    }

    pub fn seed_variation(&self, reference: &str, file_name: &str, document: &Value) {
        let styles_dir = self.runtime_paths.themes_dir.join(reference).join("styles");
        fs::create_dir_all(&styles_dir).expect("variation dir");
        fs::write(
            styles_dir.join(file_name),
            serde_json::to_string_pretty(document).expect("variation json"),
        )
        .expect("write variation");
    }
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.app_state))
        .app_data(web::Data::from(bundle.user_services))
        .app_data(web::Data::from(bundle.policy))
        .wrap(JwtAuthMiddlewareFactory)
        .configure(api::configure)
        .default_service(web::route().to(api::not_found))
}

pub fn with_auth(
    req: actix_web::test::TestRequest,
    session: &AuthSession,
) -> actix_web::test::TestRequest {
    req.cookie(session.cookie.clone())
}

fn build_config(multi_tenant: bool) -> ValidatedConfig {
    brushwork::config::validate_config(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7091,
            workers: 1,
        },
        app: AppConfig {
            name: "Test Site".to_string(),
            description: "Integration test site".to_string(),
        },
        logging: LoggingConfig::default(),
        deployment: DeploymentConfig { multi_tenant },
        theme: ThemeConfig {
            active: ACTIVE_THEME.to_string(),
        },
        auth: AuthConfig {
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                issuer: "brushwork".to_string(),
                audience: "brushwork-users".to_string(),
                expiration_hours: 12,
                cookie_name: "bw_auth".to_string(),
            },
        },
    })
    .expect("test config")
}

fn seed_users(runtime_paths: &RuntimePaths) {
    let users_yaml = r#""admin@example.com":
  name: "Admin User"
  roles:
    - "admin"
"designer@example.com":
  name: "Design Lead"
  roles:
    - "designer"
"subscriber@example.com":
  name: "Plain Subscriber"
  roles:
    - "subscriber"
"#;
    fs::write(&runtime_paths.users_file, users_yaml).expect("users file");
}

fn seed_themes(runtime_paths: &RuntimePaths) {
    let theme_dir = runtime_paths.themes_dir.join(ACTIVE_THEME);
    fs::create_dir_all(theme_dir.join("styles")).expect("theme dirs");

    fs::write(
        theme_dir.join("theme.json"),
        serde_json::to_string_pretty(&json!({
            "version": 2,
            "settings": {},
            "styles": {}
        }))
        .expect("theme manifest"),
    )
    .expect("write theme manifest");

    fs::write(
        theme_dir.join("styles/variation.json"),
        serde_json::to_string_pretty(&block_theme_variation()).expect("variation json"),
    )
    .expect("write variation");
}

/// The single seeded variation for the active theme; tests compare against it
/// verbatim.
pub fn block_theme_variation() -> Value {
    json!({
        "version": 2,
        "title": "Block theme variation",
        "settings": {
            "color": {
                "palette": {
                    "theme": [
                        {
                            "slug": "foreground",
                            "color": "#3F67C6",
                            "name": "Foreground"
                        }
                    ]
                }
            }
        },
        "styles": {
            "blocks": {
                "core/post-title": {
                    "typography": {
                        "fontWeight": "700"
                    }
                }
            }
        }
    })
}

fn seed_style_records(runtime_paths: &RuntimePaths) -> (u64, u64) {
    let store = StylesStore::new(runtime_paths.styles_dir.clone());

    let global_styles = StyleRecord {
        id: 1,
        kind: RecordKind::GlobalStyles,
        title: "Custom Styles".to_string(),
        theme: Some(ACTIVE_THEME.to_string()),
        settings: json!({}),
        styles: json!({}),
    };
    store.write_atomic(&global_styles).expect("styles record");

    let content = StyleRecord {
        id: 2,
        kind: RecordKind::Content,
        title: "An ordinary page".to_string(),
        theme: None,
        settings: json!({}),
        styles: json!({}),
    };
    store.write_atomic(&content).expect("content record");

    (global_styles.id, content.id)
}
