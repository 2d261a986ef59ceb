// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::api::global_styles::error::GlobalStylesError;
use crate::api::global_styles::fields::{parse_fields, project_fields};
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::content::{StylePatch, StyleRecord};
use crate::iam::{AuthRequest, User};
use crate::roles::{Capability, CapabilityPolicy};
use crate::security::filter_custom_css;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Response-shaping mode. The edit context exposes action links the view
/// context withholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Context {
    #[default]
    View,
    Edit,
}

impl Context {
    fn parse(raw: Option<&str>) -> Result<Self, GlobalStylesError> {
        match raw {
            None | Some("view") => Ok(Context::View),
            Some("edit") => Ok(Context::Edit),
            Some(other) => Err(GlobalStylesError::InvalidParam(format!(
                "context must be 'view' or 'edit', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    #[serde(default)]
    context: Option<String>,
    #[serde(rename = "_fields", default)]
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    #[serde(rename = "_fields", default)]
    fields: Option<String>,
}

pub async fn get_item(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ItemQuery>,
    app_state: web::Data<AppState>,
    config: web::Data<ValidatedConfig>,
    policy: web::Data<CapabilityPolicy>,
) -> Result<HttpResponse> {
    let user = req.user_info();
    let authenticated = user.is_some();

    let context = match Context::parse(query.context.as_deref()) {
        Ok(context) => context,
        Err(error) => return Ok(error.to_response()),
    };

    if context == Context::Edit && !policy.allows(user.as_ref(), Capability::EditGlobalStyles) {
        return Ok(GlobalStylesError::ForbiddenContext { authenticated }.to_response());
    }
    if !policy.allows(user.as_ref(), Capability::ViewGlobalStyles) {
        return Ok(GlobalStylesError::CannotView { authenticated }.to_response());
    }

    let record = match resolve_record(&app_state, &path) {
        Ok(record) => record,
        Err(error) => return Ok(error.to_response()),
    };

    let body = prepare_record_response(
        &record,
        context,
        user.as_ref(),
        &policy,
        &config,
        parse_fields(query.fields.as_deref()).as_deref(),
    );
    Ok(HttpResponse::Ok().json(body))
}

pub async fn update_item(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    app_state: web::Data<AppState>,
    config: web::Data<ValidatedConfig>,
    policy: web::Data<CapabilityPolicy>,
) -> Result<HttpResponse> {
    let user = req.user_info();
    let authenticated = user.is_some();

    if !policy.allows(user.as_ref(), Capability::EditGlobalStyles) {
        return Ok(GlobalStylesError::CannotEdit { authenticated }.to_response());
    }

    let mut record = match resolve_record(&app_state, &path) {
        Ok(record) => record,
        Err(error) => return Ok(error.to_response()),
    };

    // Body is parsed after the permission and resolution checks so failures
    // there keep their own status codes even for bodyless requests.
    let patch: StylePatch = if body.is_empty() {
        StylePatch::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(patch) => patch,
            Err(err) => {
                return Ok(GlobalStylesError::InvalidJson(err.to_string()).to_response());
            }
        }
    };

    if let Some(styles) = &patch.styles {
        if let Some(css) = styles.get("css").and_then(Value::as_str) {
            let filtered = filter_custom_css(css);
            if filtered.contains_markup {
                log::warn!(
                    "Rejected global styles update for record {}: css contains markup",
                    record.id
                );
                return Ok(GlobalStylesError::CustomCssIllegalMarkup.to_response());
            }
        }
    }

    record.apply(patch);
    if let Err(err) = app_state.styles.write_atomic(&record) {
        log::error!("Failed to persist style record {}: {}", record.id, err);
        return Ok(GlobalStylesError::Internal.to_response());
    }
    log::info!("Updated global styles record {}", record.id);

    let body = prepare_record_response(&record, Context::Edit, user.as_ref(), &policy, &config, None);
    Ok(HttpResponse::Ok().json(body))
}

pub async fn theme_item(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ThemeQuery>,
    app_state: web::Data<AppState>,
    policy: web::Data<CapabilityPolicy>,
) -> Result<HttpResponse> {
    let user = req.user_info();
    let authenticated = user.is_some();

    if !policy.allows(user.as_ref(), Capability::ManageGlobalStyles) {
        return Ok(GlobalStylesError::CannotManageGlobalStyles { authenticated }.to_response());
    }

    let handle = match app_state.themes.resolve(&path) {
        Ok(handle) => handle,
        Err(_) => return Ok(GlobalStylesError::ThemeNotFound.to_response()),
    };

    let base = match app_state.themes.base_styles(&handle).await {
        Ok(base) => base,
        Err(err) => {
            log::error!(
                "Failed to read base styles for theme '{}': {}",
                handle.reference(),
                err
            );
            return Ok(GlobalStylesError::ThemeDataInvalid.to_response());
        }
    };

    let mut map = Map::new();
    map.insert("settings".to_string(), base.settings);
    map.insert("styles".to_string(), base.styles);
    if let Some(fields) = parse_fields(query.fields.as_deref()) {
        project_fields(&mut map, &fields);
    }
    // The self link must round-trip the reference exactly as requested.
    map.insert(
        "_links".to_string(),
        json!({
            "self": [{"href": format!("/api/global-styles/themes/{}", handle.reference())}]
        }),
    );

    Ok(HttpResponse::Ok().json(Value::Object(map)))
}

/// Theme-authored presets only; no capability gate beyond route access.
pub async fn theme_variations(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let handle = match app_state.themes.resolve(&path) {
        Ok(handle) => handle,
        Err(_) => return Ok(GlobalStylesError::ThemeNotFound.to_response()),
    };

    match app_state.themes.variations(&handle).await {
        Ok(variations) => Ok(HttpResponse::Ok().json(variations)),
        Err(err) => {
            log::error!(
                "Failed to read style variations for theme '{}': {}",
                handle.reference(),
                err
            );
            Ok(GlobalStylesError::ThemeDataInvalid.to_response())
        }
    }
}

pub async fn item_schema() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "schema": {
            "$schema": "http://json-schema.org/draft-04/schema#",
            "title": "global-styles",
            "type": "object",
            "properties": {
                "id": {
                    "description": "Record identifier, assigned at creation.",
                    "type": "integer",
                    "readonly": true
                },
                "title": {
                    "description": "Record title in raw and rendered form.",
                    "type": ["object", "string"]
                },
                "settings": {
                    "description": "Design settings customized by the user.",
                    "type": "object"
                },
                "styles": {
                    "description": "Style definitions customized by the user.",
                    "type": "object"
                }
            }
        }
    })))
}

fn resolve_record(app_state: &AppState, raw_id: &str) -> Result<StyleRecord, GlobalStylesError> {
    let id: u64 = raw_id
        .parse()
        .map_err(|_| GlobalStylesError::GlobalStylesNotFound)?;
    let record = app_state.styles.load(id).map_err(|err| {
        log::error!("Failed to load style record {}: {}", id, err);
        GlobalStylesError::Internal
    })?;
    let record = record.ok_or(GlobalStylesError::GlobalStylesNotFound)?;
    if !record.is_global_styles() {
        return Err(GlobalStylesError::GlobalStylesNotFound);
    }
    Ok(record)
}

fn prepare_record_response(
    record: &StyleRecord,
    context: Context,
    user: Option<&User>,
    policy: &CapabilityPolicy,
    config: &ValidatedConfig,
    fields: Option<&[String]>,
) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), json!(record.id));
    map.insert(
        "title".to_string(),
        json!({
            "raw": record.title,
            "rendered": render_title(&record.title)
        }),
    );
    map.insert("settings".to_string(), record.settings.clone());
    map.insert("styles".to_string(), record.styles.clone());

    if let Some(fields) = fields {
        project_fields(&mut map, fields);
    }

    let self_href = format!("/api/global-styles/{}", record.id);
    let mut links = Map::new();
    links.insert("self".to_string(), json!([{"href": self_href}]));
    // Custom CSS editing is only offered on single-tenant deployments, and
    // only to callers that may actually perform it.
    if context == Context::Edit
        && !config.is_multi_tenant()
        && policy.allows(user, Capability::EditCss)
    {
        links.insert("action-edit-css".to_string(), json!([{"href": self_href}]));
    }
    map.insert("_links".to_string(), Value::Object(links));

    Value::Object(map)
}

fn render_title(raw: &str) -> String {
    let mut rendered = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => rendered.push_str("&amp;"),
            '<' => rendered.push_str("&lt;"),
            '>' => rendered.push_str("&gt;"),
            '"' => rendered.push_str("&quot;"),
            '\'' => rendered.push_str("&#039;"),
            _ => rendered.push(ch),
        }
    }
    rendered
}
