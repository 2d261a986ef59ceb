// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpResponse};
use serde_json::json;

pub mod global_styles;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(global_styles::configure));
}

/// JSON 404 for anything outside the routable grammar. Wired as the app's
/// default service.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "code": "no_route",
        "message": "No route matches the URL and request method."
    }))
}
