// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::Method;
use actix_web::web;

pub mod error;
pub mod fields;
mod handlers;

// Theme directory references allow at most one subdirectory level and never
// contain `: < > * ? " |`.
const STYLESHEET_PATTERN: &str = r#"[^/:<>*?"|]+(?:/[^/:<>*?"|]+)?"#;

// Record ids are numeric, but the route deliberately admits slashes and word
// characters so that over-nested theme paths resolve here and fail record
// lookup instead of leaking a bare routing 404.
const RECORD_ID_PATTERN: &str = r"[\w/\-]+";

pub fn configure(cfg: &mut web::ServiceConfig) {
    let variations_path = format!("/themes/{{stylesheet:{}}}/variations", STYLESHEET_PATTERN);
    let theme_path = format!("/themes/{{stylesheet:{}}}", STYLESHEET_PATTERN);
    let item_path = format!("/{{id:{}}}", RECORD_ID_PATTERN);

    cfg.service(
        web::scope("/global-styles")
            .route(&variations_path, web::get().to(handlers::theme_variations))
            .route(&theme_path, web::get().to(handlers::theme_item))
            .route(&item_path, web::get().to(handlers::get_item))
            .route(&item_path, web::put().to(handlers::update_item))
            .route(&item_path, web::patch().to(handlers::update_item))
            .route(
                &item_path,
                web::method(Method::OPTIONS).to(handlers::item_schema),
            ),
    );
}
