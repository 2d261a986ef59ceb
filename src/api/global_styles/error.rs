// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use std::fmt;

/// Every way a global-styles request can fail. Capability failures carry
/// whether the caller was authenticated, which decides 401 vs 403.
#[derive(Debug)]
pub enum GlobalStylesError {
    CannotView { authenticated: bool },
    ForbiddenContext { authenticated: bool },
    CannotEdit { authenticated: bool },
    CannotManageGlobalStyles { authenticated: bool },
    GlobalStylesNotFound,
    ThemeNotFound,
    CustomCssIllegalMarkup,
    InvalidJson(String),
    InvalidParam(String),
    ThemeDataInvalid,
    Internal,
}

impl GlobalStylesError {
    pub fn code(&self) -> &'static str {
        match self {
            GlobalStylesError::CannotView { .. } => "cannot_view",
            GlobalStylesError::ForbiddenContext { .. } => "forbidden_context",
            GlobalStylesError::CannotEdit { .. } => "cannot_edit",
            GlobalStylesError::CannotManageGlobalStyles { .. } => "cannot_manage_global_styles",
            GlobalStylesError::GlobalStylesNotFound => "global_styles_not_found",
            GlobalStylesError::ThemeNotFound => "theme_not_found",
            GlobalStylesError::CustomCssIllegalMarkup => "custom_css_illegal_markup",
            GlobalStylesError::InvalidJson(_) => "invalid_json",
            GlobalStylesError::InvalidParam(_) => "invalid_param",
            GlobalStylesError::ThemeDataInvalid => "theme_data_invalid",
            GlobalStylesError::Internal => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GlobalStylesError::CannotView { authenticated }
            | GlobalStylesError::ForbiddenContext { authenticated }
            | GlobalStylesError::CannotEdit { authenticated }
            | GlobalStylesError::CannotManageGlobalStyles { authenticated } => {
                if *authenticated {
                    StatusCode::FORBIDDEN
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }
            GlobalStylesError::GlobalStylesNotFound | GlobalStylesError::ThemeNotFound => {
                StatusCode::NOT_FOUND
            }
            GlobalStylesError::CustomCssIllegalMarkup
            | GlobalStylesError::InvalidJson(_)
            | GlobalStylesError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            GlobalStylesError::ThemeDataInvalid | GlobalStylesError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            GlobalStylesError::CannotView { .. } => {
                "You are not allowed to view this global styles record.".to_string()
            }
            GlobalStylesError::ForbiddenContext { .. } => {
                "You are not allowed to request the edit context.".to_string()
            }
            GlobalStylesError::CannotEdit { .. } => {
                "You are not allowed to edit this global styles record.".to_string()
            }
            GlobalStylesError::CannotManageGlobalStyles { .. } => {
                "You are not allowed to read theme global styles.".to_string()
            }
            GlobalStylesError::GlobalStylesNotFound => {
                "No global styles record matches the requested id.".to_string()
            }
            GlobalStylesError::ThemeNotFound => {
                "No installed theme matches the requested directory.".to_string()
            }
            GlobalStylesError::CustomCssIllegalMarkup => {
                "Markup is not allowed in CSS.".to_string()
            }
            GlobalStylesError::InvalidJson(detail) => {
                format!("Request body is not valid JSON: {}", detail)
            }
            GlobalStylesError::InvalidParam(detail) => {
                format!("Invalid request parameter: {}", detail)
            }
            GlobalStylesError::ThemeDataInvalid => {
                "The theme's style data could not be read.".to_string()
            }
            GlobalStylesError::Internal => "An internal error occurred.".to_string(),
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ApiErrorBody {
            code: self.code(),
            message: self.message(),
        })
    }
}

impl fmt::Display for GlobalStylesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for GlobalStylesError {}

#[derive(Serialize)]
struct ApiErrorBody {
    code: &'static str,
    message: String,
}
