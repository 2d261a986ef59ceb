// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::{Map, Value};

/// Parse a `_fields` query value into the requested top-level field names.
/// Returns None when the parameter is absent or names nothing.
pub fn parse_fields(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;
    let fields: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| field.to_string())
        .collect();
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

/// Keep only the requested top-level keys. Unrequested fields are removed
/// entirely, never nulled. Links survive the projection.
pub fn project_fields(map: &mut Map<String, Value>, fields: &[String]) {
    map.retain(|key, _| key == "_links" || fields.iter().any(|field| field == key));
}
