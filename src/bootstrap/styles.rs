// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{log_action, BootstrapError};
use crate::content::{RecordKind, StyleRecord, StylesStore};
use serde_json::Value;

const DEFAULT_RECORD_TITLE: &str = "Custom Styles";

/// The API never creates records; theme activation does, here. Keeps the
/// one-record-per-theme invariant by checking before creating.
pub fn ensure_global_styles_record(
    store: &StylesStore,
    active_theme: &str,
) -> Result<Option<u64>, BootstrapError> {
    if store.find_global_styles_for_theme(active_theme)?.is_some() {
        return Ok(None);
    }

    let record = StyleRecord {
        id: store.next_id()?,
        kind: RecordKind::GlobalStyles,
        title: DEFAULT_RECORD_TITLE.to_string(),
        theme: Some(active_theme.to_string()),
        settings: Value::Object(serde_json::Map::new()),
        styles: Value::Object(serde_json::Map::new()),
    };
    store.write_atomic(&record)?;

    log_action(format!(
        "created global styles record {} for theme '{}'",
        record.id, active_theme
    ));

    Ok(Some(record.id))
}
