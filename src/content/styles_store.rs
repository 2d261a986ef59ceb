// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// User customizations on top of a theme's base styles.
    GlobalStyles,
    /// Any other stored document. Never a valid target of the styles API.
    Content,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleRecord {
    pub id: u64,
    pub kind: RecordKind,
    #[serde(default)]
    pub title: String,
    // The theme these customizations belong to; present for global_styles records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default = "empty_object")]
    pub settings: Value,
    #[serde(default = "empty_object")]
    pub styles: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl StyleRecord {
    pub fn is_global_styles(&self) -> bool {
        self.kind == RecordKind::GlobalStyles
    }

    pub fn apply(&mut self, patch: StylePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
    }
}

/// Partial update; `settings` and `styles` replace wholesale when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub styles: Option<Value>,
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "style record I/O failed: {}", err),
            StoreError::Json(err) => write!(f, "style record parse failed: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// Flat JSON-document store under `state/styles/`, one record per file.
#[derive(Debug, Clone)]
pub struct StylesStore {
    styles_dir: PathBuf,
}

impl StylesStore {
    pub fn new(styles_dir: PathBuf) -> Self {
        Self { styles_dir }
    }

    pub fn record_path(&self, id: u64) -> PathBuf {
        self.styles_dir.join(format!("{}.json", id))
    }

    pub fn load(&self, id: u64) -> Result<Option<StyleRecord>, StoreError> {
        let path = self.record_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let record: StyleRecord = serde_json::from_str(&raw)?;
        Ok(Some(record))
    }

    /// Single-record atomicity: serialize to a temp file in the same directory,
    /// then rename over the target.
    pub fn write_atomic(&self, record: &StyleRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.styles_dir)?;
        let path = self.record_path(record.id);
        let contents = serde_json::to_string_pretty(record)?;

        let mut temp_path = path.clone();
        let temp_name = match path.file_name() {
            Some(name) => format!("{}.tmp", name.to_string_lossy()),
            None => "record.tmp".to_string(),
        };
        temp_path.set_file_name(temp_name);

        fs::write(&temp_path, contents)?;
        fs::rename(temp_path, path)?;
        Ok(())
    }

    pub fn next_id(&self) -> Result<u64, StoreError> {
        Ok(self.record_ids()?.into_iter().max().unwrap_or(0) + 1)
    }

    pub fn find_global_styles_for_theme(
        &self,
        theme: &str,
    ) -> Result<Option<StyleRecord>, StoreError> {
        for id in self.record_ids()? {
            if let Some(record) = self.load(id)? {
                if record.is_global_styles() && record.theme.as_deref() == Some(theme) {
                    return Ok(Some(record));
                }
            }
        }
        Ok(None)
    }

    fn record_ids(&self) -> Result<Vec<u64>, StoreError> {
        let mut ids = Vec::new();
        let entries = match fs::read_dir(&self.styles_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(err) => return Err(StoreError::Io(err)),
        };
        for entry in entries.flatten() {
            if let Some(id) = record_id_from_path(&entry.path()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

fn record_id_from_path(path: &Path) -> Option<u64> {
    if path.extension()?.to_str()? != "json" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
