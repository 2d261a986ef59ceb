// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::security;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Schema version stamped on style documents that do not declare their own.
pub const STYLE_SCHEMA_VERSION: u64 = 2;

const THEME_MANIFEST: &str = "theme.json";
const VARIATIONS_SUBDIR: &str = "styles";

// Characters that can never appear in a theme directory reference. Mirrors the
// route grammar; the registry re-checks decoded input.
const FORBIDDEN_REFERENCE_CHARS: [char; 8] = [':', '<', '>', '*', '?', '"', '|', '\\'];

#[derive(Debug)]
pub enum ThemeLookupError {
    InvalidReference(String),
    NotRegistered,
}

impl fmt::Display for ThemeLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeLookupError::InvalidReference(msg) => {
                write!(f, "invalid theme reference: {}", msg)
            }
            ThemeLookupError::NotRegistered => write!(f, "no registered theme at reference"),
        }
    }
}

impl std::error::Error for ThemeLookupError {}

#[derive(Debug)]
pub enum ThemeDataError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ThemeDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeDataError::Io(err) => write!(f, "theme style data I/O failed: {}", err),
            ThemeDataError::Json(err) => write!(f, "theme style data parse failed: {}", err),
        }
    }
}

impl std::error::Error for ThemeDataError {}

impl From<std::io::Error> for ThemeDataError {
    fn from(err: std::io::Error) -> Self {
        ThemeDataError::Io(err)
    }
}

impl From<serde_json::Error> for ThemeDataError {
    fn from(err: serde_json::Error) -> Self {
        ThemeDataError::Json(err)
    }
}

/// A resolved, registered theme. The reference string is kept exactly as the
/// caller supplied it so links can round-trip it unmodified.
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    reference: String,
    dir: PathBuf,
}

impl ThemeHandle {
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

// On-disk shape of theme.json and of each styles/*.json variation file.
#[derive(Debug, Clone, Default, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    version: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    settings: Option<Value>,
    #[serde(default)]
    styles: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStyles {
    pub settings: Value,
    pub styles: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleVariation {
    pub version: u64,
    pub title: String,
    pub settings: Value,
    pub styles: Value,
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes_dir: PathBuf,
}

impl ThemeRegistry {
    pub fn new(themes_dir: PathBuf) -> Self {
        Self { themes_dir }
    }

    /// Resolve a directory reference (`theme` or `parent/theme`) to an
    /// installed theme. A theme is registered iff its directory carries a
    /// `theme.json` manifest.
    pub fn resolve(&self, reference: &str) -> Result<ThemeHandle, ThemeLookupError> {
        let segments = validate_reference(reference)?;

        let mut dir = self.themes_dir.clone();
        for segment in &segments {
            dir.push(segment);
        }

        if !dir.is_dir() {
            return Err(ThemeLookupError::NotRegistered);
        }

        // Symlinked theme directories pointing outside the themes tree are
        // treated as not installed.
        let canonical = security::canonical_path_within(&dir, &self.themes_dir)
            .map_err(|_| ThemeLookupError::NotRegistered)?;

        if !canonical.join(THEME_MANIFEST).is_file() {
            return Err(ThemeLookupError::NotRegistered);
        }

        Ok(ThemeHandle {
            reference: reference.to_string(),
            dir: canonical,
        })
    }

    pub async fn base_styles(&self, handle: &ThemeHandle) -> Result<ThemeStyles, ThemeDataError> {
        let document = read_document(&handle.dir.join(THEME_MANIFEST)).await?;
        Ok(ThemeStyles {
            settings: document.settings.unwrap_or_else(empty_object),
            styles: document.styles.unwrap_or_else(empty_object),
        })
    }

    /// Theme-authored style presets, one per file under `styles/`, in
    /// lexicographic filename order. Each is a full document merged over the
    /// theme base; recomputed on every call.
    pub async fn variations(
        &self,
        handle: &ThemeHandle,
    ) -> Result<Vec<StyleVariation>, ThemeDataError> {
        let base = read_document(&handle.dir.join(THEME_MANIFEST)).await?;

        let variations_dir = handle.dir.join(VARIATIONS_SUBDIR);
        let mut entries = match tokio::fs::read_dir(&variations_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(ThemeDataError::Io(err)),
        };

        let mut files: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();

        let mut variations = Vec::with_capacity(files.len());
        for path in files {
            let document = read_document(&path).await?;
            let fallback_title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            variations.push(merge_variation(&base, document, fallback_title));
        }
        Ok(variations)
    }
}

fn validate_reference(reference: &str) -> Result<Vec<String>, ThemeLookupError> {
    if reference.chars().any(|ch| ch.is_control()) {
        return Err(ThemeLookupError::InvalidReference(
            "contains control characters".to_string(),
        ));
    }
    if reference
        .chars()
        .any(|ch| FORBIDDEN_REFERENCE_CHARS.contains(&ch))
    {
        return Err(ThemeLookupError::InvalidReference(
            "contains forbidden characters".to_string(),
        ));
    }

    let segments: Vec<&str> = reference.split('/').collect();
    if segments.len() > 2 {
        return Err(ThemeLookupError::InvalidReference(
            "more than one subdirectory level".to_string(),
        ));
    }
    for segment in &segments {
        if segment.trim().is_empty() {
            return Err(ThemeLookupError::InvalidReference(
                "empty path segment".to_string(),
            ));
        }
        if *segment == "." || *segment == ".." {
            return Err(ThemeLookupError::InvalidReference(
                "dot path segment".to_string(),
            ));
        }
    }

    Ok(segments.iter().map(|segment| segment.to_string()).collect())
}

async fn read_document(path: &std::path::Path) -> Result<ThemeDocument, ThemeDataError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let document: ThemeDocument = serde_json::from_str(&raw)?;
    Ok(document)
}

fn merge_variation(
    base: &ThemeDocument,
    variation: ThemeDocument,
    fallback_title: String,
) -> StyleVariation {
    let base_settings = base.settings.clone().unwrap_or_else(empty_object);
    let base_styles = base.styles.clone().unwrap_or_else(empty_object);

    let settings = match variation.settings {
        Some(overlay) => deep_merge(&base_settings, &overlay),
        None => base_settings,
    };
    let styles = match variation.styles {
        Some(overlay) => deep_merge(&base_styles, &overlay),
        None => base_styles,
    };

    StyleVariation {
        version: variation
            .version
            .or(base.version)
            .unwrap_or(STYLE_SCHEMA_VERSION),
        title: variation.title.unwrap_or(fallback_title),
        settings,
        styles,
    }
}

/// Recursive object union; the overlay wins on conflicts, scalars and arrays
/// replace wholesale.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let merged_value = match merged.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), merged_value);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
