// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use std::path::{Path, PathBuf};

/// Validates that a path is within the allowed base directory after
/// canonicalization. Returns the canonical path, or an error message suitable
/// for logging (never for client output).
pub fn canonical_path_within(path: &Path, base_dir: &Path) -> Result<PathBuf, String> {
    let canonical_path = path
        .canonicalize()
        .map_err(|e| format!("Failed to canonicalize '{}': {}", path.display(), e))?;

    let canonical_base = base_dir
        .canonicalize()
        .map_err(|e| format!("Failed to canonicalize base '{}': {}", base_dir.display(), e))?;

    // strip_prefix succeeds only when canonical_path is inside canonical_base.
    match canonical_path.strip_prefix(&canonical_base) {
        Ok(_) => Ok(canonical_path),
        Err(_) => {
            warn!(
                "🚨 SECURITY: Path traversal attempt - {:?} not in {:?}",
                canonical_path, canonical_base
            );
            Err(format!(
                "Path '{}' escapes '{}'",
                canonical_path.display(),
                canonical_base.display()
            ))
        }
    }
}
