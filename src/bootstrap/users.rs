// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{log_action, BootstrapError};
use crate::roles::ADMIN_ROLE;
use crate::runtime_paths::RuntimePaths;
use std::fs::OpenOptions;
use std::io::{self, Write};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_NAME: &str = "Administrator";

/// Seed users.yaml with a single administrator. The host deployment replaces
/// this file with its real user roster; Brushwork only reads it.
pub fn ensure_users(runtime_paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    let users_path = &runtime_paths.users_file;
    if users_path.exists() {
        return Ok(false);
    }

    let yaml = format!(
        "\"{email}\":\n  name: \"{name}\"\n  roles:\n    - \"{role}\"\n",
        email = ADMIN_EMAIL,
        name = ADMIN_NAME,
        role = ADMIN_ROLE
    );

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(users_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(yaml.as_bytes())?;
    file.sync_all()?;

    log_action(format!("created users.yaml with default admin {}", ADMIN_EMAIL));

    Ok(true)
}
