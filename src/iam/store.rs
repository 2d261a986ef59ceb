// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{IamError, User, YamlUsersData};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only view over users.yaml. Brushwork never mutates users; the host
/// deployment owns that file.
pub struct UserStore {
    users: HashMap<String, User>,
}

impl UserStore {
    pub fn load(path: &Path) -> Result<Self, IamError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            IamError::FileError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let yaml_users: YamlUsersData = serde_yaml::from_str(&contents).map_err(|e| {
            IamError::ParseError(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        let users = yaml_users
            .into_iter()
            .map(|(email, yaml_user)| (email.clone(), yaml_user.into_user(email)))
            .collect();

        Ok(Self { users })
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.users.get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
