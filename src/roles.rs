// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::iam::User;
use std::collections::HashMap;

pub const ADMIN_ROLE: &str = "admin";
pub const DESIGNER_ROLE: &str = "designer";

/// Named permission grants checked per caller per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewGlobalStyles,
    EditGlobalStyles,
    ManageGlobalStyles,
    EditCss,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewGlobalStyles => "view-global-styles",
            Capability::EditGlobalStyles => "edit-global-styles",
            Capability::ManageGlobalStyles => "manage-global-styles",
            Capability::EditCss => "edit-css",
        }
    }
}

/// Role-to-capability policy. Handlers never consult roles directly; the policy
/// is passed in as app data so tests can substitute their own grants.
#[derive(Debug, Clone)]
pub struct CapabilityPolicy {
    grants: HashMap<String, Vec<Capability>>,
}

impl CapabilityPolicy {
    pub fn with_default_grants() -> Self {
        let mut grants = HashMap::new();
        grants.insert(
            ADMIN_ROLE.to_string(),
            vec![
                Capability::ViewGlobalStyles,
                Capability::EditGlobalStyles,
                Capability::ManageGlobalStyles,
                Capability::EditCss,
            ],
        );
        grants.insert(
            DESIGNER_ROLE.to_string(),
            vec![
                Capability::ViewGlobalStyles,
                Capability::EditGlobalStyles,
                Capability::ManageGlobalStyles,
            ],
        );
        Self { grants }
    }

    pub fn grant(&mut self, role: &str, capability: Capability) {
        let entry = self.grants.entry(role.to_string()).or_default();
        if !entry.contains(&capability) {
            entry.push(capability);
        }
    }

    pub fn role_allows(&self, role: &str, capability: Capability) -> bool {
        self.grants
            .get(role)
            .map(|caps| caps.contains(&capability))
            .unwrap_or(false)
    }

    /// Anonymous callers hold no capabilities.
    pub fn allows(&self, user: Option<&User>, capability: Capability) -> bool {
        let Some(user) = user else {
            return false;
        };
        user.roles
            .iter()
            .any(|role| self.role_allows(role, capability))
    }
}
