// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod jwt;
pub mod middleware;
pub mod store;
pub mod types;

pub use jwt::{Claims, JwtError, JwtService};
pub use middleware::{AuthRequest, JwtAuthMiddlewareFactory};
pub use store::UserStore;
pub use types::{IamError, User, YamlUser};

use crate::config::ValidatedConfig;
use std::path::Path;

/// Authentication services handed to the middleware as one app-data unit.
pub struct UserServices {
    users: UserStore,
    jwt: JwtService,
}

impl UserServices {
    pub fn new(config: &ValidatedConfig, users_file: &Path) -> Result<Self, IamError> {
        let users = UserStore::load(users_file)?;
        let jwt = JwtService::new(config);
        Ok(Self { users, jwt })
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt
    }

    pub fn find_user(&self, email: &str) -> Option<User> {
        self.users.get(email)
    }

    /// Validate a token and resolve the user it names. A token for a user that
    /// has since been removed from users.yaml is treated as invalid.
    pub fn validate_token(&self, token: &str) -> Option<(User, Claims)> {
        let claims = self.jwt.verify_token(token).ok()?;
        let user = self.users.get(&claims.sub)?;
        Some((user, claims))
    }
}
