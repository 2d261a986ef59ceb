// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{log_action, BootstrapError};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use uuid::Uuid;

pub fn ensure_config(root: &Path) -> Result<bool, BootstrapError> {
    if !root.exists() {
        fs::create_dir_all(root)?;
    }
    let config_path = root.join("config.yaml");

    if config_path.exists() {
        return Ok(false);
    }

    let jwt_secret = generate_jwt_secret();
    let contents = default_config_yaml(&jwt_secret);

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&config_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    log_action("created config.yaml with a generated JWT secret");

    Ok(true)
}

fn generate_jwt_secret() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

fn default_config_yaml(jwt_secret: &str) -> String {
    format!(
        r#"app:
  name: Brushwork
  description: Global styles service

server:
  host: 127.0.0.1
  port: 7090
  workers: 4

logging:
  level: info

deployment:
  multi_tenant: false

theme:
  active: default

auth:
  jwt:
    secret: "{jwt_secret}"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn generated_config_validates() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-config").expect("fixture");
        assert!(ensure_config(fixture.path()).expect("ensure"));

        let validated =
            crate::config::load_config(&fixture.path().join("config.yaml")).expect("load");
        assert_eq!(validated.app.name, "Brushwork");
        assert_eq!(validated.theme.active, "default");
        assert!(validated.auth.jwt.secret.len() >= 32);
    }

    #[test]
    fn existing_config_is_left_alone() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-config-existing").expect("fixture");
        std::fs::write(fixture.path().join("config.yaml"), "custom: true\n").expect("write");
        assert!(!ensure_config(fixture.path()).expect("ensure"));
        let contents =
            std::fs::read_to_string(fixture.path().join("config.yaml")).expect("read back");
        assert_eq!(contents, "custom: true\n");
    }
}
