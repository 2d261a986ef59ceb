// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::StylesStore;
use crate::runtime_paths::RuntimePaths;
use crate::themes::ThemeRegistry;

pub struct AppState {
    pub runtime_paths: RuntimePaths,
    pub styles: StylesStore,
    pub themes: ThemeRegistry,
}

impl AppState {
    pub fn new(runtime_paths: RuntimePaths) -> Self {
        let styles = StylesStore::new(runtime_paths.styles_dir.clone());
        let themes = ThemeRegistry::new(runtime_paths.themes_dir.clone());
        Self {
            runtime_paths,
            styles,
            themes,
        }
    }
}
