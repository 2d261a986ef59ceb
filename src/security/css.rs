// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use regex::Regex;
use std::sync::OnceLock;

static MARKUP_PATTERN: OnceLock<Regex> = OnceLock::new();

fn markup_pattern() -> &'static Regex {
    // An opening or closing tag start (`<div`, `</div`) is enough to flag the
    // input; stray `<` in selectors or comments carries no tag name and passes.
    MARKUP_PATTERN.get_or_init(|| Regex::new(r"</?\w[^>]*>?").expect("markup pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCss {
    pub css: String,
    pub contains_markup: bool,
}

/// Strip HTML-tag-shaped sequences from user-supplied CSS and report whether
/// any were present. Formatting-only differences are never reported because
/// the filter only reacts to tag-shaped input.
pub fn filter_custom_css(raw: &str) -> FilteredCss {
    let pattern = markup_pattern();
    if !pattern.is_match(raw) {
        return FilteredCss {
            css: raw.to_string(),
            contains_markup: false,
        };
    }

    FilteredCss {
        css: pattern.replace_all(raw, "").into_owned(),
        contains_markup: true,
    }
}
