// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct OverrideEntry {
    slug: String,
    #[serde(default)]
    custom_description: Option<String>,
}

/// Editor-authored description overrides for category slug paths and vendor
/// slugs. Loaded once at startup; files are optional and an absent or
/// unreadable file degrades to no overrides rather than blocking startup.
#[derive(Debug, Clone, Default)]
pub struct DescriptionOverrides {
    categories: HashMap<String, String>,
    vendors: HashMap<String, String>,
}

impl DescriptionOverrides {
    pub fn load(category_path: &Path, vendor_path: &Path) -> Self {
        Self {
            categories: load_override_file(category_path),
            vendors: load_override_file(vendor_path),
        }
    }

    /// Lookup by joined slug path ("identity-access/mfa" or "ransomware").
    pub fn category_description(&self, slug_path: &str) -> Option<&str> {
        self.categories.get(slug_path).map(String::as_str)
    }

    pub fn vendor_description(&self, slug: &str) -> Option<&str> {
        self.vendors.get(slug).map(String::as_str)
    }
}

fn load_override_file(path: &Path) -> HashMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return HashMap::new(),
    };
    let entries: Vec<OverrideEntry> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring malformed override file '{}': {}", path.display(), e);
            return HashMap::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .custom_description
                .map(|description| (entry.slug, description))
        })
        .collect()
}
