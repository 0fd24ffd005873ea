// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::resolver::{Resolved, resolve_by_slug_path};
use super::store::{Taxonomy, TaxonomyError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const CATEGORY_PREFIX: &str = "/categories/";

/// Static table of stale slug paths carried over from earlier URL schemes,
/// mapped to their current flat replacements. Distinct from synonym
/// resolution: these are one-off historical corrections and may point at
/// tags the taxonomy no longer models.
#[derive(Debug, Clone, Default)]
pub struct LegacyRedirects {
    entries: HashMap<String, String>,
}

impl LegacyRedirects {
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TaxonomyError::LoadError(format!(
                "Failed to read legacy redirect file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let entries: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            TaxonomyError::LoadError(format!(
                "Failed to parse legacy redirect file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: HashMap<String, String>) -> Result<Self, TaxonomyError> {
        for (from, to) in &entries {
            if from.trim().is_empty() || to.trim().is_empty() {
                return Err(TaxonomyError::ValidationError(format!(
                    "legacy redirect entry '{}' -> '{}' has an empty side",
                    from, to
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn target_for(&self, slug_path: &str) -> Option<&str> {
        self.entries.get(slug_path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decides whether an incoming `/categories/...` request must be answered
/// with a permanent redirect, and to where.
///
/// The legacy map always wins and its targets are emitted verbatim. After
/// that, a single segment resolving to a subcategory redirects to its
/// two-segment canonical path, keeping exactly one indexable URL per child.
/// Two-segment paths are never rewritten from taxonomy data, which is what
/// rules out loops between the two mechanisms. Callers must answer with
/// HTTP 301; consolidating link equity is the whole point.
pub fn decide_redirect(
    taxonomy: &Taxonomy,
    legacy: &LegacyRedirects,
    request_path: &str,
) -> Option<String> {
    let slug_path = request_path.strip_prefix(CATEGORY_PREFIX)?;

    // Trailing or doubled slashes must not mint extra renderable URLs, so
    // the decision runs on the same empty-filtered segments the page layer
    // resolves with.
    let segments: Vec<&str> = slug_path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return None;
    }

    if let Some(target) = legacy.target_for(&segments.join("/")) {
        return Some(format!("{}{}", CATEGORY_PREFIX, target));
    }

    if segments.len() != 1 {
        return None;
    }

    match resolve_by_slug_path(taxonomy, &segments) {
        Some(resolved @ Resolved::Child { .. }) => Some(resolved.canonical_path()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::store::fixture_taxonomy;

    fn legacy() -> LegacyRedirects {
        let mut entries = HashMap::new();
        entries.insert(
            "identity-access/multi-factor-authentication".to_string(),
            "identity-access/mfa".to_string(),
        );
        entries.insert("vulnerabilities/cve".to_string(), "cve".to_string());
        entries.insert("2fa".to_string(), "authentication".to_string());
        LegacyRedirects::from_entries(entries).expect("legacy fixture")
    }

    #[test]
    fn single_segment_child_redirects_to_canonical_path() {
        let taxonomy = fixture_taxonomy();
        let target = decide_redirect(&taxonomy, &LegacyRedirects::default(), "/categories/mfa");
        assert_eq!(target.as_deref(), Some("/categories/identity-access/mfa"));
    }

    #[test]
    fn canonical_and_parent_paths_do_not_redirect() {
        let taxonomy = fixture_taxonomy();
        let legacy = LegacyRedirects::default();
        assert!(decide_redirect(&taxonomy, &legacy, "/categories/identity-access/mfa").is_none());
        assert!(decide_redirect(&taxonomy, &legacy, "/categories/identity-access").is_none());
        assert!(decide_redirect(&taxonomy, &legacy, "/categories/not-a-real-slug").is_none());
        assert!(decide_redirect(&taxonomy, &legacy, "/categories/").is_none());
        assert!(decide_redirect(&taxonomy, &legacy, "/vendors/mfa").is_none());
    }

    #[test]
    fn legacy_map_rewrites_two_segment_paths_verbatim() {
        let taxonomy = fixture_taxonomy();
        // Target exists nowhere in the taxonomy; it is still emitted as-is.
        let target = decide_redirect(&taxonomy, &legacy(), "/categories/vulnerabilities/cve");
        assert_eq!(target.as_deref(), Some("/categories/cve"));
    }

    #[test]
    fn legacy_map_wins_over_taxonomy_resolution() {
        let taxonomy = fixture_taxonomy();
        // "2fa" is a live synonym of mfa, but the legacy entry overrides.
        let target = decide_redirect(&taxonomy, &legacy(), "/categories/2fa");
        assert_eq!(target.as_deref(), Some("/categories/authentication"));
    }

    #[test]
    fn redirect_targets_are_terminal() {
        let taxonomy = fixture_taxonomy();
        let legacy = legacy();
        for path in [
            "/categories/mfa",
            "/categories/2fa",
            "/categories/vulnerabilities/cve",
            "/categories/identity-access/multi-factor-authentication",
        ] {
            let target = decide_redirect(&taxonomy, &legacy, path)
                .unwrap_or_else(|| panic!("{} should redirect", path));
            assert!(
                decide_redirect(&taxonomy, &legacy, &target).is_none(),
                "{} chains through {}",
                path,
                target
            );
        }
    }

    #[test]
    fn empty_segments_are_ignored_when_deciding() {
        let taxonomy = fixture_taxonomy();

        for path in ["/categories/mfa/", "/categories//2fa", "/categories/2fa//"] {
            let target = decide_redirect(&taxonomy, &LegacyRedirects::default(), path);
            assert_eq!(
                target.as_deref(),
                Some("/categories/identity-access/mfa"),
                "for {}",
                path
            );
        }

        // Legacy lookups see the cleaned path too.
        let target = decide_redirect(&taxonomy, &legacy(), "/categories/vulnerabilities/cve/");
        assert_eq!(target.as_deref(), Some("/categories/cve"));
    }

    #[test]
    fn rejects_empty_legacy_entries() {
        let mut entries = HashMap::new();
        entries.insert("old-path".to_string(), " ".to_string());
        assert!(LegacyRedirects::from_entries(entries).is_err());
    }
}
