// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::slug::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum TaxonomyError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxonomyError::LoadError(msg) => write!(f, "Taxonomy load error: {}", msg),
            TaxonomyError::ValidationError(msg) => {
                write!(f, "Taxonomy validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TaxonomyError {}

/// A curated top-level topic. The slug is authored once alongside the data,
/// not derived per-request from `name`, so free-text tag capitalization can
/// never shift a category's URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subcategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    categories: Vec<Category>,
}

/// Read-only two-level category catalog. Built once at startup and passed
/// by reference into the resolver and page layer; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TaxonomyError::LoadError(format!(
                "Failed to read taxonomy file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let parsed: TaxonomyFile = serde_json::from_str(&content).map_err(|e| {
            TaxonomyError::LoadError(format!(
                "Failed to parse taxonomy file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_categories(parsed.categories)
    }

    /// Validates and indexes the catalog. Every parent slug, subcategory
    /// slug, and synonym must be unique across the whole taxonomy; a
    /// collision would make resolution depend on iteration order, so it is
    /// rejected here instead of tolerated at lookup time.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, TaxonomyError> {
        let mut seen: HashMap<String, String> = HashMap::new();

        let mut claim = |slug: &str, owner: String| -> Result<(), TaxonomyError> {
            if slug.is_empty() {
                return Err(TaxonomyError::ValidationError(format!(
                    "{} has an empty slug",
                    owner
                )));
            }
            if normalize(slug) != slug {
                return Err(TaxonomyError::ValidationError(format!(
                    "{} carries non-normalized slug '{}' (expected '{}')",
                    owner,
                    slug,
                    normalize(slug)
                )));
            }
            if let Some(previous) = seen.insert(slug.to_string(), owner.clone()) {
                return Err(TaxonomyError::ValidationError(format!(
                    "slug '{}' claimed by both {} and {}",
                    slug, previous, owner
                )));
            }
            Ok(())
        };

        for category in &categories {
            claim(&category.slug, format!("category '{}'", category.name))?;
            for subcategory in &category.subcategories {
                claim(
                    &subcategory.slug,
                    format!(
                        "subcategory '{}' of '{}'",
                        subcategory.name, category.name
                    ),
                )?;
                for synonym in &subcategory.synonyms {
                    claim(
                        synonym,
                        format!(
                            "synonym of subcategory '{}' of '{}'",
                            subcategory.name, category.name
                        ),
                    )?;
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find_parent(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

impl Subcategory {
    /// The full set of normalized tag slugs that identify this subcategory:
    /// its own canonical slug followed by every synonym. Aggregation and
    /// synonym resolution both consume this set.
    pub fn matching_slugs(&self) -> Vec<String> {
        let mut slugs = Vec::with_capacity(1 + self.synonyms.len());
        slugs.push(self.slug.clone());
        slugs.extend(self.synonyms.iter().cloned());
        slugs
    }
}

#[cfg(test)]
pub(crate) fn fixture_taxonomy() -> Taxonomy {
    let raw = serde_json::json!({
        "categories": [
            {
                "name": "Identity & Access",
                "slug": "identity-access",
                "subcategories": [
                    {
                        "name": "Multi-Factor Authentication",
                        "slug": "mfa",
                        "synonyms": ["multi-factor-authentication", "2fa"]
                    },
                    { "name": "Password Security", "slug": "password-security" }
                ]
            },
            {
                "name": "Threats",
                "slug": "threats",
                "subcategories": [
                    { "name": "Ransomware", "slug": "ransomware" },
                    { "name": "Phishing", "slug": "phishing", "synonyms": ["spear-phishing"] }
                ]
            }
        ]
    });
    let file: TaxonomyFile = serde_json::from_value(raw).expect("fixture parse");
    Taxonomy::from_categories(file.categories).expect("fixture taxonomy")
}
