// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::slug::normalize;
use super::store::{Category, Subcategory, Taxonomy};

/// Outcome of resolving a one- or two-segment category slug path against
/// the taxonomy. `matching_slugs` is the contract surface for aggregation:
/// an item belongs to the resolved category when any of its normalized
/// tags is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    Parent {
        category: &'a Category,
        matching_slugs: Vec<String>,
    },
    Child {
        parent: &'a Category,
        category: &'a Subcategory,
        matching_slugs: Vec<String>,
    },
}

impl<'a> Resolved<'a> {
    pub fn matching_slugs(&self) -> &[String] {
        match self {
            Resolved::Parent { matching_slugs, .. } => matching_slugs,
            Resolved::Child { matching_slugs, .. } => matching_slugs,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Resolved::Parent { category, .. } => &category.name,
            Resolved::Child { category, .. } => &category.name,
        }
    }

    /// The single URL this category should be indexed under.
    pub fn canonical_path(&self) -> String {
        match self {
            Resolved::Parent { category, .. } => format!("/categories/{}", category.slug),
            Resolved::Child {
                parent, category, ..
            } => format!("/categories/{}/{}", parent.slug, category.slug),
        }
    }
}

/// Resolves a slug path to its canonical category.
///
/// Segments are normalized before lookup, so raw tag text may be passed
/// directly. One segment: parent slug first, then any subcategory slug or
/// synonym anywhere in the catalog. Two segments: the parent must match
/// exactly, and the child segment is checked against subcategory slugs only;
/// synonyms never mint additional two-segment paths. Anything else is
/// `None`.
pub fn resolve_by_slug_path<'a>(taxonomy: &'a Taxonomy, path: &[&str]) -> Option<Resolved<'a>> {
    match path {
        [single] => {
            let slug = normalize(single);
            if let Some(category) = taxonomy.find_parent(&slug) {
                return Some(Resolved::Parent {
                    category,
                    matching_slugs: vec![category.slug.clone()],
                });
            }
            find_child(taxonomy, &slug)
        }
        [parent_slug, child_slug] => {
            let parent = taxonomy.find_parent(&normalize(parent_slug))?;
            let child_slug = normalize(child_slug);
            let category = parent
                .subcategories
                .iter()
                .find(|sub| sub.slug == child_slug)?;
            Some(Resolved::Child {
                parent,
                category,
                matching_slugs: category.matching_slugs(),
            })
        }
        _ => None,
    }
}

fn find_child<'a>(taxonomy: &'a Taxonomy, slug: &str) -> Option<Resolved<'a>> {
    for parent in taxonomy.categories() {
        for subcategory in &parent.subcategories {
            if subcategory.slug == slug || subcategory.synonyms.iter().any(|s| s == slug) {
                return Some(Resolved::Child {
                    parent,
                    category: subcategory,
                    matching_slugs: subcategory.matching_slugs(),
                });
            }
        }
    }
    None
}
