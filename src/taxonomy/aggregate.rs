// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::resolver::resolve_by_slug_path;
use super::slug::normalize;
use super::store::{Category, Taxonomy};
use crate::stats::StatItem;
use serde::Serialize;
use std::collections::HashMap;

/// Filters an item window down to the items belonging to a resolved
/// category: an item matches when any of its normalized tags is a member of
/// the category's `matching_slugs`.
pub fn aggregate<'a>(items: &'a [StatItem], matching_slugs: &[String]) -> Vec<&'a StatItem> {
    items
        .iter()
        .filter(|item| item_matches(item, matching_slugs))
        .collect()
}

fn item_matches(item: &StatItem, matching_slugs: &[String]) -> bool {
    item.tags
        .iter()
        .any(|tag| matching_slugs.iter().any(|slug| *slug == normalize(tag)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryCount {
    pub name: String,
    pub slug: String,
    pub full_path: String,
    pub count: usize,
}

/// Per-subcategory item counts for a parent category page. Subcategories
/// with no matching items in the current window are dropped from the
/// result, they are hidden from navigation rather than rendered empty.
pub fn subcategory_counts(parent: &Category, items: &[StatItem]) -> Vec<SubcategoryCount> {
    parent
        .subcategories
        .iter()
        .map(|sub| SubcategoryCount {
            name: sub.name.clone(),
            slug: sub.slug.clone(),
            full_path: format!("/categories/{}/{}", parent.slug, sub.slug),
            count: aggregate(items, &sub.matching_slugs()).len(),
        })
        .filter(|entry| entry.count > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Publishers of the given items, most prolific first, capped at `limit`.
/// Ties break alphabetically so rendering is stable across requests.
pub fn top_publishers(items: &[&StatItem], limit: usize) -> Vec<NamedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        if !item.publisher.is_empty() {
            *counts.entry(item.publisher.as_str()).or_insert(0) += 1;
        }
    }
    ranked(counts, limit)
}

/// Tags co-occurring with the current category in the wider item window,
/// excluding the category's own matching slugs. Feeds the related-topics
/// widget.
///
/// Counts are keyed by the slug path the entry links to, so differently
/// cased or synonym-spelled tags of the same subcategory collapse into one
/// entry carrying its curated display name and canonical path. Tags
/// outside the taxonomy keep their flat slug and first-seen spelling.
pub fn related_categories(
    taxonomy: &Taxonomy,
    items: &[StatItem],
    matching_slugs: &[String],
    limit: usize,
) -> Vec<NamedCount> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    for item in items {
        if !item_matches(item, matching_slugs) {
            continue;
        }
        for tag in &item.tags {
            let slug = normalize(tag);
            if slug.is_empty() || matching_slugs.contains(&slug) {
                continue;
            }
            let (path, name) = match resolve_by_slug_path(taxonomy, &[slug.as_str()]) {
                Some(resolved) => {
                    let canonical = resolved.canonical_path();
                    let path = canonical
                        .strip_prefix("/categories/")
                        .map(str::to_string)
                        .unwrap_or(canonical);
                    (path, resolved.display_name().to_string())
                }
                None => (slug, tag.clone()),
            };
            let entry = counts.entry(path).or_insert_with(|| (name, 0));
            entry.1 += 1;
        }
    }

    let mut entries: Vec<NamedCount> = counts
        .into_iter()
        .map(|(slug, (name, count))| NamedCount { name, slug, count })
        .collect();
    entries.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.name.cmp(&right.name))
    });
    entries.truncate(limit);
    entries
}

/// Every tag in the window with at least `min_count` occurrences,
/// alphabetical. Backs the /categories index page.
pub fn tag_counts(items: &[StatItem], min_count: usize) -> Vec<NamedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        for tag in &item.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<NamedCount> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(name, count)| NamedCount {
            name: name.to_string(),
            slug: normalize(name),
            count,
        })
        .collect();
    entries.sort_by(|left, right| left.name.cmp(&right.name));
    entries
}

fn ranked(counts: HashMap<&str, usize>, limit: usize) -> Vec<NamedCount> {
    let mut entries: Vec<NamedCount> = counts
        .into_iter()
        .map(|(name, count)| NamedCount {
            name: name.to_string(),
            slug: normalize(name),
            count,
        })
        .collect();
    entries.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.name.cmp(&right.name))
    });
    entries.truncate(limit);
    entries
}
