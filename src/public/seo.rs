// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::stats::{StatItem, StatsQuery};
use crate::taxonomy::{normalize, resolve_by_slug_path};
use actix_web::{HttpResponse, Result, web};
use chrono::{DateTime, Utc};
use log::error;
use std::collections::HashMap;
use std::fmt::Write;

pub async fn robots_txt(config: web::Data<ValidatedConfig>) -> Result<HttpResponse> {
    let mut body = String::new();
    body.push_str("User-agent: *\n");
    body.push_str("Disallow: /admin/\n");
    body.push_str("Disallow: /api/\n");
    body.push_str("Allow: /\n\n");
    let _ = writeln!(body, "Sitemap: {}/sitemap.xml", config.app.base_url);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

/// Category and vendor URLs derived from the live item window, lastmod
/// taken from the newest matching item. Stale taxonomy entries with no
/// items never show up here; only URLs that render content get indexed.
pub async fn sitemap_xml(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let query = StatsQuery::window(config.stats_api.window_limit);
    let window = match app_state.stats.fetch(&query).await {
        Ok(items) => items,
        Err(e) => {
            error!("Stats fetch failed for sitemap: {}", e);
            return Ok(HttpResponse::ServiceUnavailable()
                .content_type("text/plain; charset=utf-8")
                .body("sitemap temporarily unavailable\n"));
        }
    };

    let base_url = &config.app.base_url;
    let mut entries = Vec::new();

    entries.push(SitemapEntry {
        loc: format!("{}/", base_url),
        last_modified: newest(window.iter()),
    });
    entries.push(SitemapEntry {
        loc: format!("{}/categories", base_url),
        last_modified: newest(window.iter()),
    });

    // Synonym-tagged slugs collapse into the canonical category URL so the
    // sitemap never lists a URL the server answers with a 301. Only tags
    // outside the taxonomy keep their flat slug.
    let mut category_locs: HashMap<String, Option<DateTime<Utc>>> = HashMap::new();
    for (slug, last_modified) in slug_dates(&window, |item| item.tags.clone()) {
        let loc = match resolve_by_slug_path(&app_state.taxonomy, &[slug.as_str()]) {
            Some(resolved) => format!("{}{}", base_url, resolved.canonical_path()),
            None => format!("{}/categories/{}", base_url, slug),
        };
        let entry = category_locs.entry(loc).or_insert(None);
        if last_modified > *entry {
            *entry = last_modified;
        }
    }
    for (loc, last_modified) in category_locs {
        entries.push(SitemapEntry { loc, last_modified });
    }
    for (slug, last_modified) in slug_dates(&window, |item| vec![item.publisher.clone()]) {
        entries.push(SitemapEntry {
            loc: format!("{}/vendors/{}", base_url, slug),
            last_modified,
        });
    }

    entries.sort_by(|left, right| left.loc.cmp(&right.loc));

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        let loc = escape_xml(&entry.loc);
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", loc);
        if let Some(lastmod) = entry.last_modified {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

struct SitemapEntry {
    loc: String,
    last_modified: Option<DateTime<Utc>>,
}

fn newest<'a>(items: impl Iterator<Item = &'a StatItem>) -> Option<DateTime<Utc>> {
    items.filter_map(|item| item.created_at).max()
}

fn slug_dates(
    window: &[StatItem],
    labels: impl Fn(&StatItem) -> Vec<String>,
) -> Vec<(String, Option<DateTime<Utc>>)> {
    let mut dates: HashMap<String, Option<DateTime<Utc>>> = HashMap::new();
    for item in window {
        for label in labels(item) {
            let slug = normalize(&label);
            if slug.is_empty() {
                continue;
            }
            let entry = dates.entry(slug).or_insert(None);
            if item.created_at > *entry {
                *entry = item.created_at;
            }
        }
    }
    let mut entries: Vec<_> = dates.into_iter().collect();
    entries.sort_by(|left, right| left.0.cmp(&right.0));
    entries
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
