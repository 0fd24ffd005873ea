// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::error;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::stats::{StatItem, StatsQuery};
use crate::taxonomy::{
    Resolved, aggregate, decide_redirect, normalize, related_categories, resolve_by_slug_path,
    slug_to_title, subcategory_counts, tag_counts, top_publishers,
};
use actix_web::http::header;
use actix_web::{HttpResponse, Result, web};
use log::{debug, error};
use minijinja::{Value, context};
use serde::Serialize;

const TOP_VENDOR_LIMIT: usize = 10;
const RELATED_LIMIT: usize = 8;
const TRENDING_LIMIT: usize = 6;
const LATEST_LIMIT: usize = 12;

#[derive(Debug, Serialize)]
struct ParentContext {
    name: String,
    slug: String,
    full_path: String,
}

pub async fn home(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let window = match fetch_window(&app_state, &config).await {
        Ok(window) => window,
        Err(response) => return response,
    };

    let mut trending = tag_counts(&window, config.stats_api.min_tag_count);
    trending.sort_by(|left, right| right.count.cmp(&left.count).then_with(|| left.name.cmp(&right.name)));
    trending.truncate(TRENDING_LIMIT);

    let mut latest: Vec<&StatItem> = window.iter().collect();
    latest.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    latest.truncate(LATEST_LIMIT);

    render_page(
        &app_state,
        "home.html",
        context! {
            app_name => config.app.name,
            trending => trending,
            latest => latest,
        },
    )
}

pub async fn categories_index(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let window = match fetch_window(&app_state, &config).await {
        Ok(window) => window,
        Err(response) => return response,
    };

    let categories = tag_counts(&window, config.stats_api.min_tag_count);

    render_page(
        &app_state,
        "categories.html",
        context! {
            app_name => config.app.name,
            canonical_url => format!("{}/categories", config.app.base_url),
            categories => categories,
        },
    )
}

/// Catch-all for `/categories/{slug}` and `/categories/{parent}/{child}`.
/// The redirect decision runs before anything is fetched or rendered so a
/// stale URL costs one upstream round trip of nothing.
pub async fn category_route(
    path: web::Path<String>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slug_path = path.into_inner();
    let request_path = format!("/categories/{}", slug_path);

    if let Some(target) = decide_redirect(
        &app_state.taxonomy,
        &app_state.legacy_redirects,
        &request_path,
    ) {
        debug!("301 redirect: {} -> {}", request_path, target);
        return Ok(HttpResponse::MovedPermanently()
            .insert_header((header::LOCATION, target))
            .finish());
    }

    let segments: Vec<&str> = slug_path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() || segments.len() > 2 {
        return serve_404(&app_state);
    }

    match resolve_by_slug_path(&app_state.taxonomy, &segments) {
        Some(resolved) => render_taxonomy_category(&config, &app_state, &slug_path, resolved).await,
        None if segments.len() == 1 => {
            render_flat_category(&config, &app_state, segments[0]).await
        }
        None => serve_404(&app_state),
    }
}

async fn render_taxonomy_category(
    config: &ValidatedConfig,
    app_state: &AppState,
    slug_path: &str,
    resolved: Resolved<'_>,
) -> Result<HttpResponse> {
    let window = match fetch_window(app_state, config).await {
        Ok(window) => window,
        Err(response) => return response,
    };

    let matching_slugs = resolved.matching_slugs().to_vec();
    let stats = aggregate(&window, &matching_slugs);
    let vendors = top_publishers(&stats, TOP_VENDOR_LIMIT);
    let related = related_categories(
        &app_state.taxonomy,
        &window,
        &matching_slugs,
        RELATED_LIMIT,
    );

    let (subcategories, parent_context, is_parent) = match &resolved {
        Resolved::Parent { category, .. } => {
            (subcategory_counts(category, &window), None, true)
        }
        Resolved::Child { parent, .. } => (
            Vec::new(),
            Some(ParentContext {
                name: parent.name.clone(),
                slug: parent.slug.clone(),
                full_path: format!("/categories/{}", parent.slug),
            }),
            false,
        ),
    };

    let name = resolved.display_name().to_string();
    let description = page_description(
        app_state,
        slug_path,
        &name,
        parent_context.as_ref(),
        stats.len(),
    );

    render_page(
        app_state,
        "category.html",
        context! {
            app_name => config.app.name,
            canonical_url => format!("{}{}", config.app.base_url, resolved.canonical_path()),
            name => name,
            description => description,
            is_parent => is_parent,
            parent => parent_context,
            subcategories => subcategories,
            related => related,
            top_vendors => vendors,
            stats => stats,
        },
    )
}

/// Tags outside the curated taxonomy still get a page when the data window
/// carries matching items. The upstream tag index filters server-side by
/// the title-cased tag name; the exact capitalization is recovered from the
/// first matching item.
async fn render_flat_category(
    config: &ValidatedConfig,
    app_state: &AppState,
    slug: &str,
) -> Result<HttpResponse> {
    let slug = normalize(slug);
    if slug.is_empty() {
        return serve_404(app_state);
    }

    let query = StatsQuery::for_tag(slug_to_title(&slug), config.stats_api.page_limit);
    let tagged = match app_state.stats.fetch(&query).await {
        Ok(items) => items,
        Err(e) => {
            error!("Stats fetch failed for tag page '{}': {}", slug, e);
            return serve_500(app_state);
        }
    };

    let matching_slugs = vec![slug.clone()];
    let stats = aggregate(&tagged, &matching_slugs);
    if stats.is_empty() {
        return serve_404(app_state);
    }

    let name = stats
        .iter()
        .flat_map(|item| item.tags.iter())
        .find(|tag| normalize(tag) == slug)
        .cloned()
        .unwrap_or_else(|| slug_to_title(&slug));

    let window = match fetch_window(app_state, config).await {
        Ok(window) => window,
        Err(response) => return response,
    };
    let vendors = top_publishers(&stats, TOP_VENDOR_LIMIT);
    let related = related_categories(
        &app_state.taxonomy,
        &window,
        &matching_slugs,
        RELATED_LIMIT,
    );
    let description = page_description(app_state, &slug, &name, None, stats.len());

    render_page(
        app_state,
        "category.html",
        context! {
            app_name => config.app.name,
            canonical_url => format!("{}/categories/{}", config.app.base_url, slug),
            name => name,
            description => description,
            is_parent => false,
            parent => Value::from(()),
            subcategories => Vec::<Value>::new(),
            related => related,
            top_vendors => vendors,
            stats => stats,
        },
    )
}

pub async fn vendors_index(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let window = match fetch_window(&app_state, &config).await {
        Ok(window) => window,
        Err(response) => return response,
    };

    let all: Vec<&StatItem> = window.iter().collect();
    let mut vendors = top_publishers(&all, usize::MAX);
    vendors.sort_by(|left, right| left.name.cmp(&right.name));

    render_page(
        &app_state,
        "vendors.html",
        context! {
            app_name => config.app.name,
            canonical_url => format!("{}/vendors", config.app.base_url),
            vendors => vendors,
        },
    )
}

pub async fn vendor_detail(
    path: web::Path<String>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slug = normalize(&path.into_inner());
    if slug.is_empty() {
        return serve_404(&app_state);
    }

    let window = match fetch_window(&app_state, &config).await {
        Ok(window) => window,
        Err(response) => return response,
    };

    let stats: Vec<&StatItem> = window
        .iter()
        .filter(|item| normalize(&item.publisher) == slug)
        .collect();
    if stats.is_empty() {
        return serve_404(&app_state);
    }

    let name = stats[0].publisher.clone();
    let description = match app_state.overrides.vendor_description(&slug) {
        Some(text) => text.to_string(),
        None => format!(
            "{} cybersecurity statistics published by {}.",
            stats.len(),
            name
        ),
    };

    render_page(
        &app_state,
        "vendor.html",
        context! {
            app_name => config.app.name,
            canonical_url => format!("{}/vendors/{}", config.app.base_url, slug),
            name => name,
            description => description,
            stats => stats,
        },
    )
}

fn page_description(
    app_state: &AppState,
    slug_path: &str,
    name: &str,
    parent: Option<&ParentContext>,
    stat_count: usize,
) -> String {
    if let Some(text) = app_state.overrides.category_description(slug_path) {
        return text.to_string();
    }
    match parent {
        Some(parent) => format!(
            "Explore {} cybersecurity statistics about {} in {}.",
            stat_count,
            name.to_lowercase(),
            parent.name
        ),
        None => format!(
            "Explore {} cybersecurity statistics about {}.",
            stat_count,
            name.to_lowercase()
        ),
    }
}

async fn fetch_window(
    app_state: &AppState,
    config: &ValidatedConfig,
) -> std::result::Result<Vec<StatItem>, Result<HttpResponse>> {
    let query = StatsQuery::window(config.stats_api.window_limit);
    match app_state.stats.fetch(&query).await {
        Ok(items) => Ok(items),
        Err(e) => {
            error!("Stats window fetch failed: {}", e);
            Err(serve_500(app_state))
        }
    }
}

fn render_page(app_state: &AppState, template: &str, context: Value) -> Result<HttpResponse> {
    match app_state.templates.render(template, context) {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(e) => {
            error!("Failed to render template '{}': {}", template, e);
            serve_500(app_state)
        }
    }
}

fn serve_404(app_state: &AppState) -> Result<HttpResponse> {
    error::serve_404(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}

fn serve_500(app_state: &AppState) -> Result<HttpResponse> {
    error::serve_500(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}
