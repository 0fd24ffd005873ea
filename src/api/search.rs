// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::stats::{StatItem, StatsQuery};
use actix_web::{HttpResponse, web};
use log::error;
use serde::{Deserialize, Serialize};

const MAX_RESULTS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    total: usize,
    items: Vec<&'a StatItem>,
}

/// Case-insensitive substring search over title, description, publisher,
/// and tags of the current item window.
pub async fn search(
    params: web::Query<SearchParams>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    let query = params.q.trim().to_lowercase();
    if query.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "missing query parameter 'q'"
        }));
    }

    let window = match app_state
        .stats
        .fetch(&StatsQuery::window(config.stats_api.window_limit))
        .await
    {
        Ok(items) => items,
        Err(e) => {
            error!("Stats fetch failed for search: {}", e);
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "statistics source unavailable"
            }));
        }
    };

    let mut items: Vec<&StatItem> = window
        .iter()
        .filter(|item| matches_query(item, &query))
        .collect();
    let total = items.len();
    items.truncate(MAX_RESULTS);

    HttpResponse::Ok().json(SearchResponse {
        query: params.q.trim(),
        total,
        items,
    })
}

fn matches_query(item: &StatItem, query: &str) -> bool {
    item.title.to_lowercase().contains(query)
        || item.description.to_lowercase().contains(query)
        || item.publisher.to_lowercase().contains(query)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}
