// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{StatItem, StatsError, StatsQuery, StatsSource};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(default)]
    items: Option<Vec<StatItem>>,
}

/// awc-backed client for the remote statistics API. Stateless apart from
/// configuration; a fresh connection is made per fetch since every page
/// render is already one or two upstream calls.
#[derive(Debug, Clone)]
pub struct RemoteStatsClient {
    base_url: String,
    api_key: String,
}

impl RemoteStatsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn request_url(&self, query: &StatsQuery) -> String {
        let mut url = format!(
            "{}?key={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            query.limit
        );
        if let Some(tag) = &query.tag {
            url.push_str("&tag=");
            url.push_str(&urlencoding::encode(tag));
        }
        url
    }
}

#[async_trait(?Send)]
impl StatsSource for RemoteStatsClient {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<StatItem>, StatsError> {
        let url = self.request_url(query);
        debug!("Fetching stats window: tag={:?} limit={}", query.tag, query.limit);

        let client = awc::Client::default();
        let mut response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StatsError::Status(response.status().as_u16()));
        }

        let envelope: StatsEnvelope = response
            .json()
            .limit(50 * 1024 * 1024)
            .await
            .map_err(|e| StatsError::Payload(e.to_string()))?;

        envelope
            .items
            .ok_or_else(|| StatsError::Payload("response missing 'items' array".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_carries_key_and_limit() {
        let client = RemoteStatsClient::new("https://api.example.com/stats", "k3y");
        let url = client.request_url(&StatsQuery::window(1000));
        assert_eq!(
            url,
            "https://api.example.com/stats?key=k3y&format=json&limit=1000"
        );
    }

    #[test]
    fn request_url_encodes_tag_filter() {
        let client = RemoteStatsClient::new("https://api.example.com/stats", "k3y");
        let url = client.request_url(&StatsQuery::for_tag("Zero Trust", 500));
        assert!(url.ends_with("&tag=Zero%20Trust"));
    }

    #[test]
    fn envelope_tolerates_missing_fields_per_item() {
        let parsed: StatsEnvelope = serde_json::from_str(
            r#"{"items":[{"title":"Breach costs rose","tags":["Data Breaches"]}]}"#,
        )
        .expect("parse");
        let items = parsed.items.expect("items");
        assert_eq!(items[0].id, 0);
        assert_eq!(items[0].publisher, "");
        assert_eq!(items[0].tags, vec!["Data Breaches"]);
        assert!(items[0].created_at.is_none());
    }

    #[test]
    fn envelope_without_items_is_a_payload_error_case() {
        let parsed: StatsEnvelope = serde_json::from_str(r#"{"error":"rate limited"}"#).expect("parse");
        assert!(parsed.items.is_none());
    }
}
