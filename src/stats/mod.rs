// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod client;

pub use client::RemoteStatsClient;

/// One externally sourced statistic record. Tags and publisher arrive as
/// free text with arbitrary capitalization; this crate only ever reads
/// them, normalizing at lookup time, and never stores them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatItem {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Query against the statistics API. `tag` uses the upstream tag index for
/// server-side filtering; the page layer still re-filters through the
/// aggregator because synonym-tagged items come back from separate tags.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub tag: Option<String>,
    pub limit: usize,
}

impl StatsQuery {
    pub fn window(limit: usize) -> Self {
        Self { tag: None, limit }
    }

    pub fn for_tag(tag: impl Into<String>, limit: usize) -> Self {
        Self {
            tag: Some(tag.into()),
            limit,
        }
    }
}

#[derive(Debug)]
pub enum StatsError {
    Request(String),
    Status(u16),
    Payload(String),
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::Request(msg) => write!(f, "Stats API request failed: {}", msg),
            StatsError::Status(code) => write!(f, "Stats API returned status {}", code),
            StatsError::Payload(msg) => write!(f, "Stats API payload invalid: {}", msg),
        }
    }
}

impl std::error::Error for StatsError {}

/// Seam between the page layer and the remote statistics API so tests can
/// substitute fixture windows. Handlers run on the actix single-threaded
/// runtime, hence the non-Send futures; the source itself is shared across
/// workers and must be Send + Sync.
#[async_trait(?Send)]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<StatItem>, StatsError>;
}
