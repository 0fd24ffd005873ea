// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use cyberstats::api;
use cyberstats::app_state::AppState;
use cyberstats::config::{ValidatedConfig, test_config};
use cyberstats::overrides::DescriptionOverrides;
use cyberstats::public;
use cyberstats::stats::{StatItem, StatsError, StatsQuery, StatsSource};
use cyberstats::taxonomy::{Category, LegacyRedirects, Subcategory, Taxonomy};
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory stand-in for the remote statistics API. Serves a fixed window
/// and honours tag filtering the way the upstream tag index does, by exact
/// case-insensitive tag match.
pub struct FixtureStats {
    items: Vec<StatItem>,
}

impl FixtureStats {
    pub fn new(items: Vec<StatItem>) -> Self {
        Self { items }
    }
}

#[async_trait(?Send)]
impl StatsSource for FixtureStats {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<StatItem>, StatsError> {
        let mut items: Vec<StatItem> = match &query.tag {
            Some(tag) => self
                .items
                .iter()
                .filter(|item| item.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
                .cloned()
                .collect(),
            None => self.items.clone(),
        };
        items.truncate(query.limit);
        Ok(items)
    }
}

/// A source that always fails, for exercising upstream-outage paths.
pub struct BrokenStats;

#[async_trait(?Send)]
impl StatsSource for BrokenStats {
    async fn fetch(&self, _query: &StatsQuery) -> Result<Vec<StatItem>, StatsError> {
        Err(StatsError::Status(502))
    }
}

pub fn stat(id: u64, title: &str, publisher: &str, tags: &[&str]) -> StatItem {
    StatItem {
        id,
        title: title.to_string(),
        link: format!("https://source.example/{}", id),
        description: format!("{} in detail.", title),
        publisher: publisher.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().map(|base| {
            base + chrono::Duration::days(id as i64)
        }),
    }
}

fn subcategory(name: &str, slug: &str, synonyms: &[&str]) -> Subcategory {
    Subcategory {
        name: name.to_string(),
        slug: slug.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn fixture_taxonomy() -> Taxonomy {
    Taxonomy::from_categories(vec![
        Category {
            name: "Identity & Access".to_string(),
            slug: "identity-access".to_string(),
            subcategories: vec![
                subcategory("Authentication", "authentication", &[]),
                subcategory(
                    "Multi-Factor Authentication",
                    "mfa",
                    &["multi-factor-authentication", "2fa"],
                ),
                subcategory("Password Security", "password-security", &[]),
            ],
        },
        Category {
            name: "Threats".to_string(),
            slug: "threats".to_string(),
            subcategories: vec![
                subcategory("Ransomware", "ransomware", &[]),
                subcategory("Phishing", "phishing", &["spear-phishing"]),
            ],
        },
    ])
    .expect("fixture taxonomy valid")
}

pub fn fixture_redirects() -> LegacyRedirects {
    let mut entries = HashMap::new();
    entries.insert(
        "identity-access/multi-factor-authentication".to_string(),
        "identity-access/mfa".to_string(),
    );
    entries.insert(
        "healthcare-cybersecurity".to_string(),
        "healthcare".to_string(),
    );
    LegacyRedirects::from_entries(entries).expect("fixture redirects valid")
}

pub fn fixture_items() -> Vec<StatItem> {
    vec![
        stat(1, "MFA adoption reaches 64%", "Okta", &["MFA", "Authentication"]),
        stat(2, "2FA bypass kits sold openly", "KrebsOnSecurity", &["2FA", "Phishing"]),
        stat(
            3,
            "Multi-factor rollout stalls in healthcare",
            "HIMSS",
            &["Multi-Factor Authentication", "Healthcare"],
        ),
        stat(4, "Ransomware payments fall 35%", "Chainalysis", &["Ransomware"]),
        stat(5, "Average ransom demand hits $2.5M", "Sophos", &["Ransomware"]),
        stat(6, "Ransomware dwell time drops", "Mandiant", &["Ransomware"]),
        stat(
            7,
            "Spear phishing opens 1 in 4 breaches",
            "Verizon",
            &["Spear-Phishing"],
        ),
        stat(8, "Hospital breach costs peak again", "IBM", &["Healthcare"]),
        stat(9, "Password reuse still at 62%", "Verizon", &["Password Security"]),
    ]
}

pub struct TestHarness {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_stats(Arc::new(FixtureStats::new(fixture_items())))
    }

    pub fn with_stats(stats: Arc<dyn StatsSource>) -> Self {
        let config = Arc::new(test_config());
        let app_state = Arc::new(AppState::new(
            &config.app.name,
            fixture_taxonomy(),
            fixture_redirects(),
            DescriptionOverrides::default(),
            stats,
        ));
        Self { config, app_state }
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::from(harness.config.clone()))
        .app_data(web::Data::from(harness.app_state.clone()))
        .configure(api::configure)
        .configure(public::configure)
}
