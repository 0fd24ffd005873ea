// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::api::admin::AdminSessionStore;
use crate::overrides::DescriptionOverrides;
use crate::public::error::ErrorRenderer;
use crate::stats::StatsSource;
use crate::taxonomy::{LegacyRedirects, Taxonomy};
use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// Shared application state, built once at startup. The taxonomy and
/// redirect catalogs are immutable after construction, so handlers read
/// them without locking.
pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub error_renderer: ErrorRenderer,
    pub taxonomy: Taxonomy,
    pub legacy_redirects: LegacyRedirects,
    pub overrides: DescriptionOverrides,
    pub stats: Arc<dyn StatsSource>,
    pub admin_sessions: AdminSessionStore,
}

impl AppState {
    pub fn new(
        app_name: &str,
        taxonomy: Taxonomy,
        legacy_redirects: LegacyRedirects,
        overrides: DescriptionOverrides,
        stats: Arc<dyn StatsSource>,
    ) -> Self {
        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            error_renderer: ErrorRenderer::new(app_name.to_string()),
            taxonomy,
            legacy_redirects,
            overrides,
            stats,
            admin_sessions: AdminSessionStore::new(),
        }
    }
}
