// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Category taxonomy resolution and redirect engine.
//!
//! Everything in here is pure and synchronous over catalogs loaded once at
//! startup, so it can be shared freely across request handlers without
//! locking.

pub mod aggregate;
pub mod redirect;
pub mod resolver;
pub mod slug;
pub mod store;

pub use aggregate::{
    NamedCount, SubcategoryCount, aggregate, related_categories, subcategory_counts, tag_counts,
    top_publishers,
};
pub use redirect::{LegacyRedirects, decide_redirect};
pub use resolver::{Resolved, resolve_by_slug_path};
pub use slug::{normalize, slug_to_title};
pub use store::{Category, Subcategory, Taxonomy, TaxonomyError};
