// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod error;
pub mod handlers;
pub mod seo;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/robots.txt", web::get().to(seo::robots_txt))
        .route("/sitemap.xml", web::get().to(seo::sitemap_xml))
        .route("/", web::get().to(handlers::home))
        .route("/categories", web::get().to(handlers::categories_index))
        .route(
            "/categories/{path:.*}",
            web::get().to(handlers::category_route),
        )
        .route("/vendors", web::get().to(handlers::vendors_index))
        .route("/vendors/{slug}", web::get().to(handlers::vendor_detail));
}
