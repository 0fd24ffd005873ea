// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod admin;
pub mod search;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/admin/login", web::post().to(admin::login))
            .route("/search", web::get().to(search::search)),
    );
}
