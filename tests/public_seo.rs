// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use std::sync::Arc;

#[actix_web::test]
async fn robots_txt_blocks_admin_and_api_and_points_at_sitemap() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/robots.txt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("User-agent: *"));
    assert!(text.contains("Disallow: /admin/"));
    assert!(text.contains("Disallow: /api/"));
    assert!(text.contains("Sitemap: http://public.example/sitemap.xml"));
}

#[actix_web::test]
async fn sitemap_lists_category_and_vendor_urls_with_lastmod() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("<loc>http://public.example/</loc>"));
    assert!(text.contains("<loc>http://public.example/categories</loc>"));
    assert!(text.contains("<loc>http://public.example/categories/threats/ransomware</loc>"));
    // Tags outside the taxonomy keep their flat slug.
    assert!(text.contains("<loc>http://public.example/categories/healthcare</loc>"));
    assert!(text.contains("<loc>http://public.example/vendors/verizon</loc>"));
    assert!(text.contains("<lastmod>2026-01-"));
}

#[actix_web::test]
async fn sitemap_lists_only_canonical_category_urls() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);

    // "MFA", "2FA", and "Multi-Factor Authentication" tags all collapse
    // into the one canonical URL; the single-segment forms would 301.
    assert_eq!(
        text.matches("<loc>http://public.example/categories/identity-access/mfa</loc>")
            .count(),
        1
    );
    assert!(!text.contains("<loc>http://public.example/categories/mfa</loc>"));
    assert!(!text.contains("<loc>http://public.example/categories/2fa</loc>"));
    assert!(!text.contains("<loc>http://public.example/categories/multi-factor-authentication</loc>"));
}

#[actix_web::test]
async fn sitemap_degrades_to_service_unavailable_without_stats() {
    let harness = common::TestHarness::with_stats(Arc::new(common::BrokenStats));
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn home_and_index_pages_render() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    for uri in ["/", "/categories", "/vendors"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "for {}", uri);
    }

    let req = test::TestRequest::get().uri("/vendors/verizon").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("Verizon"));
}
