// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}

fn error_code(json: &Value) -> &str {
    json.get("code").and_then(Value::as_str).expect("error code")
}

/// Percent-encode a theme reference segment by segment, keeping the path
/// separator literal.
fn encode_reference(reference: &str) -> String {
    reference
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[actix_web::test]
async fn theme_read_without_user_is_unauthorized() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/global-styles/themes/{}", common::ACTIVE_THEME))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(error_code(&json), "cannot_manage_global_styles");
}

#[actix_web::test]
async fn theme_read_without_rights_is_forbidden() {
    let harness = common::TestHarness::new().await;
    let session = harness.subscriber_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = common::with_auth(
        test::TestRequest::get()
            .uri(&format!("/api/global-styles/themes/{}", common::ACTIVE_THEME)),
        &session,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let json = body_json(resp).await;
    assert_eq!(error_code(&json), "cannot_manage_global_styles");
}

#[actix_web::test]
async fn designer_reads_theme_base_styles() {
    let harness = common::TestHarness::new().await;
    let session = harness.designer_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = common::with_auth(
        test::TestRequest::get()
            .uri(&format!("/api/global-styles/themes/{}", common::ACTIVE_THEME)),
        &session,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;

    assert!(json.get("settings").is_some());
    assert!(json.get("styles").is_some());
    let self_href = json
        .pointer("/_links/self/0/href")
        .and_then(Value::as_str)
        .expect("self link");
    assert!(self_href.contains(common::ACTIVE_THEME));
}

#[actix_web::test]
async fn theme_base_styles_reflect_the_manifest() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();
    harness.seed_theme(
        "plain-canvas",
        &json!({
            "version": 2,
            "settings": {"color": {"palette": [{"slug": "base", "color": "#fdfdfd"}]}},
            "styles": {"typography": {"fontFamily": "serif"}}
        }),
    );
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = common::with_auth(
        test::TestRequest::get().uri("/api/global-styles/themes/plain-canvas"),
        &session,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;

    assert_eq!(
        json.get("settings"),
        Some(&json!({"color": {"palette": [{"slug": "base", "color": "#fdfdfd"}]}}))
    );
    assert_eq!(
        json.get("styles"),
        Some(&json!({"typography": {"fontFamily": "serif"}}))
    );
}

#[actix_web::test]
async fn theme_field_filter_omits_styles() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = common::with_auth(
        test::TestRequest::get().uri(&format!(
            "/api/global-styles/themes/{}?_fields=settings",
            common::ACTIVE_THEME
        )),
        &session,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let map = json.as_object().expect("object body");

    assert!(map.contains_key("settings"));
    assert!(!map.contains_key("styles"));
}

#[actix_web::test]
async fn unknown_theme_is_not_found() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    // `+` is routable, so this reaches the registry and misses there.
    for reference in ["does-not-exist", "my+theme+"] {
        let req = common::with_auth(
            test::TestRequest::get()
                .uri(&format!("/api/global-styles/themes/{}", reference)),
            &session,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", reference);
        let json = body_json(resp).await;
        assert_eq!(error_code(&json), "theme_not_found", "{}", reference);
    }
}

#[actix_web::test]
async fn unroutable_references_get_the_routing_404() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    // Raw `:` and `*` are legal in a request path but outside the theme
    // reference grammar, so no route matches at all.
    for reference in ["my:theme:", "my*theme*"] {
        let req = common::with_auth(
            test::TestRequest::get()
                .uri(&format!("/api/global-styles/themes/{}", reference)),
            &session,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", reference);
        let json = body_json(resp).await;
        assert_eq!(error_code(&json), "no_route", "{}", reference);
    }
}

#[actix_web::test]
async fn two_levels_of_nesting_resolve_as_a_record_id() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = common::with_auth(
        test::TestRequest::get().uri("/api/global-styles/themes/subdir/subsubdir/mytheme"),
        &session,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(error_code(&json), "global_styles_not_found");
}

#[actix_web::test]
async fn theme_references_round_trip_in_the_self_link() {
    let harness = common::TestHarness::new().await;
    let session = harness.admin_auth();

    let references = [
        "mytheme",
        "mythemev1",
        "àáâãäåæç",
        "my theme",
        "my_theme-0.1",
        "my[theme]",
        "my(theme)",
        "thémé {}&=@!$,^~%[0.1](-_-)",
        "subdir/mytheme",
        "sub dir/my theme",
        "sub_dir-0.1/my_theme-0.1",
        "sűbdīr {}&=@!$,^~%[0.1](-_-)/thémé {}&=@!$,^~%[0.1](-_-)",
    ];
    for reference in &references {
        harness.seed_theme(reference, &json!({"version": 2}));
    }

    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    for reference in &references {
        let req = common::with_auth(
            test::TestRequest::get().uri(&format!(
                "/api/global-styles/themes/{}",
                encode_reference(reference)
            )),
            &session,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", reference);
        let json = body_json(resp).await;

        assert!(json.get("settings").is_some(), "{}", reference);
        assert!(json.get("styles").is_some(), "{}", reference);
        let self_href = json
            .pointer("/_links/self/0/href")
            .and_then(Value::as_str)
            .expect("self link");
        assert_eq!(
            self_href,
            format!("/api/global-styles/themes/{}", reference),
            "self link must carry the reference unmodified"
        );
    }
}
