mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use linkreg::domain::repositories::LinkRepository;
use linkreg::infrastructure::geoip::NullGeoLocator;
use linkreg::routes::app_router;
use linkreg::state::PublicSettings;
use linkreg::utils::code_generator::is_valid_code_format;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

fn code_from_shortlink(shortlink: &str) -> String {
    shortlink.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn test_shorten_success_with_defaults() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    let shortlink = body["shortlink"].as_str().unwrap();
    assert!(shortlink.starts_with("http://s.example.com/"));

    let code = code_from_shortlink(shortlink);
    assert_eq!(code.len(), 12);
    assert!(is_valid_code_format(&code));

    assert_eq!(body["expiry"], "2025-01-01T12:30:00.000Z");
}

#[tokio::test]
async fn test_shorten_root_path_alias() {
    let app = common::test_app();

    let response = app
        .server
        .post("/")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_shorten_with_custom_code_and_validity() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .add_header("Host", "localhost:8080")
        .json(&json!({
            "url": "https://example.com",
            "validity": 1,
            "shortcode": "promo2025"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["shortlink"], "http://localhost:8080/promo2025");
    assert_eq!(body["expiry"], "2025-01-01T12:01:00.000Z");
}

#[tokio::test]
async fn test_shorten_accepts_numeric_string_validity() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": "90", "shortcode": "strval" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let link = app.store.find_by_code("strval").await.unwrap().unwrap();
    assert_eq!(link.expires_at - link.created_at, Duration::minutes(90));
}

#[tokio::test]
async fn test_shorten_uses_configured_base_url() {
    let app = common::test_app_with(
        PublicSettings {
            base_url: Some("https://sho.rt/".to_string()),
            ..PublicSettings::default()
        },
        Arc::new(NullGeoLocator),
    );

    let response = app
        .server
        .post("/shorturls")
        .add_header("Host", "internal:8080")
        .json(&json!({ "url": "https://example.com", "shortcode": "based" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["shortlink"], "https://sho.rt/based");
}

#[tokio::test]
async fn test_shorten_forwarded_proto_behind_proxy() {
    let app = common::test_app_with(
        PublicSettings {
            behind_proxy: true,
            ..PublicSettings::default()
        },
        Arc::new(NullGeoLocator),
    );

    let response = app
        .server
        .post("/shorturls")
        .add_header("Host", "s.example.com")
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({ "url": "https://example.com", "shortcode": "secure" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["shortlink"], "https://s.example.com/secure");
}

#[tokio::test]
async fn test_shorten_forwarded_proto_ignored_without_proxy() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .add_header("Host", "s.example.com")
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({ "url": "https://example.com", "shortcode": "plain" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["shortlink"], "http://s.example.com/plain");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let app = common::test_app();

    for body in [
        json!({}),
        json!({ "url": "" }),
        json!({ "url": "not-a-url" }),
        json!({ "url": "javascript:alert(1)" }),
        json!({ "url": "ftp://example.com/file" }),
    ] {
        let response = app.server.post("/shorturls").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_url");
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_shorten_invalid_validity_reasons() {
    let app = common::test_app();

    for (validity, reason) in [
        (json!("abc"), "not_a_number"),
        (json!(0), "non_positive"),
        (json!(-10), "non_positive"),
        (json!("-1"), "non_positive"),
        (json!(1e300), "out_of_range"),
    ] {
        let response = app
            .server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "validity": validity }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_validity");
        assert_eq!(body["error"]["details"]["reason"], reason);
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_shorten_null_validity_uses_default() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["expiry"], "2025-01-01T12:30:00.000Z");
}

#[tokio::test]
async fn test_shorten_invalid_code_format() {
    let app = common::test_app();

    for code in ["abc", "has space", "bad/slash", "aaaaaaaaaaaaaaaaaaaaa"] {
        let response = app
            .server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "shortcode": code }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{code}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_code_format");
    }
}

#[tokio::test]
async fn test_shorten_empty_shortcode_generates_one() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let code = code_from_shortlink(body["shortlink"].as_str().unwrap());
    assert_eq!(code.len(), 12);
}

#[tokio::test]
async fn test_shorten_duplicate_code_conflicts_and_keeps_original() {
    let app = common::test_app();

    let first = app
        .server
        .post("/shorturls")
        .json(&json!({ "url": "https://first.example", "shortcode": "dupe" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = app
        .server
        .post("/shorturls")
        .json(&json!({ "url": "https://second.example", "shortcode": "dupe" }))
        .await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);

    let body: Value = second.json();
    assert_eq!(body["error"]["code"], "code_conflict");

    let link = app.store.find_by_code("dupe").await.unwrap().unwrap();
    assert_eq!(link.original_url, "https://first.example");
}

#[tokio::test]
async fn test_shorten_codes_are_case_sensitive() {
    let app = common::test_app();

    for code in ["CaseCode", "casecode"] {
        let response = app
            .server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "shortcode": code }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_shorten_reserved_code_conflicts() {
    let app = common::test_app();

    for code in ["health", "stats", "shorturls"] {
        let response = app
            .server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "shortcode": code }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CONFLICT, "{code}");
    }
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let app = common::test_app();

    let response = app
        .server
        .post("/shorturls")
        .content_type("application/json")
        .text("{ not json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_shorten_generates_1000_unique_codes() {
    let app = common::test_app();
    let mut codes = HashSet::new();

    for i in 0..1000 {
        let response = app
            .server
            .post("/shorturls")
            .json(&json!({ "url": format!("https://example.com/{i}") }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        let code = code_from_shortlink(body["shortlink"].as_str().unwrap());
        assert!(is_valid_code_format(&code));
        codes.insert(code);
    }

    assert_eq!(codes.len(), 1000);
    assert_eq!(app.store.len(), 1000);
}

#[tokio::test]
async fn test_shorten_trailing_slash_is_trimmed() {
    let app = common::test_app();
    let service = app_router(app.state.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/shorturls/")
        .header("content-type", "application/json")
        .header("host", "s.example.com")
        .body(Body::from(
            json!({ "url": "https://example.com", "shortcode": "slashed" }).to_string(),
        ))
        .unwrap();

    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(app.store.find_by_code("slashed").await.unwrap().is_some());
}
