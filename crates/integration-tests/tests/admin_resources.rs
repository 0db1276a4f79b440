//! Integration tests for the generic resource pages.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use hadawi_integration_tests::{TestApp, location};

async fn signed_in() -> TestApp {
    let app = TestApp::spawn().await;
    app.login().await;
    app
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_list_renders_rows_and_pager() {
    let app = signed_in().await;
    Mock::given(method("GET"))
        .and(path("/admin/taxes"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "name": "VAT", "rate": 15, "active": true },
                { "id": 2, "name": "Luxury levy", "rate": 5, "active": false }
            ],
            "meta": { "current_page": 1, "last_page": 2, "total": 21 }
        })))
        .expect(1)
        .mount(&app.api)
        .await;

    let body = app.page("/taxes").await;
    assert!(body.contains("VAT"));
    assert!(body.contains("Luxury levy"));
    assert!(body.contains("href=\"/taxes/1\""));
    assert!(body.contains("href=\"/taxes/2/edit\""));
    assert!(body.contains("action=\"/taxes/1/delete\""));
    assert!(body.contains("Page 1 of 2"));
    assert!(body.contains("21 records"));
    assert!(body.contains("href=\"/taxes?page=2\""));
    assert!(body.contains("href=\"/taxes/new\""));
}

#[tokio::test]
async fn test_list_forwards_search_and_page() {
    let app = signed_in().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "layla"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 9, "name": "Layla", "email": "layla@example.com" }],
            "meta": { "current_page": 3, "last_page": 3 }
        })))
        .expect(1)
        .mount(&app.api)
        .await;

    let body = app.page("/users?q=+layla+&page=3").await;
    assert!(body.contains("layla@example.com"));
    assert!(body.contains("value=\"layla\""));
    assert!(body.contains("href=\"/users?q=layla&#38;page=2\""));
}

#[tokio::test]
async fn test_read_only_list_hides_mutations() {
    let app = signed_in().await;
    app.mock_get(
        "payments",
        json!([{ "id": 5, "amount": 120, "status": "paid" }]),
    )
    .await;

    let body = app.page("/payments").await;
    assert!(body.contains("href=\"/payments/5\""));
    assert!(!body.contains("/payments/new"));
    assert!(!body.contains("/payments/5/edit"));
    assert!(!body.contains("/payments/5/delete"));
}

#[tokio::test]
async fn test_list_failure_keeps_shell() {
    let app = signed_in().await;
    Mock::given(method("GET"))
        .and(path("/admin/occasions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.api)
        .await;

    let body = app.page("/occasions").await;
    assert!(body.contains("Could not load data from Hadawi. Please try again."));
    assert!(body.contains("href=\"/occasions\" class=\"menu-link active\""));
    assert!(body.contains("No records found."));
}

#[tokio::test]
async fn test_unknown_resource_is_not_found() {
    let app = signed_in().await;
    assert_eq!(app.get("/invoices").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/invoices/1").await.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_labels_fields() {
    let app = signed_in().await;
    app.mock_get(
        "promo-codes/3",
        json!({ "id": 3, "code": "EID25", "expires_at": "2026-04-01T00:00:00Z" }),
    )
    .await;

    let body = app.page("/promo-codes/3").await;
    assert!(body.contains("EID25"));
    assert!(body.contains("Expires"));
    assert!(body.contains("href=\"/promo-codes/3/edit\""));
}

#[tokio::test]
async fn test_detail_links_encode_record_id() {
    let app = signed_in().await;
    app.mock_get("promo-codes/eid%2F25", json!({ "id": "eid/25", "code": "EID25" }))
        .await;

    let body = app.page("/promo-codes/eid%2F25").await;
    assert!(body.contains("EID25"));
    assert!(body.contains("href=\"/promo-codes/eid%2F25/edit\""));
    assert!(body.contains("action=\"/promo-codes/eid%2F25/delete\""));
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let app = signed_in().await;
    // Nothing mounted: the mock API answers 404.
    let response = app.get("/occasions/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_create_redirects_with_notice() {
    let app = signed_in().await;
    Mock::given(method("POST"))
        .and(path("/admin/taxes"))
        .and(body_json(json!({ "name": "VAT", "rate": 15, "active": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 1 } })))
        .expect(1)
        .mount(&app.api)
        .await;
    app.mock_get("taxes", json!({ "data": [] })).await;

    let response = app
        .post_form("/taxes", &[("name", "VAT"), ("rate", "15"), ("active", "true")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/taxes?success=created");

    let body = app.page("/taxes?success=created").await;
    assert!(body.contains("Record created."));
}

#[tokio::test]
async fn test_rejected_create_keeps_input() {
    let app = signed_in().await;
    Mock::given(method("POST"))
        .and(path("/admin/taxes"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": { "rate": ["The rate must be between 0 and 100."] }
        })))
        .mount(&app.api)
        .await;

    let response = app
        .post_form("/taxes", &[("name", "VAT"), ("rate", "150")])
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.expect("body");
    assert!(body.contains("The rate must be between 0 and 100."));
    assert!(body.contains("value=\"150\""));
    assert!(body.contains("action=\"/taxes\""));
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = signed_in().await;
    Mock::given(method("PUT"))
        .and(path("/admin/occasions/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": 42 } })))
        .expect(1)
        .mount(&app.api)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/occasions/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.api)
        .await;

    let response = app
        .post_form("/occasions/42", &[("title", "Graduation"), ("status", "active")])
        .await;
    assert_eq!(location(&response), "/occasions?success=updated");

    let response = app.post_form("/occasions/42/delete", &[]).await;
    assert_eq!(location(&response), "/occasions?success=deleted");
}

#[tokio::test]
async fn test_failed_delete_reports_error() {
    let app = signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/banners/8"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&app.api)
        .await;

    let response = app.post_form("/banners/8/delete", &[]).await;
    assert_eq!(location(&response), "/banners?error=delete");
}

#[tokio::test]
async fn test_disallowed_mutations_are_not_found() {
    let app = signed_in().await;

    assert_eq!(app.get("/payments/new").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/occasions/new").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.post_form("/payments/1/delete", &[]).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_form("/payments", &[("amount", "10")]).await.status(),
        StatusCode::NOT_FOUND
    );

    let api_calls: Vec<_> = app
        .api_requests()
        .await
        .into_iter()
        .filter(|request| request.url.path().starts_with("/admin/payments"))
        .collect();
    assert!(api_calls.is_empty());
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_degrades_per_panel() {
    let app = signed_in().await;
    Mock::given(method("GET"))
        .and(path("/admin/statistics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.api)
        .await;
    app.mock_get("payments/balance", json!({ "data": { "available": 4200, "pending": 310 } }))
        .await;

    let body = app.page("/dashboard").await;
    assert!(body.contains("Welcome back, Sara Al-Harbi"));
    assert!(body.contains("Could not load data from Hadawi. Please try again."));
    assert!(body.contains("4200"));
    assert!(body.contains("href=\"/dashboard\" class=\"menu-link active\""));
}
