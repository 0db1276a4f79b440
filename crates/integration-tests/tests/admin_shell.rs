//! Integration tests for the admin shell: language, sidebar and menu groups.

use reqwest::StatusCode;
use serde_json::json;

use hadawi_integration_tests::{TestApp, count, location};

const EXPANDED: &str = "aria-expanded=\"true\"";

// ============================================================================
// Language
// ============================================================================

#[tokio::test]
async fn test_language_toggle_on_login_page() {
    let app = TestApp::spawn().await;

    let body = app.page("/login").await;
    assert!(body.contains("<html lang=\"en\" dir=\"ltr\">"));

    let response = app.post_form("/language/toggle", &[("return_to", "/login")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let body = app.page("/login").await;
    assert!(body.contains("<html lang=\"ar\" dir=\"rtl\">"));
}

#[tokio::test]
async fn test_language_toggle_mirrors_shell() {
    let app = TestApp::spawn().await;
    app.login().await;

    for _ in 0..2 {
        let body = app.page("/settings").await;
        assert!(body.contains("dir=\"ltr\""));
        assert!(body.contains("icon-chevron-right"));
        assert!(!body.contains("icon-chevron-left"));
        assert!(body.contains(" mr-3\""));
        assert!(!body.contains(" ml-3\""));

        let response = app
            .post_form("/language/toggle", &[("return_to", "/settings")])
            .await;
        assert_eq!(location(&response), "/settings");

        let body = app.page("/settings").await;
        assert!(body.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(body.contains("icon-chevron-left"));
        assert!(!body.contains("icon-chevron-right"));
        assert!(body.contains(" ml-3\""));
        assert!(!body.contains(" mr-3\""));

        app.post_form("/language/toggle", &[("return_to", "/settings")])
            .await;
    }
}

#[tokio::test]
async fn test_language_can_be_chosen_explicitly() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form("/language/ar", &[("return_to", "/settings?success=language")])
        .await;
    assert_eq!(location(&response), "/settings?success=language");
    assert!(app.page("/settings").await.contains("dir=\"rtl\""));

    let response = app.post_form("/language/fr", &[("return_to", "/settings")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_language_survives_logout() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.post_form("/language/ar", &[("return_to", "/settings")]).await;

    app.post_form("/logout", &[]).await;

    assert!(app.page("/login").await.contains("dir=\"rtl\""));
}

#[tokio::test]
async fn test_return_path_must_stay_on_site() {
    let app = TestApp::spawn().await;

    for target in ["//evil.example/", "https://evil.example/", "/\\evil.example", ""] {
        let response = app.post_form("/language/toggle", &[("return_to", target)]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard", "return_to {target:?}");
    }
}

// ============================================================================
// Menu groups
// ============================================================================

#[tokio::test]
async fn test_groups_start_collapsed_and_toggle_independently() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app.page("/settings").await;
    assert_eq!(count(&body, EXPANDED), 0);
    assert!(!body.contains("href=\"/companies\""));

    let response = app
        .post_form("/nav/groups/catalog", &[("return_to", "/settings")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings");

    let body = app.page("/settings").await;
    assert_eq!(count(&body, EXPANDED), 1);
    assert!(body.contains("href=\"/companies\""));
    assert!(!body.contains("href=\"/regions\""));

    app.post_form("/nav/groups/locations", &[("return_to", "/settings")])
        .await;
    let body = app.page("/settings").await;
    assert_eq!(count(&body, EXPANDED), 2);
    assert!(body.contains("href=\"/regions\""));

    app.post_form("/nav/groups/catalog", &[("return_to", "/settings")])
        .await;
    let body = app.page("/settings").await;
    assert_eq!(count(&body, EXPANDED), 1);
    assert!(!body.contains("href=\"/companies\""));
    assert!(body.contains("href=\"/regions\""));
}

#[tokio::test]
async fn test_collapsed_group_marks_active_child() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.mock_get("companies", json!({ "data": [], "meta": { "current_page": 1, "last_page": 1 } }))
        .await;

    let body = app.page("/companies").await;
    assert!(body.contains("menu-link menu-group-toggle active\""));
    assert_eq!(count(&body, EXPANDED), 0);
    assert!(!body.contains("href=\"/companies\""));

    app.post_form("/nav/groups/catalog", &[("return_to", "/companies")])
        .await;
    let body = app.page("/companies").await;
    assert!(body.contains("href=\"/companies\" class=\"menu-link active\" aria-current=\"page\""));
}

#[tokio::test]
async fn test_group_toggle_returns_fragment_for_script() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_fragment("/nav/groups/locations", &[("return_to", "/settings")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.trim_start().starts_with("<div id=\"shell-nav\""));
    assert!(!body.contains("<html"));
    assert!(body.contains("href=\"/regions\""));
    assert!(body.contains("menu-link menu-group-toggle active\""));

    // The fragment reflects stored state, so a full page agrees.
    assert!(app.page("/settings").await.contains("href=\"/regions\""));
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form("/nav/groups/warehouse", &[("return_to", "/settings")])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Mobile sidebar
// ============================================================================

#[tokio::test]
async fn test_sidebar_opens_and_closes_on_navigation() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app.page("/settings").await;
    assert!(!body.contains("shell-nav is-open"));

    let response = app.post_form("/nav/sidebar", &[("return_to", "/settings")]).await;
    assert_eq!(location(&response), "/settings");

    let body = app.page("/settings").await;
    assert!(body.contains("shell-nav is-open"));
    assert!(body.contains("action=\"/nav/sidebar/close\""));

    let body = app.page("/analytics").await;
    assert!(!body.contains("shell-nav is-open"));
}

#[tokio::test]
async fn test_sidebar_closes_when_current_link_is_selected() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.mock_get("occasions/42", json!({ "data": { "id": 42, "title": "Eid" } }))
        .await;
    app.mock_get("occasions", json!({ "data": [] })).await;

    app.page("/occasions/42").await;
    app.post_form("/nav/sidebar", &[("return_to", "/occasions/42")])
        .await;
    assert!(app.page("/occasions/42").await.contains("shell-nav is-open"));

    // Same menu entry as the detail page.
    assert!(!app.page("/occasions").await.contains("shell-nav is-open"));

    app.post_form("/nav/sidebar", &[("return_to", "/occasions")]).await;
    assert!(app.page("/occasions").await.contains("shell-nav is-open"));
    assert!(!app.page("/occasions").await.contains("shell-nav is-open"));
}

#[tokio::test]
async fn test_fragment_toggle_then_link_closes_sidebar() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_fragment("/nav/sidebar", &[("return_to", "/settings")])
        .await;
    let body = response.text().await.expect("body");
    assert!(body.contains("shell-nav is-open"));

    assert!(!app.page("/settings").await.contains("shell-nav is-open"));
}

#[tokio::test]
async fn test_group_toggle_keeps_sidebar_open() {
    let app = TestApp::spawn().await;
    app.login().await;

    app.post_form("/nav/sidebar", &[("return_to", "/settings")]).await;
    app.page("/settings").await;
    app.post_form("/nav/groups/catalog", &[("return_to", "/settings")])
        .await;

    let body = app.page("/settings").await;
    assert!(body.contains("shell-nav is-open"));
    assert!(body.contains("href=\"/companies\""));
}

#[tokio::test]
async fn test_overlay_closes_sidebar() {
    let app = TestApp::spawn().await;
    app.login().await;
    app.page("/settings").await;

    app.post_form("/nav/sidebar", &[("return_to", "/settings")]).await;
    let response = app
        .post_fragment("/nav/sidebar/close", &[("return_to", "/settings")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(!body.contains("is-open"));

    assert!(!app.page("/settings").await.contains("shell-nav is-open"));
}
