//! Integration test harness for the Hadawi admin panel.
//!
//! Each [`TestApp`] serves the full router on an ephemeral port against a
//! fresh [`MockServer`] standing in for the Hadawi API. The HTTP client keeps
//! cookies and never follows redirects, so tests can assert on each hop.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use reqwest::{Client, Response, StatusCode, redirect::Policy};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hadawi_admin::config::AdminConfig;
use hadawi_admin::i18n::Catalog;
use hadawi_admin::state::AppState;

/// Admin credentials accepted by [`TestApp::mock_login`].
pub const ADMIN_EMAIL: &str = "ops@hadawi.app";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Bearer token issued by the mocked login endpoint.
pub const ADMIN_TOKEN: &str = "test-token-7f3a";

const SESSION_SECRET: &str = "integration-session-secret-Wq8vZ2pLk4Rt9Xn6";

/// A running admin panel wired to a mock Hadawi API.
pub struct TestApp {
    pub api: MockServer,
    pub client: Client,
    base_url: String,
}

impl TestApp {
    /// Start the panel on `127.0.0.1:0`.
    pub async fn spawn() -> Self {
        let api = MockServer::start().await;

        let config = AdminConfig::for_api(&api.uri(), SecretString::from(SESSION_SECRET))
            .expect("mock API URL is valid");
        let catalog = Catalog::load().expect("catalogs load");
        let state = AppState::new(config, catalog).expect("state builds");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener has an address");
        tokio::spawn(async move {
            axum::serve(listener, hadawi_admin::app(state))
                .await
                .expect("server runs");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("client builds");

        Self {
            api,
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a panel path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// POST a form as the sidebar script does, asking for the fragment.
    pub async fn post_fragment(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("fragment request")
    }

    /// Body of a page fetched with GET.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("page body")
    }

    /// Accept [`ADMIN_EMAIL`] / [`ADMIN_PASSWORD`] at the login endpoint.
    pub async fn mock_login(&self) {
        Mock::given(method("POST"))
            .and(path("/admin/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "token": ADMIN_TOKEN,
                    "admin": {
                        "name": "Sara Al-Harbi",
                        "email": ADMIN_EMAIL,
                        "role": "super_admin"
                    },
                    "expires_in": 3600
                }
            })))
            .mount(&self.api)
            .await;
    }

    /// Sign in through the login form and check the landing redirect.
    pub async fn login(&self) {
        self.mock_login().await;
        let response = self
            .post_form("/login", &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    /// Answer `GET /admin/{api_path}` with `body`.
    pub async fn mock_get(&self, api_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/admin/{api_path}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.api)
            .await;
    }

    /// Requests the mock API has seen.
    pub async fn api_requests(&self) -> Vec<wiremock::Request> {
        self.api.received_requests().await.unwrap_or_default()
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Number of times `needle` occurs in `haystack`.
#[must_use]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
