//! Integration tests for the EaseBarkod register.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p easebarkod-integration-tests
//! ```
//!
//! Each test starts its own register on an ephemeral port, pointed at a stub
//! login endpoint that is also started on an ephemeral port. No external
//! services are needed.
//!
//! # Stub login endpoint
//!
//! | username   | password      | response                    |
//! |------------|---------------|-----------------------------|
//! | `kasiyer`  | `dogru-sifre` | `200 {"token": "abc"}`      |
//! | `tokensiz` | any           | `200 {}`                    |
//! | `bozuk`    | any           | `200` with a non-JSON body  |
//! | `zehirli`  | any           | `200` with a token carrying cookie attributes |
//! | others     | any           | `401 {}`                    |
//!
//! [`SlowLoginStub`] accepts everyone after a delay and counts its calls.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use url::Url;

use easebarkod_register::config::{LoginConfig, RegisterConfig};
use easebarkod_register::state::AppState;

/// Username the stub accepts.
pub const VALID_USERNAME: &str = "kasiyer";

/// Password the stub accepts for [`VALID_USERNAME`].
pub const VALID_PASSWORD: &str = "dogru-sifre";

/// Token the stub issues on success.
pub const STUB_TOKEN: &str = "abc";

/// Price every scanned product gets in tests.
pub const MOCK_PRICE: i64 = 10;

async fn stub_login(Json(body): Json<Value>) -> impl IntoResponse {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match username {
        VALID_USERNAME if password == VALID_PASSWORD => {
            (StatusCode::OK, Json(json!({ "token": STUB_TOKEN }))).into_response()
        }
        "tokensiz" => (StatusCode::OK, Json(json!({}))).into_response(),
        "bozuk" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "zehirli" => (
            StatusCode::OK,
            Json(json!({ "token": "abc; Domain=evil.example" })),
        )
            .into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response(),
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

/// Start the stub login endpoint and return its URL.
pub async fn spawn_login_stub() -> Url {
    let addr = serve(Router::new().route("/api/login", post(stub_login))).await;
    Url::parse(&format!("http://{addr}/api/login")).expect("stub url")
}

/// Login endpoint that answers slowly and counts how often it is called.
pub struct SlowLoginStub {
    pub endpoint: Url,
    hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct SlowStubState {
    hits: Arc<AtomicUsize>,
    delay: Duration,
}

async fn slow_login(State(stub): State<SlowStubState>) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(stub.delay).await;
    Json(json!({ "token": STUB_TOKEN }))
}

impl SlowLoginStub {
    /// Start a stub that waits `delay` before accepting any credentials.
    pub async fn start(delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/api/login", post(slow_login))
            .with_state(SlowStubState {
                hits: Arc::clone(&hits),
                delay,
            });
        let addr = serve(router).await;

        Self {
            endpoint: Url::parse(&format!("http://{addr}/api/login")).expect("stub url"),
            hits,
        }
    }

    /// Number of login requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A running register plus a cookie-keeping client.
pub struct TestRegister {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestRegister {
    /// Start a register against the stub login endpoint.
    pub async fn start() -> Self {
        Self::start_with_login_endpoint(spawn_login_stub().await).await
    }

    /// Start a register against an arbitrary login endpoint.
    pub async fn start_with_login_endpoint(endpoint: Url) -> Self {
        let config = RegisterConfig {
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            login: LoginConfig {
                endpoint,
                timeout: Duration::from_secs(5),
            },
            mock_price: Some(Decimal::from(MOCK_PRICE)),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).expect("app state");
        let addr = serve(easebarkod_register::app(state)).await;

        Self {
            base_url: format!("http://{addr}"),
            client: Self::new_client(),
        }
    }

    /// A fresh client with its own cookie jar (a separate visitor).
    #[must_use]
    pub fn new_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page and return its body.
    pub async fn get_html(&self, path: &str) -> String {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET")
            .text()
            .await
            .expect("body")
    }

    /// POST a form. Redirects are followed.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST")
    }

    /// POST a form and return the body of the page it lands on.
    pub async fn post_form_html(&self, path: &str, form: &[(&str, &str)]) -> String {
        self.post_form(path, form).await.text().await.expect("body")
    }

    /// Scan a barcode.
    pub async fn scan(&self, barcode: &str) -> String {
        self.post_form_html("/cart/scan", &[("barcode", barcode)]).await
    }

    /// Add a product through the manual entry form.
    pub async fn add_manual(
        &self,
        name: &str,
        barcode: &str,
        price: &str,
        quantity: &str,
    ) -> String {
        self.post_form_html(
            "/cart/manual",
            &[
                ("name", name),
                ("barcode", barcode),
                ("price", price),
                ("quantity", quantity),
            ],
        )
        .await
    }
}
