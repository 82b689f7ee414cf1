//! Integration tests for the login screen.
//!
//! The register forwards credentials to a stub login endpoint; these tests
//! check the cookie and the message the user ends up with.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;

use easebarkod_core::LOGIN_FAILED_MESSAGE;
use easebarkod_integration_tests::{
    STUB_TOKEN, SlowLoginStub, TestRegister, VALID_PASSWORD, VALID_USERNAME,
};

fn session_token_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with("session_token="))
        .map(String::from)
        .collect()
}

async fn submit(register: &TestRegister, username: &str, password: &str) -> reqwest::Response {
    register
        .post_form("/login", &[("username", username), ("password", password)])
        .await
}

#[tokio::test]
async fn test_login_page_renders() {
    let register = TestRegister::start().await;
    let html = register.get_html("/login").await;

    assert!(html.contains("EaseBarkod"));
    assert!(html.contains("Kullanıcı Adı:"));
    assert!(!html.contains(LOGIN_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_successful_login_sets_session_token_cookie() {
    let register = TestRegister::start().await;
    let response = submit(&register, VALID_USERNAME, VALID_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        session_token_cookies(&response),
        vec![format!("session_token={STUB_TOKEN}; Path=/; Max-Age=3600")]
    );

    let html = response.text().await.expect("body");
    assert!(!html.contains(LOGIN_FAILED_MESSAGE));
    assert!(html.contains("Giriş onaylandı."));
}

#[tokio::test]
async fn test_rejected_login_shows_fixed_message() {
    let register = TestRegister::start().await;
    let response = submit(&register, VALID_USERNAME, "yanlis-sifre").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_token_cookies(&response).is_empty());

    let html = response.text().await.expect("body");
    assert!(html.contains(LOGIN_FAILED_MESSAGE));
    assert!(html.contains("value=\"kasiyer\""));
}

#[tokio::test]
async fn test_success_without_token_sets_no_cookie() {
    let register = TestRegister::start().await;
    let response = submit(&register, "tokensiz", "herhangi").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_token_cookies(&response).is_empty());

    let html = response.text().await.expect("body");
    assert!(!html.contains(LOGIN_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_malformed_response_is_indistinguishable_from_rejection() {
    let register = TestRegister::start().await;
    let response = submit(&register, "bozuk", "herhangi").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_token_cookies(&response).is_empty());
    assert!(
        response
            .text()
            .await
            .expect("body")
            .contains(LOGIN_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_indistinguishable_from_rejection() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let endpoint = url::Url::parse(&format!("http://{addr}/api/login")).expect("url");
    let register = TestRegister::start_with_login_endpoint(endpoint).await;
    let response = submit(&register, VALID_USERNAME, VALID_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_token_cookies(&response).is_empty());
    assert!(
        response
            .text()
            .await
            .expect("body")
            .contains(LOGIN_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn test_token_with_cookie_attributes_is_refused() {
    let register = TestRegister::start().await;
    let response = submit(&register, "zehirli", "herhangi").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_token_cookies(&response).is_empty());
    assert!(
        response
            .text()
            .await
            .expect("body")
            .contains(LOGIN_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn test_resubmission_while_in_flight_does_not_reach_upstream() {
    let stub = SlowLoginStub::start(Duration::from_millis(500)).await;
    let register = TestRegister::start_with_login_endpoint(stub.endpoint.clone()).await;
    // Establish the session both submissions share
    register.get_html("/login").await;

    let first = submit(&register, VALID_USERNAME, VALID_PASSWORD);
    let second = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        submit(&register, VALID_USERNAME, VALID_PASSWORD).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(stub.hits(), 1);
    assert!(session_token_cookies(&second).is_empty());

    let html = second.text().await.expect("body");
    assert!(html.contains("Bekleyin..."));
    assert!(html.contains("disabled"));

    // Once resolved, the form can be submitted again
    let third = submit(&register, VALID_USERNAME, VALID_PASSWORD).await;
    assert_eq!(third.status(), StatusCode::OK);
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_login_page_shows_waiting_form_while_in_flight() {
    let stub = SlowLoginStub::start(Duration::from_millis(500)).await;
    let register = TestRegister::start_with_login_endpoint(stub.endpoint.clone()).await;
    register.get_html("/login").await;

    let submission = submit(&register, VALID_USERNAME, VALID_PASSWORD);
    let page = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        register.get_html("/login").await
    };
    let (response, html) = tokio::join!(submission, page);

    assert!(html.contains("Bekleyin..."));
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!register.get_html("/login").await.contains("Bekleyin..."));
}
