//! Login route handlers.
//!
//! The register does not authenticate anyone itself. It forwards the
//! credential pair to the upstream login endpoint once and, if a token comes
//! back, hands it to the browser in the `session_token` cookie.
//!
//! The visitor's [`LoginFlow`] is `Submitting` while that call is in flight;
//! another submission from the same visitor gets the waiting form back and
//! never reaches upstream.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::{
    Session,
    cookie::{Cookie, time::Duration},
};
use tracing::{Instrument, instrument};

use easebarkod_core::{LoginFlow, LoginState};

use crate::error::{AppError, Result};
use crate::models::credentials::{SESSION_TOKEN_COOKIE, SESSION_TOKEN_MAX_AGE_SECONDS};
use crate::models::{Credentials, SessionToken};
use crate::services::VisitorHandle;
use crate::state::AppState;

/// Login form data.
///
/// No `Debug`: the password must never reach a log line.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: Option<&'static str>,
    pub signed_in: bool,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

impl LoginTemplate {
    fn from_flow(flow: &LoginFlow, username: String) -> Self {
        Self {
            username,
            error: flow.error_message(),
            signed_in: matches!(flow.state(), LoginState::Succeeded),
            submit_label: flow.submit_label(),
            submit_disabled: flow.is_submit_disabled(),
        }
    }
}

/// Build the `session_token` cookie: `Path=/`, one hour.
#[must_use]
pub fn session_token_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build((SESSION_TOKEN_COOKIE, token.expose().to_owned()))
        .path("/")
        .max_age(Duration::seconds(SESSION_TOKEN_MAX_AGE_SECONDS))
        .build()
}

/// Call the login endpoint and turn any issued token into a `Set-Cookie` value.
///
/// The error is only logged; the user always sees the same message.
async fn authenticate(
    state: &AppState,
    credentials: &Credentials,
) -> std::result::Result<Option<HeaderValue>, String> {
    let outcome = state
        .login_client()
        .login(credentials)
        .await
        .map_err(|e| e.to_string())?;

    outcome
        .token
        .as_ref()
        .map(|token| {
            HeaderValue::from_str(&session_token_cookie(token).to_string())
                .map_err(|e| format!("token is not a valid cookie value: {e}"))
        })
        .transpose()
}

/// Call the login endpoint and record the outcome on the visitor's flow.
///
/// Spawned by [`login`] so the flow leaves `Submitting` even if the client
/// disconnects mid-request.
async fn resolve_login(
    state: AppState,
    handle: VisitorHandle,
    credentials: Credentials,
) -> Result<(LoginFlow, Option<HeaderValue>)> {
    let outcome = authenticate(&state, &credentials).await;

    let mut visitor = handle.lock().await;
    let cookie = match outcome {
        Ok(cookie) => {
            visitor
                .login
                .succeed()
                .map_err(|e| AppError::Internal(e.to_string()))?;
            tracing::info!(token_issued = cookie.is_some(), "Login succeeded");
            cookie
        }
        Err(reason) => {
            visitor
                .login
                .fail()
                .map_err(|e| AppError::Internal(e.to_string()))?;
            tracing::warn!(reason = %reason, "Login failed");
            None
        }
    };

    Ok((visitor.login, cookie))
}

/// Display the login page.
///
/// Shows the waiting form while this visitor has a login in flight.
#[instrument(skip(state, session))]
pub async fn login_page(State(state): State<AppState>, session: Session) -> Result<LoginTemplate> {
    let handle = state.visitors().for_session(&session).await?;
    let visitor = handle.lock().await;

    let flow = if visitor.login.is_submit_disabled() {
        visitor.login
    } else {
        LoginFlow::new()
    };
    Ok(LoginTemplate::from_flow(&flow, String::new()))
}

/// Handle login form submission.
///
/// Every failure renders the same message with `401 Unauthorized`. A
/// submission while another is in flight gets `409 Conflict` and the
/// disabled form.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let LoginForm { username, password } = form;
    let handle = state.visitors().for_session(&session).await?;

    {
        let mut visitor = handle.lock().await;
        if let Err(e) = visitor.login.submit() {
            tracing::info!(error = %e, "Ignoring login submission");
            return Ok((
                StatusCode::CONFLICT,
                LoginTemplate::from_flow(&visitor.login, username),
            )
                .into_response());
        }
    }

    let credentials = Credentials::new(username.clone(), SecretString::from(password));
    let (flow, cookie) = tokio::spawn(
        resolve_login(state.clone(), Arc::clone(&handle), credentials)
            .in_current_span(),
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let status = if matches!(flow.state(), LoginState::Failed) {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::OK
    };

    let mut response = (status, LoginTemplate::from_flow(&flow, username)).into_response();
    if let Some(value) = cookie {
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use easebarkod_core::LOGIN_FAILED_MESSAGE;

    use super::*;

    #[test]
    fn test_session_token_cookie_format() {
        let cookie = session_token_cookie(&SessionToken::new("abc"));
        assert_eq!(cookie.to_string(), "session_token=abc; Path=/; Max-Age=3600");
    }

    #[test]
    fn test_login_page_renders_idle_form() {
        let html = LoginTemplate::from_flow(&LoginFlow::new(), String::new())
            .render()
            .unwrap();
        assert!(html.contains("Giriş Yap"));
        assert!(!html.contains("Bekleyin..."));
        assert!(!html.contains("class=\"notice notice-error\""));
    }

    #[test]
    fn test_failed_login_renders_fixed_message() {
        let mut flow = LoginFlow::new();
        flow.submit().unwrap();
        flow.fail().unwrap();

        let template = LoginTemplate::from_flow(&flow, "kasiyer".to_string());
        assert_eq!(template.error, Some(LOGIN_FAILED_MESSAGE));
        assert!(!template.signed_in);

        let html = template.render().unwrap();
        assert!(html.contains("value=\"kasiyer\""));
    }

    #[test]
    fn test_submitting_disables_button() {
        let mut flow = LoginFlow::new();
        flow.submit().unwrap();

        let html = LoginTemplate::from_flow(&flow, String::new())
            .render()
            .unwrap();
        assert!(html.contains("Bekleyin..."));
        assert!(html.contains("disabled"));
    }
}
