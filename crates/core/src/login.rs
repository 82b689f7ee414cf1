//! Login form state machine.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──┬──▶ Succeeded
//!   ▲                           └──▶ Failed
//!   └──────── (resubmit from Succeeded or Failed) ────────┘
//! ```
//!
//! Every failure reason collapses into [`LOGIN_FAILED_MESSAGE`]; the user
//! cannot tell a network error from a wrong password.

use serde::{Deserialize, Serialize};

/// Message shown for any failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Kullanıcı adı ya da şifreniz yanlış.";

/// Submit button label while idle or finished.
pub const SUBMIT_LABEL: &str = "Giriş Yap";

/// Submit button label while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Bekleyin...";

/// Where a login attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Invalid state transition.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStateError {
    /// A submission is already in flight.
    #[error("a login request is already in flight")]
    AlreadySubmitting,
    /// Tried to resolve a login that was never submitted.
    #[error("cannot resolve login from state {0:?}")]
    NotSubmitting(LoginState),
}

/// Login form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoginFlow {
    state: LoginState,
}

impl LoginFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LoginState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Start a submission. Clears any previous error.
    ///
    /// # Errors
    ///
    /// Returns [`LoginStateError::AlreadySubmitting`] if a request is in flight.
    pub const fn submit(&mut self) -> Result<(), LoginStateError> {
        if matches!(self.state, LoginState::Submitting) {
            return Err(LoginStateError::AlreadySubmitting);
        }
        self.state = LoginState::Submitting;
        Ok(())
    }

    /// Resolve the in-flight submission as successful.
    ///
    /// # Errors
    ///
    /// Returns [`LoginStateError::NotSubmitting`] if nothing is in flight.
    pub const fn succeed(&mut self) -> Result<(), LoginStateError> {
        self.resolve(LoginState::Succeeded)
    }

    /// Resolve the in-flight submission as failed.
    ///
    /// # Errors
    ///
    /// Returns [`LoginStateError::NotSubmitting`] if nothing is in flight.
    pub const fn fail(&mut self) -> Result<(), LoginStateError> {
        self.resolve(LoginState::Failed)
    }

    /// The submit control is disabled while a request is in flight.
    #[must_use]
    pub const fn is_submit_disabled(&self) -> bool {
        matches!(self.state, LoginState::Submitting)
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Error message to show, if any.
    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        match self.state {
            LoginState::Failed => Some(LOGIN_FAILED_MESSAGE),
            _ => None,
        }
    }

    const fn resolve(&mut self, outcome: LoginState) -> Result<(), LoginStateError> {
        if !matches!(self.state, LoginState::Submitting) {
            return Err(LoginStateError::NotSubmitting(self.state));
        }
        self.state = outcome;
        Ok(())
    }
}
