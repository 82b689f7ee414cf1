//! Session-related types.
//!
//! The session cookie only identifies a visitor. Everything a visitor
//! accumulates between requests lives in a [`Visitor`].

use easebarkod_core::{Cart, LoginFlow};

/// How a [`Notice`] is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// CSS class for the notice banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
        }
    }
}

/// One-shot message shown on the next render of the cart screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// State of one visitor between requests.
#[derive(Debug, Default)]
pub struct Visitor {
    /// The visitor's cart.
    pub cart: Cart,
    /// Pending one-shot notice for the cart screen.
    pub notice: Option<Notice>,
    /// Login form state; `Submitting` while an upstream call is in flight.
    pub login: LoginFlow,
}

impl Visitor {
    /// Remove and return the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

/// Session keys.
pub mod keys {
    /// Marker written once so the session gets an id and a cookie.
    pub const ESTABLISHED: &str = "established";
}
