//! Domain models for the register.

pub mod credentials;
pub mod session;

pub use credentials::{Credentials, SessionToken};
pub use session::{Notice, NoticeKind, Visitor, keys as session_keys};
