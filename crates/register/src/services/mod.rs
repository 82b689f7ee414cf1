//! Services used by the route handlers.
//!
//! - [`auth`] - Client for the upstream login endpoint
//! - [`catalog`] - Mock product lookup for scanned barcodes
//! - [`visitors`] - Per-visitor cart, notice and login state

pub mod auth;
pub mod catalog;
pub mod visitors;

pub use auth::{LoginClient, LoginError, LoginOutcome};
pub use catalog::{CatalogError, MockCatalog};
pub use visitors::{VisitorHandle, VisitorStore};
