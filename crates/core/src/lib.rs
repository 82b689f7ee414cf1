//! EaseBarkod Core - Cart and login types for the register.
//!
//! This crate provides the state shared by the register screens:
//! - [`cart`] - Ordered line items and the subtotal / tax / total computation
//! - [`login`] - The login form state machine
//! - [`types`] - Lira price and quantity value types
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no sessions,
//! no HTTP clients. The `register` binary keeps a [`Cart`] and a [`LoginFlow`]
//! per visitor and drives the flow around its call to the login endpoint.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod login;
pub mod types;

pub use cart::{Cart, CartError, Checkout, LineItem, Totals, VAT_RATE};
pub use login::{LOGIN_FAILED_MESSAGE, LoginFlow, LoginState, LoginStateError};
pub use types::*;
