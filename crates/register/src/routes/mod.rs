//! HTTP route handlers for the register.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Cart screen
//! GET  /health          - Health check
//!
//! # Cart (form posts, redirect back to /)
//! POST /cart/scan       - Add mock product for a barcode
//! POST /cart/manual     - Add manually entered product
//! POST /cart/update     - Set quantity of one line
//! POST /cart/remove     - Remove one line
//! POST /checkout        - Clear the cart
//!
//! # Auth
//! GET  /login           - Login page
//! POST /login           - Forward credentials to the login endpoint
//! ```

pub mod auth;
pub mod cart;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", post(cart::scan))
        .route("/manual", post(cart::manual))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the register.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/login", get(auth::login_page).post(auth::login))
}
