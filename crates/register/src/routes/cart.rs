//! Cart route handlers.
//!
//! Every mutation is a plain form post that redirects back to `/`, where the
//! cart and its totals are re-derived. Each handler holds the visitor lock
//! for its whole read-modify-write, so concurrent posts from one visitor
//! apply one after another. Input mistakes are reported through a one-shot
//! [`Notice`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use easebarkod_core::{Cart, LineItem, Price, Quantity};

use crate::error::Result;
use crate::models::Notice;
use crate::state::AppState;

/// Acknowledgement shown after checkout.
pub const CHECKOUT_MESSAGE: &str = "Checkout successful!";

/// Line item display data for templates.
#[derive(Clone)]
pub struct LineItemView {
    pub index: usize,
    pub name: String,
    pub barcode: String,
    pub price: String,
    pub quantity: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| LineItemView {
                    index,
                    name: item.name.clone(),
                    barcode: item.barcode.clone(),
                    price: Price::new(item.price).display(),
                    quantity: item.quantity.to_input_string(),
                    line_total: Price::new(item.line_total()).display(),
                })
                .collect(),
            subtotal: totals.subtotal.display(),
            tax: totals.tax.display(),
            total: totals.total.display(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Rejected cart input. Messages are shown to the cashier verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Ürün adı boş olamaz.")]
    MissingName,
    #[error("Barkod boş olamaz.")]
    MissingBarcode,
    #[error("Geçersiz fiyat: '{input}'")]
    InvalidPrice { input: String },
    #[error("Geçersiz miktar: '{input}'")]
    InvalidQuantity { input: String },
}

/// Barcode scan form data.
#[derive(Debug, Deserialize)]
pub struct ScanForm {
    pub barcode: String,
}

/// Manual product entry form data.
#[derive(Debug, Deserialize)]
pub struct ManualProductForm {
    pub name: String,
    pub barcode: String,
    pub price: String,
    pub quantity: String,
}

impl ManualProductForm {
    /// Validate the form into a line item.
    ///
    /// # Errors
    ///
    /// Returns the first [`EntryError`] found.
    pub fn into_line_item(self) -> std::result::Result<LineItem, EntryError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EntryError::MissingName);
        }
        let barcode = self.barcode.trim();
        if barcode.is_empty() {
            return Err(EntryError::MissingBarcode);
        }
        let price = Price::parse(&self.price).map_err(|_| {
            EntryError::InvalidPrice {
                input: self.price.trim().to_owned(),
            }
        })?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(LineItem::new(name, barcode, price.amount, quantity))
    }
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub index: usize,
    pub quantity: String,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub index: usize,
}

fn parse_quantity(input: &str) -> std::result::Result<Quantity, EntryError> {
    Quantity::parse(input).map_err(|_| EntryError::InvalidQuantity {
        input: input.trim().to_owned(),
    })
}

// =============================================================================
// Templates
// =============================================================================

/// Cart screen template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub notice: Option<Notice>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart screen.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    Ok(CartShowTemplate {
        cart: CartView::from(&visitor.cart),
        notice: visitor.take_notice(),
    })
}

/// Add a mock product for a scanned or typed barcode.
#[instrument(skip(state, session))]
pub async fn scan(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ScanForm>,
) -> Result<Redirect> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    match state.catalog().lookup(&form.barcode) {
        Ok(item) => {
            tracing::info!(barcode = %item.barcode, price = %item.price, "Product scanned");
            visitor.cart.add_product(item);
        }
        Err(e) => visitor.notice = Some(Notice::error(e.to_string())),
    }

    Ok(Redirect::to("/"))
}

/// Add a manually entered product.
#[instrument(skip(state, session))]
pub async fn manual(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ManualProductForm>,
) -> Result<Redirect> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    match form.into_line_item() {
        Ok(item) => {
            tracing::info!(barcode = %item.barcode, "Product added manually");
            visitor.cart.add_product(item);
        }
        Err(e) => visitor.notice = Some(Notice::error(e.to_string())),
    }

    Ok(Redirect::to("/"))
}

/// Replace the quantity of one line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Redirect> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    match parse_quantity(&form.quantity) {
        Ok(quantity) => {
            if let Err(e) = visitor.cart.update_product_quantity(form.index, quantity) {
                tracing::warn!(error = %e, "Ignoring quantity update for missing line");
            }
        }
        Err(e) => visitor.notice = Some(Notice::error(e.to_string())),
    }

    Ok(Redirect::to("/"))
}

/// Remove one line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveForm>,
) -> Result<Redirect> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    match visitor.cart.remove_product(form.index) {
        Ok(item) => tracing::info!(barcode = %item.barcode, "Line removed"),
        Err(e) => tracing::warn!(error = %e, "Ignoring removal of missing line"),
    }

    Ok(Redirect::to("/"))
}

/// Clear the cart and acknowledge.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let handle = state.visitors().for_session(&session).await?;
    let mut visitor = handle.lock().await;

    let checkout = visitor.cart.checkout();
    tracing::info!(
        item_count = checkout.item_count,
        total = %checkout.totals.total,
        "Checkout completed"
    );

    visitor.notice = Some(Notice::success(format!(
        "{CHECKOUT_MESSAGE} ({} ürün, Toplam: {})",
        checkout.item_count,
        checkout.totals.total.display()
    )));

    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn manual_form(name: &str, barcode: &str, price: &str, quantity: &str) -> ManualProductForm {
        ManualProductForm {
            name: name.to_string(),
            barcode: barcode.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_manual_form_accepts_decimal_comma() {
        let item = manual_form("Peynir", "869", "89,90", "0,5")
            .into_line_item()
            .unwrap();
        assert_eq!(item.price, Decimal::new(8990, 2));
        assert_eq!(item.quantity.value(), Decimal::new(5, 1));
    }

    #[test]
    fn test_manual_form_trims_text_fields() {
        let item = manual_form("  Süt ", " 123 ", "10", "1")
            .into_line_item()
            .unwrap();
        assert_eq!(item.name, "Süt");
        assert_eq!(item.barcode, "123");
    }

    #[test]
    fn test_manual_form_rejections() {
        assert_eq!(
            manual_form(" ", "1", "1", "1").into_line_item(),
            Err(EntryError::MissingName)
        );
        assert_eq!(
            manual_form("a", "", "1", "1").into_line_item(),
            Err(EntryError::MissingBarcode)
        );
        assert_eq!(
            manual_form("a", "1", "on", "1").into_line_item(),
            Err(EntryError::InvalidPrice {
                input: "on".to_string()
            })
        );
        assert_eq!(
            manual_form("a", "1", "1", "x").into_line_item(),
            Err(EntryError::InvalidQuantity {
                input: "x".to_string()
            })
        );
    }

    #[test]
    fn test_cart_view_formats_amounts() {
        let mut cart = Cart::new();
        cart.add_product(LineItem::new(
            "Elma",
            "111",
            Decimal::from(10),
            Quantity::parse("1,5").unwrap(),
        ));

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].index, 0);
        assert_eq!(view.items[0].price, "₺10.00");
        assert_eq!(view.items[0].quantity, "1,5");
        assert_eq!(view.items[0].line_total, "₺15.00");
        assert_eq!(view.subtotal, "₺15.00");
        assert_eq!(view.tax, "₺3.00");
        assert_eq!(view.total, "₺18.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.total, "₺0.00");
    }

    #[test]
    fn test_cart_template_renders_notice_and_rows() {
        let mut cart = Cart::new();
        cart.add_product(LineItem::new("Ürün 42", "42", Decimal::from(5), Quantity::ONE));

        let html = CartShowTemplate {
            cart: CartView::from(&cart),
            notice: Some(Notice::error("Geçersiz miktar: 'x'")),
        }
        .render()
        .unwrap();

        assert!(html.contains("Ürün 42"));
        assert!(html.contains("₺6.00"));
        assert!(html.contains("notice-error"));
    }
}
