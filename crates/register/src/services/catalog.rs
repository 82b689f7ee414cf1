//! Mock product lookup.
//!
//! There is no product backend: a scanned barcode becomes a product named
//! `Ürün <barcode>` with a random price below 100 and a quantity of one.

use easebarkod_core::{LineItem, Quantity};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

/// Upper bound (exclusive) for random prices, in kuruş.
const MAX_MOCK_PRICE_MINOR: i64 = 10_000;

/// Errors from product lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Barkod boş olamaz.")]
    EmptyBarcode,
}

/// Synthesizes line items for scanned barcodes.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    fixed_price: Option<Decimal>,
}

impl MockCatalog {
    /// Catalog that assigns random prices.
    #[must_use]
    pub const fn new() -> Self {
        Self { fixed_price: None }
    }

    /// Catalog that assigns the same price to every product.
    #[must_use]
    pub const fn with_fixed_price(price: Decimal) -> Self {
        Self {
            fixed_price: Some(price),
        }
    }

    /// Build the line item for a scanned barcode.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyBarcode`] if the barcode is blank.
    pub fn lookup(&self, barcode: &str) -> Result<LineItem, CatalogError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(CatalogError::EmptyBarcode);
        }

        let price = self.fixed_price.unwrap_or_else(random_price);
        Ok(LineItem::new(
            format!("Ürün {barcode}"),
            barcode,
            price,
            Quantity::ONE,
        ))
    }
}

fn random_price() -> Decimal {
    let minor = rand::rng().random_range(0..MAX_MOCK_PRICE_MINOR);
    Decimal::new(minor, 2)
}
