//! Shopping cart state and totals.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s. Line items have no identity
//! beyond their position: scanning the same barcode twice yields two rows.
//! Totals are derived on every call to [`Cart::totals`] and never cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity};

/// Value added tax rate applied to every cart (20% KDV).
pub const VAT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Errors returned by cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No line item exists at the given position.
    #[error("no line item at index {index} (cart has {len})")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of line items in the cart.
        len: usize,
    },
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name.
    pub name: String,
    /// Barcode as entered or scanned.
    pub barcode: String,
    /// Unit price in lira. Expected non-negative, not enforced.
    pub price: Decimal,
    /// Quantity, fractional allowed.
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a new line item.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        barcode: impl Into<String>,
        price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            name: name.into(),
            barcode: barcode.into(),
            price,
            quantity,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * self.quantity.value()
    }
}

/// Derived monetary figures for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of `price × quantity` over all line items.
    pub subtotal: Price,
    /// `subtotal × VAT_RATE`.
    pub tax: Price,
    /// `subtotal + tax`.
    pub total: Price,
}

impl Totals {
    /// Compute totals for a subtotal at the fixed [`VAT_RATE`].
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let tax = subtotal * VAT_RATE;
        Self {
            subtotal: Price::new(subtotal),
            tax: Price::new(tax),
            total: Price::new(subtotal + tax),
        }
    }
}

/// Acknowledgement returned when a cart is checked out.
///
/// Nothing is submitted anywhere; this only records what was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    /// Number of line items that were in the cart.
    pub item_count: usize,
    /// Totals of the cart at checkout time.
    pub totals: Totals,
}

/// An ordered list of line items.
///
/// ## Examples
///
/// ```
/// use easebarkod_core::{Cart, LineItem, Quantity};
/// use rust_decimal::Decimal;
///
/// let mut cart = Cart::new();
/// cart.add_product(LineItem::new("Elma", "111", Decimal::from(10), Quantity::from(2)));
/// cart.add_product(LineItem::new("Armut", "222", Decimal::from(5), Quantity::ONE));
///
/// let totals = cart.totals();
/// assert_eq!(totals.subtotal.amount, Decimal::from(25));
/// assert_eq!(totals.tax.amount, Decimal::from(5));
/// assert_eq!(totals.total.amount, Decimal::from(30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items (not the sum of quantities).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line item to the end of the cart.
    pub fn add_product(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Remove the line item at `index`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no item at `index`.
    pub fn remove_product(&mut self, index: usize) -> Result<LineItem, CartError> {
        let len = self.items.len();
        if index >= len {
            return Err(CartError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Replace the quantity of the line item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no item at `index`.
    pub fn update_product_quantity(
        &mut self,
        index: usize,
        quantity: Quantity,
    ) -> Result<(), CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;
        item.quantity = quantity;
        Ok(())
    }

    /// Compute subtotal, tax and total from the current line items.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal: Decimal = self.items.iter().map(LineItem::line_total).sum();
        Totals::from_subtotal(subtotal)
    }

    /// Clear the cart unconditionally.
    pub fn checkout(&mut self) -> Checkout {
        let checkout = Checkout {
            item_count: self.items.len(),
            totals: self.totals(),
        };
        self.items.clear();
        checkout
    }
}
