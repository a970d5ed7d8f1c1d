//! # Line Item Ledger
//!
//! The ordered list of transaction lines shared by the sale and purchase
//! composers, with derived per-line and aggregate totals.
//!
//! The ledger is pure state: it never talks to the network and never
//! validates product existence on its own — per-line validation runs at the
//! phase boundary via [`Ledger::validate`]. Line order is insertion order and
//! carries no meaning beyond display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ComposerError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_line;

// =============================================================================
// Line Item
// =============================================================================

/// One transaction line: a product reference plus locally-editable quantity
/// and price. Mutating a line never mutates the cached product.
///
/// `expiration_date` and `batch_code` are populated only by the purchase
/// composer; sale lines leave them at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Reference into the product cache. Unset until the user picks one.
    pub product_id: Option<u64>,

    pub quantity: i64,

    pub unit_price: Money,

    /// Batch expiration, purchase lines only.
    #[ts(as = "Option<String>")]
    pub expiration_date: Option<NaiveDate>,

    /// Supplier batch code, purchase lines only.
    pub batch_code: String,
}

impl LineItem {
    /// Line subtotal: `quantity × unit_price`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A fresh line: no product selected, quantity 1, price 0.
impl Default for LineItem {
    fn default() -> Self {
        LineItem {
            product_id: None,
            quantity: 1,
            unit_price: Money::zero(),
            expiration_date: None,
            batch_code: String::new(),
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The ordered sequence of lines for one transaction draft.
///
/// ## Invariants
/// - Quantities and prices are never negative (setters clamp at the floor).
/// - `total()` is recomputed on every call, never cached.
/// - Removal is physical; there is no soft-delete at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ledger {
    lines: Vec<LineItem>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger { lines: Vec::new() }
    }

    /// Appends a fresh default line and returns its index.
    ///
    /// Product existence is not checked at add time; validation is deferred
    /// to the submit boundary.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineItem::default());
        self.lines.len() - 1
    }

    /// Appends a pre-filled line (e.g. seeded from a table selection).
    pub fn add_line_with(&mut self, line: LineItem) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// Deletes the line at `index`. Out-of-range indices are a silent no-op;
    /// the UI always supplies an index from the current render.
    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Selects a product for a line and copies the product's current price
    /// from the catalog into the line.
    ///
    /// The copy is one-way: editing the line's price afterwards never writes
    /// back to the product. When the id has no match in `catalog`, the
    /// reference is still recorded and the price is left untouched.
    pub fn set_product(&mut self, index: usize, product_id: u64, catalog: &[Product]) {
        if let Some(line) = self.lines.get_mut(index) {
            line.product_id = Some(product_id);
            if let Some(product) = catalog.iter().find(|p| p.id == product_id) {
                line.unit_price = product.price;
            }
        }
    }

    /// Sets a line quantity, clamped at zero so the ledger never holds a
    /// negative quantity.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity.max(0);
        }
    }

    /// Sets a line unit price, clamped at zero.
    pub fn set_unit_price(&mut self, index: usize, unit_price: Money) {
        if let Some(line) = self.lines.get_mut(index) {
            line.unit_price = if unit_price.is_negative() {
                Money::zero()
            } else {
                unit_price
            };
        }
    }

    /// Sets a purchase line's batch expiration date.
    pub fn set_expiration_date(&mut self, index: usize, date: Option<NaiveDate>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.expiration_date = date;
        }
    }

    /// Sets a purchase line's batch code.
    pub fn set_batch_code(&mut self, index: usize, batch_code: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.batch_code = batch_code.into();
        }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Aggregate total: `Σ quantity × unit_price`, recomputed fresh on every
    /// call so it can never go stale after a line mutation.
    pub fn total(&self) -> Money {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    /// Validates the ledger for submission: at least one line, and every line
    /// has a product, a quantity of at least 1, and a positive price.
    pub fn validate(&self) -> Result<(), ComposerError> {
        if self.lines.is_empty() {
            return Err(ComposerError::EmptyLedger);
        }

        let errors: Vec<_> = self
            .lines
            .iter()
            .enumerate()
            .flat_map(|(index, line)| validate_line(index, line))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ComposerError::InvalidLines(errors))
        }
    }

    /// Clears every line.
    pub fn reset(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
