//! # Cart Module
//!
//! The cashier's in-progress sale: an ordered list of line items with live
//! total computation.
//!
//! ## Session Scope
//! A `Cart` is an explicit, session-scoped object — it is created by the
//! caller, passed into checkout, and never stored. It is not a reservation
//! against stock: the soft stock check here is for cashier feedback, and
//! checkout re-validates against the latest catalog before committing.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action            Operation              Cart Change           │
//! │  ──────────────            ─────────              ───────────           │
//! │  Tap product card ───────► add_or_update_line ──► line added/updated   │
//! │  Edit qty to 0 ──────────► add_or_update_line ──► line removed         │
//! │  Tap remove ─────────────► remove_line ─────────► line removed         │
//! │  Tap clear / checkout ───► clear ───────────────► all lines removed    │
//! │                                                                         │
//! │  INVARIANT: at most one line per product id.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, Product, ProductKind};
use crate::validation::validate_quantity;

/// An ordered, deduplicated list of line items for one sale in progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, or updates the existing line's quantity
    /// and note if the product is already present.
    ///
    /// ## Behavior
    /// - `quantity` is the new absolute quantity for the line
    /// - Quantity 0 removes the line; negative quantities are rejected
    /// - For goods, requesting more than current stock fails with
    ///   `InsufficientStock` (soft check; checkout re-validates)
    /// - Name/price/cost are frozen into the line when it is first added
    pub fn add_or_update_line(
        &mut self,
        product: &Product,
        quantity: i64,
        note: Option<String>,
    ) -> CoreResult<()> {
        if quantity == 0 {
            self.remove_line(product.id);
            return Ok(());
        }

        validate_quantity(quantity)?;

        if product.kind == ProductKind::Good && !product.available(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock_on_hand(),
                requested: quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = quantity;
            line.note = note;
            return Ok(());
        }

        self.lines.push(LineItem::from_product(product, quantity, note));
        Ok(())
    }

    /// Removes the line for `product_id`; no-op when absent.
    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empties all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Σ(unit price × quantity) over all lines. Side-effect free.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Σ((unit price − unit cost) × quantity) over all lines.
    pub fn profit(&self) -> Money {
        self.lines.iter().map(|l| l.line_profit()).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (unique products).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
