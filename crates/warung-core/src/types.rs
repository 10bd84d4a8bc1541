//! # Domain Types
//!
//! Core domain types used throughout Warung POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (TRX-...)   │   │  id (i64, 101+) │       │
//! │  │  kind           │   │  payment_method │   │  name, contact  │       │
//! │  │  cost/price     │   │  items[]        │   │  receivable_rp  │       │
//! │  │  stock          │   │  total/profit   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Products and customers live in separate integer numbering spaces      │
//! │  (products start at 1, receivable customers at 101).                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A transaction embeds `LineItem` copies of product name/price/cost at
//! sale time. Editing or deleting a product never rewrites history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// What a catalog entry sells: a stocked good or a service.
///
/// Services have no depletion concept; their `stock` is always `None`
/// and checkout never decrements anything for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Good,
    Service,
}

/// A catalog entry available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the catalog manager as max(ids)+1.
    pub id: i64,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Good (stocked) or service (no stock).
    pub kind: ProductKind,

    /// Unit cost basis ("modal"), used for profit calculations.
    pub cost_rp: Money,

    /// Sale price. The catalog manager enforces `price_rp >= cost_rp`.
    pub price_rp: Money,

    /// Current stock level. `Some` only for goods.
    pub stock: Option<i64>,
}

impl Product {
    /// Checks whether `quantity` units can be sold right now.
    ///
    /// Services always pass; goods pass while stock covers the request.
    pub fn available(&self, quantity: i64) -> bool {
        match self.kind {
            ProductKind::Service => true,
            ProductKind::Good => self.stock.unwrap_or(0) >= quantity,
        }
    }

    /// Stock on hand, treating services and unset stock as zero.
    pub fn stock_on_hand(&self) -> i64 {
        self.stock.unwrap_or(0)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was settled.
///
/// QRIS and bank transfer have no checkout precondition; cash requires a
/// sufficient tendered amount, and credit ("piutang") requires a customer
/// and a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Qris,
    Transfer,
    Credit,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Credit => "Credit",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product-and-quantity entry within a cart or a committed transaction.
///
/// Uses the snapshot pattern: name, price, and cost are frozen copies taken
/// when the line was added, so later catalog edits do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price_rp: Money,

    /// Unit cost at time of adding (frozen).
    pub unit_cost_rp: Money,

    pub kind: ProductKind,

    /// Quantity, always >= 1 inside a cart.
    pub quantity: i64,

    /// Optional free-text note ("less sugar", plate number, ...).
    pub note: Option<String>,
}

impl LineItem {
    /// Creates a line item snapshot from a product.
    pub fn from_product(product: &Product, quantity: i64, note: Option<String>) -> Self {
        LineItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_rp: product.price_rp,
            unit_cost_rp: product.cost_rp,
            kind: product.kind,
            quantity,
            note,
        }
    }

    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price_rp.multiply_quantity(self.quantity)
    }

    /// Line profit: (unit price − unit cost) × quantity.
    #[inline]
    pub fn line_profit(&self) -> Money {
        self.unit_price_rp
            .margin(self.unit_cost_rp)
            .multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale.
///
/// ## Invariants
/// - Created exactly once per successful checkout; totals are immutable.
/// - `paid_off` is the only field ever mutated afterwards, flipped to true
///   when the owning customer's receivable balance is fully settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// `TRX-<epoch millis>`, unique per store.
    pub id: String,

    /// Creation time (ISO-8601 in the stored document).
    pub timestamp: DateTime<Utc>,

    pub payment_method: PaymentMethod,

    /// Snapshot of the cart at checkout.
    pub items: Vec<LineItem>,

    /// Σ(unit price × qty) over items, computed at checkout.
    pub total_rp: Money,

    /// Σ((unit price − unit cost) × qty) over items.
    pub profit_rp: Money,

    /// Owning customer; set only for credit sales.
    pub customer_id: Option<i64>,

    /// Amount tendered; set only for cash sales.
    pub paid_rp: Option<Money>,

    /// Change returned; set only for cash sales.
    pub change_rp: Option<Money>,

    /// Settlement deadline; set only for credit sales.
    pub due_date: Option<NaiveDate>,

    /// True once the customer's balance has been paid down to zero.
    #[serde(default)]
    pub paid_off: bool,
}

impl Transaction {
    /// True for a credit sale that is still awaiting settlement.
    pub fn is_unpaid_credit(&self) -> bool {
        self.payment_method == PaymentMethod::Credit && !self.paid_off
    }
}

// =============================================================================
// Customer
// =============================================================================

/// An internal customer with a running receivable ("piutang") account.
///
/// ## Invariants
/// - `receivable_rp` starts at zero, never goes negative (payments are
///   capped to the current balance).
/// - Cannot be deleted while `receivable_rp` is positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier; the numbering space starts at 101.
    pub id: i64,

    pub name: String,

    /// Phone number or similar contact line.
    pub contact: String,

    /// Outstanding balance across all unpaid credit sales.
    pub receivable_rp: Money,
}

impl Customer {
    /// True while the customer still owes money.
    pub fn has_outstanding_balance(&self) -> bool {
        self.receivable_rp.is_positive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn good(stock: i64) -> Product {
        Product {
            id: 1,
            name: "Kopi Sachet".to_string(),
            kind: ProductKind::Good,
            cost_rp: Money::from_rupiah(5_000),
            price_rp: Money::from_rupiah(8_000),
            stock: Some(stock),
        }
    }

    #[test]
    fn test_good_availability() {
        let p = good(3);
        assert!(p.available(3));
        assert!(!p.available(4));
    }

    #[test]
    fn test_service_always_available() {
        let p = Product {
            id: 2,
            name: "Fotokopi".to_string(),
            kind: ProductKind::Service,
            cost_rp: Money::from_rupiah(100),
            price_rp: Money::from_rupiah(500),
            stock: None,
        };
        assert!(p.available(1_000));
    }

    #[test]
    fn test_line_item_math() {
        let p = good(10);
        let line = LineItem::from_product(&p, 2, None);
        assert_eq!(line.line_total().rupiah(), 16_000);
        assert_eq!(line.line_profit().rupiah(), 6_000);
    }

    #[test]
    fn test_payment_method_display() {
        assert_eq!(PaymentMethod::Qris.to_string(), "QRIS");
        assert_eq!(PaymentMethod::Credit.to_string(), "Credit");
    }
}
