//! # Error Types
//!
//! Domain-specific error types for warung-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warung-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  warung-store errors (separate crate)                                  │
//! │  └── StoreError       - Document store failures                        │
//! │                                                                         │
//! │  warung-pos errors (service layer)                                     │
//! │  └── PosError         - Wraps both for callers                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PosError → operator message       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, balances, ...)
//! 3. Errors are enum variants, never String
//! 4. Every error aborts the triggering operation before any state change

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Each variant maps to a message the operator sees; the triggering
/// operation performs no writes when one of these is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A good's requested quantity exceeds current stock.
    ///
    /// Raised both as a soft check when adding to the cart and as the
    /// all-or-nothing re-validation during checkout.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cash tendered does not cover the total.
    #[error("Insufficient payment: total {total}, paid {paid}")]
    InsufficientPayment { total: Money, paid: Money },

    /// Credit sale submitted without selecting a customer.
    #[error("Credit sale requires a customer")]
    MissingCustomer,

    /// Credit sale submitted without a due date.
    #[error("Credit sale requires a due date")]
    MissingDueDate,

    /// Product id not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Customer id not present in the ledger.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Payment exceeds the customer's outstanding balance.
    #[error("Payment {requested} exceeds outstanding balance {balance}")]
    OverPayment { balance: Money, requested: Money },

    /// Customer still owes money and cannot be deleted.
    #[error("Customer {id} has an outstanding balance of {balance}")]
    OutstandingBalance { id: i64, balance: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Sale price below cost basis.
    #[error("price {price} must not be below cost {cost}")]
    PriceBelowCost { price: Money, cost: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
