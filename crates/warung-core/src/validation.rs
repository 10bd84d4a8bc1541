//! # Validation Module
//!
//! Input validation for operator-supplied values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Business rule validation before any write                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Service layer guards (stock re-check, balance caps)          │
//! │                                                                         │
//! │  Every failure aborts the operation with no state change.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_name("name", name, 200)
}

/// Validates a customer name. Same rules as product names but capped at 100.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    validate_name("name", name, 100)
}

fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the cost/price pair of a catalog entry.
///
/// ## Rules
/// - Cost must not be negative
/// - Price must not be negative
/// - Price must be >= cost (selling below cost is rejected)
pub fn validate_price_pair(cost: Money, price: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::Negative {
            field: "cost".to_string(),
        });
    }

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price < cost {
        return Err(ValidationError::PriceBelowCost { price, cost });
    }

    Ok(())
}

/// Validates a stock level for a good.
///
/// ## Rules
/// - Must be present (goods always carry a stock figure)
/// - Must not be negative; zero is allowed (sold out)
pub fn validate_stock(stock: Option<i64>) -> ValidationResult<i64> {
    let stock = stock.ok_or_else(|| ValidationError::Required {
        field: "stock".to_string(),
    })?;

    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(stock)
}

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be >= 1 (quantity zero is expressed as removing the line)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount (cash tendered or a debt installment).
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(
            validate_product_name("  Kopi Sachet ").unwrap(),
            "Kopi Sachet"
        );
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_pair() {
        let cost = Money::from_rupiah(5_000);
        let price = Money::from_rupiah(8_000);
        assert!(validate_price_pair(cost, price).is_ok());
        assert!(validate_price_pair(cost, cost).is_ok());

        // Price below cost is rejected
        assert!(validate_price_pair(price, cost).is_err());
        assert!(validate_price_pair(Money::from_rupiah(-1), price).is_err());
        assert!(validate_price_pair(cost, Money::from_rupiah(-1)).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock(Some(0)).unwrap(), 0);
        assert_eq!(validate_stock(Some(10)).unwrap(), 10);
        assert!(validate_stock(None).is_err());
        assert!(validate_stock(Some(-1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_rupiah(1_000)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_rupiah(-1_000)).is_err());
    }
}
