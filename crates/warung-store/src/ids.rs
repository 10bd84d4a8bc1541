//! # Id Generation
//!
//! Three independent numbering schemes:
//!
//! - product ids: positive integers, max(existing)+1, starting at 1
//! - customer ids: positive integers, max(existing)+1, starting at 101
//! - transaction ids: `TRX-<epoch millis>` with a monotonic guard
//!
//! Product and customer counters never interact; they live in separate
//! collections and separate ranges.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use warung_core::{Customer, Product, FIRST_CUSTOMER_ID, FIRST_PRODUCT_ID};

/// Next product id: one past the highest stored id, 1 when empty.
pub fn next_product_id(products: &[Product]) -> i64 {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(FIRST_PRODUCT_ID, |max| max + 1)
}

/// Next customer id: one past the highest stored id, 101 when empty.
pub fn next_customer_id(customers: &[Customer]) -> i64 {
    customers
        .iter()
        .map(|c| c.id)
        .max()
        .map_or(FIRST_CUSTOMER_ID, |max| max + 1)
}

/// Generator for transaction ids of the form `TRX-<epoch millis>`.
///
/// The raw wall-clock form collides when two checkouts complete within the
/// same millisecond. The generator keeps the last issued value and bumps
/// past it when the clock has not advanced, so ids stay unique and strictly
/// increasing for the life of the process while keeping the original
/// format.
#[derive(Debug, Default)]
pub struct TransactionIdGen {
    last_millis: AtomicI64,
}

impl TransactionIdGen {
    /// Creates a generator.
    pub fn new() -> Self {
        TransactionIdGen::default()
    }

    /// Issues the next transaction id.
    pub fn next(&self) -> String {
        let now = Utc::now().timestamp_millis();

        // Claim a value strictly above everything issued so far.
        let mut last = self.last_millis.load(Ordering::SeqCst);
        let issued = loop {
            let candidate = if now > last { now } else { last + 1 };
            match self.last_millis.compare_exchange(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break candidate,
                Err(actual) => last = actual,
            }
        };

        format!("TRX-{}", issued)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
