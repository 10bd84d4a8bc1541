//! # Checkout Engine
//!
//! Turns a cart into a committed transaction.
//!
//! ## Settlement State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Attempt                                     │
//! │                                                                         │
//! │  1. Empty-cart guard ────────────► EmptyCart                           │
//! │  2. Tender preconditions                                               │
//! │     ├── Cash: paid ≥ total ──────► InsufficientPayment                 │
//! │     ├── Credit: customer + due ──► MissingCustomer / MissingDueDate    │
//! │     └── QRIS / Transfer: none                                          │
//! │  3. Stock re-validation ─────────► InsufficientStock (all-or-nothing)  │
//! │  4. Commit: decremented stock + appended transaction (+ accrued        │
//! │     balance for credit) in ONE atomic batch                            │
//! │  5. Cart cleared, transaction returned for receipt rendering           │
//! │                                                                         │
//! │  Every failure aborts BEFORE the commit — there is no partial state.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart's stock check at add time is only cashier feedback; step 3 is
//! the authoritative one, run against the latest catalog.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::PosResult;
use warung_core::{Cart, CoreError, Customer, Money, PaymentMethod, ProductKind, Transaction};
use warung_store::{
    Collection, CustomerRepository, ProductRepository, Storage, TransactionIdGen,
    TransactionRepository, WriteBatch,
};

/// How the cashier settles the sale.
///
/// Credit fields mirror the payment form: the customer and due date are
/// optional there, and leaving either unset is a checkout error rather
/// than a type error.
#[derive(Debug, Clone)]
pub enum Tender {
    Cash { paid_rp: Money },
    Qris,
    Transfer,
    Credit {
        customer_id: Option<i64>,
        due_date: Option<NaiveDate>,
    },
}

impl Tender {
    /// The payment method recorded on the transaction.
    pub fn method(&self) -> PaymentMethod {
        match self {
            Tender::Cash { .. } => PaymentMethod::Cash,
            Tender::Qris => PaymentMethod::Qris,
            Tender::Transfer => PaymentMethod::Transfer,
            Tender::Credit { .. } => PaymentMethod::Credit,
        }
    }
}

/// The checkout engine: cart operations that need the catalog, and the
/// settlement commit itself.
pub struct CheckoutEngine {
    storage: Arc<dyn Storage>,
    products: ProductRepository,
    transactions: TransactionRepository,
    customers: CustomerRepository,
    ids: TransactionIdGen,
}

impl CheckoutEngine {
    /// Creates a checkout engine over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        CheckoutEngine {
            products: ProductRepository::new(storage.clone()),
            transactions: TransactionRepository::new(storage.clone()),
            customers: CustomerRepository::new(storage.clone()),
            ids: TransactionIdGen::new(),
            storage,
        }
    }

    /// Adds a product to the cart, or updates its line when already there.
    ///
    /// Looks the product up in the current catalog (`ProductNotFound` when
    /// absent) and applies the cart's soft stock check. Quantity 0 removes
    /// the line.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: i64,
        quantity: i64,
        note: Option<String>,
    ) -> PosResult<()> {
        debug!(product_id, quantity, "Adding to cart");

        let product = self
            .products
            .get(product_id)?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        cart.add_or_update_line(&product, quantity, note)?;
        Ok(())
    }

    /// Completes the sale.
    ///
    /// On success the cart is cleared and the committed transaction is
    /// returned for receipt rendering. On any failure nothing is written
    /// and the cart keeps its lines.
    pub fn checkout(&self, cart: &mut Cart, tender: Tender) -> PosResult<Transaction> {
        // 1. Empty-cart guard
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let total = cart.total();
        let profit = cart.profit();
        let method = tender.method();

        // 2. Tender preconditions
        let mut paid_rp = None;
        let mut change_rp = None;
        let mut customer_id = None;
        let mut due_date = None;
        let mut customers: Option<Vec<Customer>> = None;

        match tender {
            Tender::Cash { paid_rp: paid } => {
                if paid < total {
                    return Err(CoreError::InsufficientPayment { total, paid }.into());
                }
                paid_rp = Some(paid);
                change_rp = Some(paid - total);
            }
            Tender::Qris | Tender::Transfer => {}
            Tender::Credit {
                customer_id: selected,
                due_date: deadline,
            } => {
                let selected = selected.ok_or(CoreError::MissingCustomer)?;
                let deadline = deadline.ok_or(CoreError::MissingDueDate)?;

                let ledger = self.customers.list()?;
                if !ledger.iter().any(|c| c.id == selected) {
                    return Err(CoreError::CustomerNotFound(selected).into());
                }

                customer_id = Some(selected);
                due_date = Some(deadline);
                customers = Some(ledger);
            }
        }

        // 3. Stock re-validation against the latest catalog, all-or-nothing.
        //    The decrement happens on an in-memory copy; nothing is
        //    persisted until the batch commit below.
        let mut products = self.products.list()?;
        for line in cart.lines() {
            if line.kind != ProductKind::Good {
                continue;
            }

            let product = products
                .iter_mut()
                .find(|p| p.id == line.product_id)
                .ok_or(CoreError::ProductNotFound(line.product_id))?;

            if !product.available(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock_on_hand(),
                    requested: line.quantity,
                }
                .into());
            }

            product.stock = Some(product.stock_on_hand() - line.quantity);
        }

        // 4. Commit: one batch for every touched collection
        let transaction = Transaction {
            id: self.ids.next(),
            timestamp: Utc::now(),
            payment_method: method,
            items: cart.lines().to_vec(),
            total_rp: total,
            profit_rp: profit,
            customer_id,
            paid_rp,
            change_rp,
            due_date,
            paid_off: false,
        };

        let mut transactions = self.transactions.list()?;
        transactions.push(transaction.clone());

        let mut batch = WriteBatch::new()
            .put(Collection::Products, &products)?
            .put(Collection::Transactions, &transactions)?;

        // 5. Receivable accrual for credit sales
        if let (Some(id), Some(mut ledger)) = (customer_id, customers) {
            if let Some(customer) = ledger.iter_mut().find(|c| c.id == id) {
                customer.receivable_rp += total;
            }
            batch = batch.put(Collection::Customers, &ledger)?;
        }

        self.storage.commit(batch)?;

        // 6. Post-commit
        cart.clear();
        info!(
            id = %transaction.id,
            method = %transaction.payment_method,
            total = %transaction.total_rp,
            "Checkout committed"
        );

        Ok(transaction)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::{Product, ProductKind};
    use warung_store::MemoryStore;

    fn engine_with_catalog(products: &[Product]) -> (CheckoutEngine, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let repo = ProductRepository::new(storage.clone());
        repo.save_all(products).unwrap();
        (CheckoutEngine::new(storage.clone()), storage)
    }

    fn good(id: i64, price: i64, cost: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Produk {}", id),
            kind: ProductKind::Good,
            cost_rp: Money::from_rupiah(cost),
            price_rp: Money::from_rupiah(price),
            stock: Some(stock),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let (engine, _) = engine_with_catalog(&[]);
        let mut cart = Cart::new();
        let err = engine
            .checkout(&mut cart, Tender::Cash { paid_rp: Money::from_rupiah(1_000) })
            .unwrap_err();
        assert!(matches!(err, crate::error::PosError::Core(CoreError::EmptyCart)));
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let (engine, _) = engine_with_catalog(&[]);
        let mut cart = Cart::new();
        let err = engine.add_to_cart(&mut cart, 7, 1, None).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PosError::Core(CoreError::ProductNotFound(7))
        ));
    }

    #[test]
    fn test_cash_insufficient_payment() {
        let (engine, _) = engine_with_catalog(&[good(1, 8_000, 5_000, 10)]);
        let mut cart = Cart::new();
        engine.add_to_cart(&mut cart, 1, 2, None).unwrap();

        let err = engine
            .checkout(&mut cart, Tender::Cash { paid_rp: Money::from_rupiah(10_000) })
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PosError::Core(CoreError::InsufficientPayment { .. })
        ));
        // Cart untouched on failure
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_credit_missing_customer_and_due_date() {
        let (engine, _) = engine_with_catalog(&[good(1, 8_000, 5_000, 10)]);
        let mut cart = Cart::new();
        engine.add_to_cart(&mut cart, 1, 1, None).unwrap();

        let err = engine
            .checkout(
                &mut cart,
                Tender::Credit { customer_id: None, due_date: None },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PosError::Core(CoreError::MissingCustomer)
        ));

        let err = engine
            .checkout(
                &mut cart,
                Tender::Credit { customer_id: Some(101), due_date: None },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PosError::Core(CoreError::MissingDueDate)
        ));
    }

    #[test]
    fn test_qris_has_no_precondition() {
        let (engine, _) = engine_with_catalog(&[good(1, 8_000, 5_000, 10)]);
        let mut cart = Cart::new();
        engine.add_to_cart(&mut cart, 1, 1, None).unwrap();

        let txn = engine.checkout(&mut cart, Tender::Qris).unwrap();
        assert_eq!(txn.payment_method, PaymentMethod::Qris);
        assert_eq!(txn.paid_rp, None);
        assert_eq!(txn.change_rp, None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_transaction_ids_unique() {
        let (engine, _) = engine_with_catalog(&[good(1, 8_000, 5_000, 100)]);

        let mut ids = std::collections::HashSet::new();
        for _ in 0..5 {
            let mut cart = Cart::new();
            engine.add_to_cart(&mut cart, 1, 1, None).unwrap();
            let txn = engine.checkout(&mut cart, Tender::Qris).unwrap();
            assert!(ids.insert(txn.id));
        }
    }
}
