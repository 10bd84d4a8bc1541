//! # Receivable Ledger
//!
//! Customer accounts and credit (piutang) management.
//!
//! ## Balance Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Credit checkout ──► receivable_rp += transaction total                 │
//! │  Payment         ──► receivable_rp -= amount (capped at the balance)   │
//! │                                                                         │
//! │  When the balance reaches ZERO, every unpaid credit transaction of     │
//! │  that customer is flipped to paid_off in the SAME commit. Payments     │
//! │  are tracked against the running balance, not individual invoices.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::PosResult;
use warung_core::{
    validation::{validate_customer_name, validate_payment_amount},
    CoreError, Customer, Money,
};
use warung_store::{
    next_customer_id, Collection, CustomerRepository, Storage, TransactionRepository, WriteBatch,
};

/// Customer form input. `id` is `None` when registering a new customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub id: Option<i64>,
    pub name: String,
    pub contact: String,
}

/// Manages customer accounts and their receivable balances.
pub struct ReceivableLedger {
    storage: Arc<dyn Storage>,
    customers: CustomerRepository,
    transactions: TransactionRepository,
}

impl ReceivableLedger {
    /// Creates a ledger over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        ReceivableLedger {
            customers: CustomerRepository::new(storage.clone()),
            transactions: TransactionRepository::new(storage.clone()),
            storage,
        }
    }

    /// Registers a new customer or edits an existing one.
    ///
    /// Editing never touches the receivable balance; only checkout and
    /// [`record_payment`](Self::record_payment) move it.
    pub fn upsert_customer(&self, input: CustomerInput) -> PosResult<Customer> {
        let name = validate_customer_name(&input.name).map_err(CoreError::from)?;
        let contact = input.contact.trim().to_string();

        let mut customers = self.customers.list()?;

        let customer = match input.id {
            Some(id) => {
                let existing = customers
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(CoreError::CustomerNotFound(id))?;
                existing.name = name;
                existing.contact = contact;
                existing.clone()
            }
            None => {
                let customer = Customer {
                    id: next_customer_id(&customers),
                    name,
                    contact,
                    receivable_rp: Money::zero(),
                };
                customers.push(customer.clone());
                customer
            }
        };

        self.customers.save_all(&customers)?;
        info!(id = customer.id, name = %customer.name, "Customer saved");
        Ok(customer)
    }

    /// Deletes a customer.
    ///
    /// Refused while the customer still owes money, so no receivable can
    /// silently vanish from the books.
    pub fn delete_customer(&self, id: i64) -> PosResult<()> {
        let customers = self.customers.list()?;
        let customer = customers
            .iter()
            .find(|c| c.id == id)
            .ok_or(CoreError::CustomerNotFound(id))?;

        if customer.has_outstanding_balance() {
            return Err(CoreError::OutstandingBalance {
                id,
                balance: customer.receivable_rp,
            }
            .into());
        }

        let remaining: Vec<Customer> =
            customers.iter().filter(|c| c.id != id).cloned().collect();
        self.customers.save_all(&remaining)?;
        info!(id, "Customer deleted");
        Ok(())
    }

    /// Records a payment against a customer's balance.
    ///
    /// The amount must be positive and no larger than the balance. When
    /// the payment clears the balance, all of the customer's unpaid
    /// credit transactions are marked paid off in the same commit.
    pub fn record_payment(&self, customer_id: i64, amount: Money) -> PosResult<Customer> {
        validate_payment_amount(amount).map_err(CoreError::from)?;

        let mut customers = self.customers.list()?;
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or(CoreError::CustomerNotFound(customer_id))?;

        if amount > customer.receivable_rp {
            return Err(CoreError::OverPayment {
                balance: customer.receivable_rp,
                requested: amount,
            }
            .into());
        }

        customer.receivable_rp -= amount;
        let settled = customer.receivable_rp.is_zero();
        let updated = customer.clone();
        debug!(
            customer_id,
            paid = %amount,
            balance = %updated.receivable_rp,
            settled,
            "Payment recorded"
        );

        let mut batch = WriteBatch::new().put(Collection::Customers, &customers)?;

        if settled {
            let mut transactions = self.transactions.list()?;
            for txn in transactions
                .iter_mut()
                .filter(|t| t.customer_id == Some(customer_id) && t.is_unpaid_credit())
            {
                txn.paid_off = true;
            }
            batch = batch.put(Collection::Transactions, &transactions)?;
        }

        self.storage.commit(batch)?;
        Ok(updated)
    }

    /// All customers, in insertion order.
    pub fn list_customers(&self) -> PosResult<Vec<Customer>> {
        Ok(self.customers.list()?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
