//! # Transaction Repository
//!
//! Collection access for completed sales.
//!
//! Transactions are append-only apart from the `paid_off` flag, which the
//! receivable ledger flips in bulk when a customer's balance clears. There
//! is no edit or void path.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::repository::decode_all;
use crate::storage::{Collection, Storage, WriteBatch};
use warung_core::Transaction;

/// Repository for the `transactions` collection.
#[derive(Clone)]
pub struct TransactionRepository {
    storage: Arc<dyn Storage>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository over the shared storage handle.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        TransactionRepository { storage }
    }

    /// Lists every transaction in commit order (oldest first).
    pub fn list(&self) -> StoreResult<Vec<Transaction>> {
        let values = self.storage.read(Collection::Transactions)?;
        decode_all(Collection::Transactions, values)
    }

    /// Gets a transaction by id.
    pub fn get(&self, id: &str) -> StoreResult<Option<Transaction>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    /// Appends a completed transaction.
    ///
    /// Only used outside checkout (e.g. imports); the checkout engine
    /// appends through its atomic multi-collection batch instead.
    pub fn append(&self, transaction: &Transaction) -> StoreResult<()> {
        debug!(id = %transaction.id, total = %transaction.total_rp, "Appending transaction");

        let mut transactions = self.list()?;
        transactions.push(transaction.clone());
        self.save_all(&transactions)
    }

    /// Replaces the whole collection.
    pub fn save_all(&self, transactions: &[Transaction]) -> StoreResult<()> {
        let batch = WriteBatch::new().put(Collection::Transactions, transactions)?;
        self.storage.commit(batch)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
