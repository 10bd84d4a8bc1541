//! # Customer Repository
//!
//! Collection access for internal receivable customers.

use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::decode_all;
use crate::storage::{Collection, Storage, WriteBatch};
use warung_core::Customer;

/// Repository for the `customers` collection.
#[derive(Clone)]
pub struct CustomerRepository {
    storage: Arc<dyn Storage>,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository over the shared storage handle.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        CustomerRepository { storage }
    }

    /// Lists every customer in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Customer>> {
        let values = self.storage.read(Collection::Customers)?;
        decode_all(Collection::Customers, values)
    }

    /// Gets a customer by id.
    pub fn get(&self, id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Inserts a new customer or replaces the stored one with the same id.
    pub fn upsert(&self, customer: &Customer) -> StoreResult<()> {
        debug!(id = customer.id, name = %customer.name, "Upserting customer");

        let mut customers = self.list()?;
        match customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer.clone(),
            None => customers.push(customer.clone()),
        }
        self.save_all(&customers)
    }

    /// Deletes a customer by id.
    ///
    /// The balance guard (no deletion while money is owed) lives in the
    /// receivable ledger, not here.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id, "Deleting customer");

        let mut customers = self.list()?;
        let before = customers.len();
        customers.retain(|c| c.id != id);

        if customers.len() == before {
            return Err(StoreError::not_found("Customer", id));
        }

        self.save_all(&customers)
    }

    /// Replaces the whole collection.
    pub fn save_all(&self, customers: &[Customer]) -> StoreResult<()> {
        let batch = WriteBatch::new().put(Collection::Customers, customers)?;
        self.storage.commit(batch)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use warung_core::Money;

    fn customer(id: i64, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            contact: "0812xxxx".to_string(),
            receivable_rp: Money::zero(),
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let repo = CustomerRepository::new(Arc::new(MemoryStore::new()));
        repo.upsert(&customer(101, "Budi")).unwrap();

        let mut edited = customer(101, "Budi Santoso");
        edited.receivable_rp = Money::from_rupiah(50_000);
        repo.upsert(&edited).unwrap();

        let stored = repo.get(101).unwrap().unwrap();
        assert_eq!(stored.name, "Budi Santoso");
        assert_eq!(stored.receivable_rp.rupiah(), 50_000);
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_customer() {
        let repo = CustomerRepository::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            repo.delete(101),
            Err(StoreError::NotFound { .. })
        ));
    }
}
