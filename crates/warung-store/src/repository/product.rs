//! # Product Repository
//!
//! Collection access for catalog entries.
//!
//! ## Key Operations
//! - Whole-catalog list (insertion order preserved from storage)
//! - Lookup by id
//! - Upsert / delete / full replacement

use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::decode_all;
use crate::storage::{Collection, Storage, WriteBatch};
use warung_core::Product;

/// Repository for the `products` collection.
#[derive(Clone)]
pub struct ProductRepository {
    storage: Arc<dyn Storage>,
}

impl ProductRepository {
    /// Creates a new ProductRepository over the shared storage handle.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        ProductRepository { storage }
    }

    /// Lists every product in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Product>> {
        let values = self.storage.read(Collection::Products)?;
        decode_all(Collection::Products, values)
    }

    /// Gets a product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - product found
    /// * `Ok(None)` - product not found
    pub fn get(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Inserts a new product or replaces the stored one with the same id.
    pub fn upsert(&self, product: &Product) -> StoreResult<()> {
        debug!(id = product.id, name = %product.name, "Upserting product");

        let mut products = self.list()?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        self.save_all(&products)
    }

    /// Deletes a product by id.
    ///
    /// Historical transactions keep their snapshots; nothing else is
    /// touched.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id, "Deleting product");

        let mut products = self.list()?;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        self.save_all(&products)
    }

    /// Replaces the whole collection.
    pub fn save_all(&self, products: &[Product]) -> StoreResult<()> {
        let batch = WriteBatch::new().put(Collection::Products, products)?;
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
    use warung_core::{Money, ProductKind};

    fn repo() -> ProductRepository {
        ProductRepository::new(Arc::new(MemoryStore::new()))
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            kind: ProductKind::Good,
            cost_rp: Money::from_rupiah(5_000),
            price_rp: Money::from_rupiah(8_000),
            stock: Some(10),
        }
    }

    #[test]
    fn test_list_empty_store() {
        assert!(repo().list().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_insert_then_edit() {
        let repo = repo();
        repo.upsert(&product(1, "Kopi Sachet")).unwrap();
        repo.upsert(&product(2, "Teh Botol")).unwrap();

        let mut edited = product(1, "Kopi Sachet Jumbo");
        edited.stock = Some(4);
        repo.upsert(&edited).unwrap();

        let products = repo.list().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Kopi Sachet Jumbo");
        assert_eq!(products[0].stock, Some(4));
        // Insertion order preserved
        assert_eq!(products[1].id, 2);
    }

    #[test]
    fn test_get() {
        let repo = repo();
        repo.upsert(&product(1, "Kopi Sachet")).unwrap();

        assert!(repo.get(1).unwrap().is_some());
        assert!(repo.get(99).unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let repo = repo();
        repo.upsert(&product(1, "Kopi Sachet")).unwrap();

        repo.delete(1).unwrap();
        assert!(repo.list().unwrap().is_empty());

        assert!(matches!(
            repo.delete(1),
            Err(StoreError::NotFound { .. })
        ));
    }
}
