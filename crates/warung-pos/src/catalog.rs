//! # Catalog Manager
//!
//! Create, edit, delete, and list catalog entries.
//!
//! ## Validation Before Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  upsert_product(input)                                                  │
//! │       │                                                                 │
//! │       ├── name empty? ──────────────► ValidationError, no write        │
//! │       ├── cost/price negative? ─────► ValidationError, no write        │
//! │       ├── price < cost? ────────────► ValidationError, no write        │
//! │       ├── good without stock? ──────► ValidationError, no write        │
//! │       │                                                                 │
//! │       ├── input.id = None ──────────► assign max(ids)+1, append        │
//! │       └── input.id = Some(id) ──────► replace in place, keep the id    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PosResult;
use warung_core::validation::{validate_price_pair, validate_product_name, validate_stock};
use warung_core::{CoreError, Money, Product, ProductKind};
use warung_store::{next_product_id, ProductRepository, Storage};

/// Operator input for creating or editing a product.
///
/// `id` is `None` when creating; editing preserves the existing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub id: Option<i64>,
    pub name: String,
    pub kind: ProductKind,
    pub cost_rp: Money,
    pub price_rp: Money,
    /// Required for goods, ignored for services.
    pub stock: Option<i64>,
}

/// Optional listing filter; `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive name substring.
    pub name_contains: Option<String>,
    pub kind: Option<ProductKind>,
}

/// Catalog operations over the shared storage handle.
#[derive(Clone)]
pub struct CatalogManager {
    products: ProductRepository,
}

impl CatalogManager {
    /// Creates a catalog manager over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        CatalogManager {
            products: ProductRepository::new(storage),
        }
    }

    /// Creates or edits a product.
    ///
    /// All validation happens before any write; a failure leaves the
    /// catalog untouched. Returns the persisted product (with its
    /// assigned id on create).
    pub fn upsert_product(&self, input: ProductInput) -> PosResult<Product> {
        let name = validate_product_name(&input.name)?;
        validate_price_pair(input.cost_rp, input.price_rp)?;

        let stock = match input.kind {
            ProductKind::Good => Some(validate_stock(input.stock)?),
            ProductKind::Service => None,
        };

        let mut products = self.products.list()?;

        let product = match input.id {
            Some(id) => {
                let existing = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(CoreError::ProductNotFound(id))?;
                existing.name = name;
                existing.kind = input.kind;
                existing.cost_rp = input.cost_rp;
                existing.price_rp = input.price_rp;
                existing.stock = stock;
                existing.clone()
            }
            None => {
                let product = Product {
                    id: next_product_id(&products),
                    name,
                    kind: input.kind,
                    cost_rp: input.cost_rp,
                    price_rp: input.price_rp,
                    stock,
                };
                products.push(product.clone());
                product
            }
        };

        self.products.save_all(&products)?;
        info!(id = product.id, name = %product.name, "Product saved");
        Ok(product)
    }

    /// Deletes a product by id.
    ///
    /// Confirmation is the presentation layer's job. Historical
    /// transactions keep their snapshots, and lines already in a cart are
    /// not guarded against — checkout re-validates.
    pub fn delete_product(&self, id: i64) -> PosResult<()> {
        self.products.delete(id)?;
        info!(id, "Product deleted");
        Ok(())
    }

    /// Lists products matching `filter`, in insertion order.
    pub fn list_products(&self, filter: &ProductFilter) -> PosResult<Vec<Product>> {
        let needle = filter
            .name_contains
            .as_deref()
            .map(|s| s.trim().to_lowercase());

        let products = self
            .products
            .list()?
            .into_iter()
            .filter(|p| match &needle {
                Some(needle) => p.name.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|p| match filter.kind {
                Some(kind) => p.kind == kind,
                None => true,
            })
            .collect();

        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
