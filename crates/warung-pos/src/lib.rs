//! # warung-pos: Service Layer for Warung POS
//!
//! Wires the pure business logic of `warung-core` to the document store
//! in `warung-store` and exposes the operations a till frontend calls.
//!
//! ## Services
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      warung-pos services                                │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ Catalog      │ │ Checkout     │ │ Receivable   │ │ Reporting    │  │
//! │  │ Manager      │ │ Engine       │ │ Ledger       │ │ (read-only)  │  │
//! │  │              │ │              │ │              │ │              │  │
//! │  │ upsert       │ │ add_to_cart  │ │ upsert       │ │ dashboard    │  │
//! │  │ delete       │ │ checkout     │ │ payment      │ │ daily sales  │  │
//! │  │ list/filter  │ │ (atomic)     │ │ delete       │ │ ranking      │  │
//! │  └──────┬───────┘ └──────┬───────┘ └──────┬───────┘ └──────┬───────┘  │
//! │         │                │                │                │          │
//! │         └────────────────┴───────┬────────┴────────────────┘          │
//! │                                  ▼                                     │
//! │                      Arc<dyn Storage> (warung-store)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All services share one `Arc<dyn Storage>`; anything touching more than
//! one collection persists through a single atomic `WriteBatch`.
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use warung_core::{Cart, Money, ProductKind};
//! use warung_pos::{CatalogManager, CheckoutEngine, ProductInput, Tender};
//! use warung_store::MemoryStore;
//!
//! let storage = Arc::new(MemoryStore::new());
//! let catalog = CatalogManager::new(storage.clone());
//! let engine = CheckoutEngine::new(storage);
//!
//! let product = catalog
//!     .upsert_product(ProductInput {
//!         id: None,
//!         name: "Kopi Sachet".to_string(),
//!         kind: ProductKind::Good,
//!         cost_rp: Money::from_rupiah(5_000),
//!         price_rp: Money::from_rupiah(8_000),
//!         stock: Some(10),
//!     })
//!     .unwrap();
//!
//! let mut cart = Cart::new();
//! engine.add_to_cart(&mut cart, product.id, 2, None).unwrap();
//! let txn = engine
//!     .checkout(&mut cart, Tender::Cash { paid_rp: Money::from_rupiah(20_000) })
//!     .unwrap();
//! assert_eq!(txn.total_rp, Money::from_rupiah(16_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ledger;
pub mod receipt;
pub mod report;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogManager, ProductFilter, ProductInput};
pub use checkout::{CheckoutEngine, Tender};
pub use error::{PosError, PosResult};
pub use ledger::{CustomerInput, ReceivableLedger};
pub use receipt::render_receipt;
pub use report::{
    DailySales, DashboardSummary, OutstandingReceivable, ProductRank, ReportFilter, Reporting,
};
