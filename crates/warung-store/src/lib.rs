//! # warung-store: Document Store Layer for Warung POS
//!
//! This crate provides persisted-state access for Warung POS: three named
//! JSON collections with whole-collection read/replace semantics.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warung POS Data Flow                             │
//! │                                                                         │
//! │  Service operation (checkout, record_payment, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    warung-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │ Repositories  │    │     Ids      │  │   │
//! │  │   │ (storage.rs)  │    │ (repository/) │    │  (ids.rs)    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ MemoryStore   │◄───│ ProductRepo   │    │ max+1        │  │   │
//! │  │   │ JsonFileStore │    │ TxnRepo       │    │ TRX-<millis> │  │   │
//! │  │   │ WriteBatch    │    │ CustomerRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON document: { products, transactions, customers }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The `Storage` trait, `WriteBatch`, memory/file backends
//! - [`repository`] - Typed per-entity repositories
//! - [`ids`] - Id generation for the three numbering schemes
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use warung_store::{MemoryStore, ProductRepository};
//!
//! let storage = Arc::new(MemoryStore::new());
//! let products = ProductRepository::new(storage);
//! assert!(products.list().unwrap().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use ids::{next_customer_id, next_product_id, TransactionIdGen};
pub use storage::{Collection, JsonFileStore, MemoryStore, Storage, WriteBatch};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
