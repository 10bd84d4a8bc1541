//! # Repositories
//!
//! Typed access to the three collections, one repository per entity.
//!
//! Each repository wraps the shared [`Storage`](crate::storage::Storage)
//! handle and translates between domain types and the raw JSON records.
//! Single-entity mutations go through a read/replace cycle here;
//! multi-collection commits (checkout, debt payoff) are assembled by the
//! service layer and handed to `Storage::commit` directly.

pub mod customer;
pub mod product;
pub mod transaction;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::storage::Collection;

/// Decodes a whole collection into typed records.
fn decode_all<T: DeserializeOwned>(collection: Collection, values: Vec<Value>) -> StoreResult<Vec<T>> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Decode {
                collection: collection.name(),
                source,
            })
        })
        .collect()
}
