//! The seam between the dashboard and the remote store that owns the transactions.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{DateFilter, Transaction, TransactionId, TransactionPayload},
};

/// Reads and writes transactions held by someone else.
///
/// The dashboard never caches what a source returns: every page render asks
/// for a fresh list and every write is followed by a new read.
#[async_trait]
pub trait TransactionSource: Debug + Send + Sync {
    /// Get the transactions dated within `filter`.
    async fn list(&self, filter: &DateFilter) -> Result<Vec<Transaction>, Error>;

    /// Create a transaction and return it with the ID the store assigned.
    async fn create(&self, payload: &TransactionPayload) -> Result<Transaction, Error>;

    /// Replace the transaction `id` with `payload`.
    async fn update(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction `id`.
    async fn delete(&self, id: &TransactionId) -> Result<(), Error>;

    /// Get the store's export document, passed through untouched.
    async fn export(&self) -> Result<serde_json::Value, Error>;
}
