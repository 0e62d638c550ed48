//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::transaction::TransactionSource;

/// The state of the REST server.
///
/// The server keeps no transaction data of its own: every page render
/// fetches a fresh snapshot from the transaction source.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl AppState {
    /// Create a new [AppState] that reads and writes transactions through `transaction_source`.
    pub fn new(transaction_source: impl TransactionSource + 'static) -> Self {
        Self {
            transaction_source: Arc::new(transaction_source),
        }
    }
}
