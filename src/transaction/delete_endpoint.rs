use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    response::Response,
};

use crate::{
    AppState,
    transaction::{
        TransactionId, TransactionSource,
        redirect::{QueryParams, redirect_after_write},
    },
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The remote store that owns the transactions.
    transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// A route handler for deleting a transaction, reloads the dashboard on success.
///
/// The user has already confirmed the deletion in the browser.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    match state.transaction_source.delete(&transaction_id).await {
        Ok(()) => {
            tracing::info!("Deleted transaction {transaction_id}");
            redirect_after_write(&query_params)
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
