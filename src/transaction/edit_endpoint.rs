use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use crate::{
    AppState,
    transaction::{
        TransactionId, TransactionSource,
        form::TransactionForm,
        redirect::{QueryParams, redirect_after_write},
    },
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// Replace the transaction with the submitted form and go back to the idle dashboard.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(error) => {
            tracing::debug!("Rejected form for transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state
        .transaction_source
        .update(&transaction_id, &payload)
        .await
    {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Updated transaction {transaction_id}");
    redirect_after_write(&query_params)
}
