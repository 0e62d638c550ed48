//! Defines the endpoint for creating a new transaction.
use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::Response,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;

use crate::{
    AppState,
    transaction::{
        TransactionSource,
        form::TransactionForm,
        redirect::{QueryParams, redirect_after_write},
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
///
/// A form with missing fields is answered with an alert and never reaches the
/// remote store.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(error) => {
            tracing::debug!("Rejected transaction form {form:?}: {error}");
            return error.into_alert_response();
        }
    };

    match state.transaction_source.create(&payload).await {
        Ok(transaction) => {
            tracing::info!("Created transaction {}", transaction.id);
            redirect_after_write(&query_params)
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}
