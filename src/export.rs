//! Downloading every transaction as a JSON file.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, transaction::TransactionSource};

/// The name the browser saves the export under.
pub(crate) const EXPORT_FILE_NAME: &str = "dre_export.json";

/// The state needed for exporting transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// Route handler that sends the store's export as a pretty printed JSON attachment.
pub async fn export_transactions(State(state): State<ExportState>) -> Response {
    match export_json(state.transaction_source.as_ref()).await {
        Ok(json) => (
            [
                (CONTENT_TYPE, "application/json".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            json,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not export transactions: {error}");
            error.into_response()
        }
    }
}

async fn export_json(source: &dyn TransactionSource) -> Result<String, Error> {
    let export = source.export().await?;

    serde_json::to_string_pretty(&export)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))
}
