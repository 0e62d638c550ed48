//! DRE Dashboard is a web app for reviewing an income statement: revenue,
//! expenses and losses recorded in a remote transaction store.
//!
//! This library provides a REST API that directly serves HTML pages. The
//! transactions themselves live behind another REST API which is reached
//! through a [TransactionSource].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod import;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_QUERY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    DateFilter, HttpTransactionSource, Transaction, TransactionId, TransactionPayload,
    TransactionSource, TransactionType,
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction store could not be reached, e.g. the connection was
    /// refused or the request timed out.
    #[error("could not reach the transaction store: {0}")]
    RemoteRequest(String),

    /// The transaction store answered with a non-success HTTP status code.
    #[error("the transaction store responded with status {0}")]
    RemoteStatus(u16),

    /// The transaction store answered with a body that could not be decoded.
    #[error("could not decode the transaction store response: {0}")]
    RemoteResponse(String),

    /// A transaction form was submitted without a date, category or value.
    ///
    /// A value of zero counts as missing.
    #[error("date, category and value are required")]
    MissingRequiredFields,

    /// The uploaded import file is not a JSON array.
    #[error("invalid import file: {0}")]
    InvalidImportFile(String),

    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while serializing a value as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            Error::RemoteStatus(status.as_u16())
        } else if value.is_decode() {
            Error::RemoteResponse(value.to_string())
        } else {
            Error::RemoteRequest(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::RemoteRequest(_) | Error::RemoteStatus(_) | Error::RemoteResponse(_) => {
                tracing::error!("The transaction store request failed: {}", self);
                InternalServerError {
                    description: "Transaction store unavailable",
                    fix: "The transaction store could not be reached or returned an error. \
                        Check that it is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match self {
            Error::MissingRequiredFields => (
                StatusCode::BAD_REQUEST,
                "Required fields",
                "Date, category and a non-zero value are required.",
            ),
            Error::InvalidImportFile(_) | Error::MultipartError(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid file",
                "The import file must contain a JSON array of transactions.",
            ),
            Error::RemoteStatus(404) | Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Transaction not found",
                "Try refreshing the page to see if the transaction has already been deleted.",
            ),
            Error::RemoteRequest(_) | Error::RemoteStatus(_) | Error::RemoteResponse(_) => (
                StatusCode::BAD_GATEWAY,
                "Something went wrong",
                "The transaction store could not complete the request.",
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            ),
        };

        (
            status_code,
            Alert::Error {
                message: message.to_owned(),
                details: details.to_owned(),
            }
            .into_html(),
        )
            .into_response()
    }
}
