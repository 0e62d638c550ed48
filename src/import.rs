//! Importing transactions from a JSON file.
//!
//! The file must hold a JSON array of transactions. Each element is sent to
//! the transaction store on its own, one after the other, and the outcome of
//! every element is reported back once the whole file has been processed.

use std::{
    sync::{Arc, OnceLock},
    time::{Duration, Instant},
};

use axum::{
    body::Bytes,
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use numfmt::{Formatter, Precision};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    AppState, Error,
    alert::Alert,
    transaction::{TransactionPayload, TransactionSource, TransactionType, parse_date},
};

/// The htmx event that makes the dashboard reload its content.
pub(crate) const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// One element of an import file.
#[derive(Debug, Deserialize)]
struct ImportItem {
    date: String,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
    #[serde(default)]
    description: Option<String>,
    value: ImportValue,
}

/// Import files may hold the value as a number or as numeric text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportValue {
    Number(f64),
    Text(String),
}

impl ImportValue {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            ImportValue::Number(value) => *value,
            ImportValue::Text(text) => text.trim().parse().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

impl ImportItem {
    fn into_payload(self) -> Result<TransactionPayload, String> {
        let date =
            parse_date(&self.date).ok_or_else(|| format!("invalid date {:?}", self.date))?;
        let value = self
            .value
            .to_f64()
            .ok_or_else(|| format!("invalid value {:?}", self.value))?;

        Ok(TransactionPayload {
            date,
            kind: self.kind,
            category: self.category,
            description: self.description.unwrap_or_default(),
            value,
        })
    }
}

/// How many elements of an import file ended up where.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImportReport {
    /// Elements the store accepted.
    pub created: usize,
    /// Elements that could not be turned into a transaction and were never sent.
    pub rejected: usize,
    /// Elements the store refused or that failed in transit.
    pub failed: usize,
}

impl ImportReport {
    fn total(&self) -> usize {
        self.created + self.rejected + self.failed
    }

    fn into_alert(self, duration: Duration) -> Alert {
        let duration_ms = get_thousands_separator_formatter().fmt_string(duration.as_millis());
        let not_imported = self.rejected + self.failed;

        match (self.created, not_imported) {
            (0, 0) => Alert::SuccessSimple {
                message: "The file did not contain any transactions.".to_owned(),
            },
            (created, 0) => Alert::Success {
                message: "Import completed successfully!".to_owned(),
                details: format!("Imported {created} transactions in {duration_ms}ms."),
            },
            (created, not_imported) => Alert::Error {
                message: "Import finished with errors".to_owned(),
                details: format!(
                    "Imported {created} of {} transactions in {duration_ms}ms. \
                    {not_imported} could not be imported, check the server logs for details.",
                    self.total()
                ),
            },
        }
    }
}

/// Route handler for importing transactions from a JSON file.
///
/// Responds with an alert describing the outcome and triggers a refresh of
/// the dashboard content.
pub async fn import_transactions(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Response {
    let start_time = Instant::now();

    let items = match read_import_file(&mut multipart)
        .await
        .and_then(|data| parse_import_file(&data))
    {
        Ok(items) => items,
        Err(error) => {
            tracing::debug!("Rejected import file: {error}");
            return error.into_alert_response();
        }
    };

    let report = import_items(state.transaction_source.as_ref(), items).await;
    let duration = start_time.elapsed();

    tracing::info!(
        "Import completed in {}ms: {} created, {} rejected, {} failed",
        duration.as_millis(),
        report.created,
        report.rejected,
        report.failed
    );

    let status_code = if report.created > 0 {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    (
        status_code,
        [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)],
        report.into_alert(duration).into_html(),
    )
        .into_response()
}

async fn read_import_file(multipart: &mut Multipart) -> Result<Bytes, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.to_string())
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("<unnamed>").to_owned();
        let data = field.bytes().await.map_err(|error| {
            tracing::error!("Could not read data from multipart form field: {error}");
            Error::MultipartError(error.to_string())
        })?;

        tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

        return Ok(data);
    }

    Err(Error::InvalidImportFile("no file was uploaded".to_owned()))
}

/// Parse an import file into its elements.
///
/// # Errors
///
/// Returns [Error::InvalidImportFile] if the file is not JSON or is not an array.
pub(crate) fn parse_import_file(data: &[u8]) -> Result<Vec<Value>, Error> {
    match serde_json::from_slice::<Value>(data) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(Error::InvalidImportFile(
            "expected a JSON array of transactions".to_owned(),
        )),
        Err(error) => Err(Error::InvalidImportFile(error.to_string())),
    }
}

/// Create each element in order, waiting for one to finish before sending the next.
async fn import_items(source: &dyn TransactionSource, items: Vec<Value>) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, item) in items.into_iter().enumerate() {
        let payload = match serde_json::from_value::<ImportItem>(item)
            .map_err(|error| error.to_string())
            .and_then(ImportItem::into_payload)
        {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("Skipping import item {index}: {error}");
                report.rejected += 1;
                continue;
            }
        };

        match source.create(&payload).await {
            Ok(_) => report.created += 1,
            Err(error) => {
                tracing::warn!("Could not import item {index}: {error}");
                report.failed += 1;
            }
        }
    }

    report
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .expect("',' is a valid separator")
            .precision(Precision::Decimals(0))
    })
}
