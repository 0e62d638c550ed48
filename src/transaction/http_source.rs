//! A [TransactionSource] backed by the remote REST API.

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Error,
    endpoints::format_endpoint,
    transaction::{DateFilter, Transaction, TransactionId, TransactionPayload, TransactionSource},
};

const REMOTE_TRANSACTIONS: &str = "/api/transactions";
const REMOTE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
const REMOTE_EXPORT: &str = "/api/export";

/// Talks to the transaction store over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransactionSource {
    /// Create a client for the store at `base_url`, e.g. "http://localhost:3000".
    ///
    /// Requests wait forever unless `timeout` is set.
    ///
    /// # Errors
    ///
    /// Returns [Error::RemoteRequest] if the HTTP client could not be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    /// Records that do not decode as a [Transaction] are skipped with a
    /// warning so that one bad record does not hide the rest.
    async fn list(&self, filter: &DateFilter) -> Result<Vec<Transaction>, Error> {
        let records = self
            .client
            .get(self.url(REMOTE_TRANSACTIONS))
            .query(filter)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<serde_json::Value>>()
            .await?;
        let record_count = records.len();

        let transactions: Vec<Transaction> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value(record)
                    .inspect_err(|error| {
                        tracing::warn!("Skipping transaction record {index}: {error}")
                    })
                    .ok()
            })
            .collect();

        tracing::debug!(
            "Fetched {} transactions, skipped {}",
            transactions.len(),
            record_count - transactions.len()
        );

        Ok(transactions)
    }

    async fn create(&self, payload: &TransactionPayload) -> Result<Transaction, Error> {
        let transaction = self
            .client
            .post(self.url(REMOTE_TRANSACTIONS))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Transaction>()
            .await?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let transaction = self
            .client
            .put(self.url(&format_endpoint(REMOTE_TRANSACTION, id)))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Transaction>()
            .await?;

        tracing::debug!("Updated transaction {id}");

        Ok(transaction)
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), Error> {
        self.client
            .delete(self.url(&format_endpoint(REMOTE_TRANSACTION, id)))
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Deleted transaction {id}");

        Ok(())
    }

    async fn export(&self) -> Result<serde_json::Value, Error> {
        let document = self
            .client
            .get(self.url(REMOTE_EXPORT))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        Ok(document)
    }
}
