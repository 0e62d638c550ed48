use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::{
    Error,
    transaction::{
        DateFilter, Transaction, TransactionId, TransactionPayload, TransactionSource,
    },
};

/// A call made to a [FakeTransactionSource].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SourceCall {
    List(DateFilter),
    Create(TransactionPayload),
    Update(TransactionId, TransactionPayload),
    Delete(TransactionId),
    Export,
}

/// An in-memory transaction store that records every call made to it.
#[derive(Debug, Default)]
pub(crate) struct FakeTransactionSource {
    transactions: Mutex<Vec<Transaction>>,
    calls: Mutex<Vec<SourceCall>>,
    next_id: Mutex<u32>,
    fail_reads: bool,
    fail_writes: bool,
    rejected_category: Option<String>,
}

impl FakeTransactionSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    /// Make `list` and `export` fail like an unreachable store.
    pub(crate) fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make `create`, `update` and `delete` fail with a 500 status.
    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Make `create` fail with a 400 status for payloads in `category`.
    pub(crate) fn rejecting_category(mut self, category: &str) -> Self {
        self.rejected_category = Some(category.to_owned());
        self
    }

    pub(crate) fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The calls that change the store.
    pub(crate) fn writes(&self) -> Vec<SourceCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, SourceCall::List(_) | SourceCall::Export))
            .collect()
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    fn record(&self, call: SourceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TransactionSource for FakeTransactionSource {
    async fn list(&self, filter: &DateFilter) -> Result<Vec<Transaction>, Error> {
        self.record(SourceCall::List(*filter));

        if self.fail_reads {
            return Err(Error::RemoteRequest("connection refused".to_owned()));
        }

        Ok(self
            .transactions()
            .into_iter()
            .filter(|transaction| filter.from.is_none_or(|from| transaction.date >= from))
            .filter(|transaction| filter.to.is_none_or(|to| transaction.date <= to))
            .collect())
    }

    async fn create(&self, payload: &TransactionPayload) -> Result<Transaction, Error> {
        self.record(SourceCall::Create(payload.clone()));

        if self.fail_writes {
            return Err(Error::RemoteStatus(500));
        }

        if self.rejected_category.as_deref() == Some(payload.category.as_str()) {
            return Err(Error::RemoteStatus(400));
        }

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            TransactionId::new(format!("fake-{next_id}"))
        };

        let transaction = Transaction {
            id,
            date: payload.date,
            kind: payload.kind,
            category: payload.category.clone(),
            description: Some(payload.description.clone()),
            value: payload.value,
        };
        self.transactions.lock().unwrap().push(transaction.clone());

        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        self.record(SourceCall::Update(id.clone(), payload.clone()));

        if self.fail_writes {
            return Err(Error::RemoteStatus(500));
        }

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|transaction| &transaction.id == id)
            .ok_or(Error::RemoteStatus(404))?;

        transaction.date = payload.date;
        transaction.kind = payload.kind;
        transaction.category = payload.category.clone();
        transaction.description = Some(payload.description.clone());
        transaction.value = payload.value;

        Ok(transaction.clone())
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), Error> {
        self.record(SourceCall::Delete(id.clone()));

        if self.fail_writes {
            return Err(Error::RemoteStatus(500));
        }

        let mut transactions = self.transactions.lock().unwrap();
        let count_before = transactions.len();
        transactions.retain(|transaction| &transaction.id != id);

        if transactions.len() == count_before {
            return Err(Error::RemoteStatus(404));
        }

        Ok(())
    }

    async fn export(&self) -> Result<serde_json::Value, Error> {
        self.record(SourceCall::Export);

        if self.fail_reads {
            return Err(Error::RemoteRequest("connection refused".to_owned()));
        }

        Ok(json!(self.transactions()))
    }
}
