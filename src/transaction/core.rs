//! The transaction model shared by the dashboard, the endpoints and the remote source.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

/// Whether a transaction adds to or subtracts from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Revenue,
    /// Money spent running the business.
    Expense,
    /// Money lost, e.g. theft or damaged stock.
    Loss,
}

impl TransactionType {
    /// Every transaction type in display order.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Revenue,
        TransactionType::Expense,
        TransactionType::Loss,
    ];

    /// The wire name of the type, e.g. "revenue".
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Revenue => "revenue",
            TransactionType::Expense => "expense",
            TransactionType::Loss => "loss",
        }
    }

    /// The human readable name of the type, e.g. "Revenue".
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Revenue => "Revenue",
            TransactionType::Expense => "Expense",
            TransactionType::Loss => "Loss",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifier the remote store assigned to a transaction.
///
/// The store may send the ID as a JSON number or a string. Either way it is
/// kept as an opaque string and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap `id` as a transaction ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as it should appear in URLs and forms.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(id) => TransactionId(id.to_string()),
            RawId::Text(id) => TransactionId(id),
        })
    }
}

/// A transaction as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID assigned by the remote store.
    pub id: TransactionId,
    /// The date the transaction happened.
    pub date: Date,
    /// Whether this is revenue, an expense or a loss.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Free text used to group losses.
    pub category: String,
    /// Optional free text. A missing or null description reads as `None`.
    #[serde(default)]
    pub description: Option<String>,
    /// The amount of the transaction.
    pub value: f64,
}

impl Transaction {
    /// The description, or an empty string if there is none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// The body that would recreate this transaction.
    pub fn to_payload(&self) -> TransactionPayload {
        TransactionPayload {
            date: self.date,
            kind: self.kind,
            category: self.category.clone(),
            description: self.description().to_owned(),
            value: self.value,
        }
    }
}

/// The body sent to the remote store to create or update a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// The date the transaction happened.
    pub date: Date,
    /// Whether this is revenue, an expense or a loss.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Free text used to group losses.
    pub category: String,
    /// Free text, may be empty.
    pub description: String,
    /// The amount of the transaction.
    pub value: f64,
}

/// Optional inclusive bounds on the transaction date.
///
/// Serializes to the `from` and `to` query parameters understood by the
/// remote store, omitting missing bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateFilter {
    /// The earliest date to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Date>,
    /// The latest date to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
}

impl DateFilter {
    /// Whether neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}
