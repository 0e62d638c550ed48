//! Transactions and the remote store that owns them.
//!
//! This module contains:
//! - The `Transaction` model and the payload sent to the remote store
//! - The `TransactionSource` trait and its HTTP implementation
//! - The form and route handlers for creating, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod http_source;
mod redirect;
mod source;

pub use core::{DateFilter, Transaction, TransactionId, TransactionPayload, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use http_source::HttpTransactionSource;
pub use source::TransactionSource;

pub(crate) use form::{parse_date, transaction_form_fields};
