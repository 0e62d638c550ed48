#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod source;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{
    assert_content_type, assert_hx_redirect, assert_hx_trigger, assert_status_ok, get_header,
};
pub(crate) use source::{FakeTransactionSource, SourceCall};

use time::Date;

use crate::transaction::{Transaction, TransactionId, TransactionType};

/// A transaction with ID `id` and no description.
pub(crate) fn transaction(
    id: &str,
    date: Date,
    kind: TransactionType,
    category: &str,
    value: f64,
) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        date,
        kind,
        category: category.to_owned(),
        description: None,
        value,
    }
}
