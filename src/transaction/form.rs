use maud::{Markup, html};
use serde::Deserialize;
use time::{
    Date,
    format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::{Transaction, TransactionPayload, TransactionType},
};

/// Dates in forms, query strings and import files, e.g. "2024-01-31".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The form data for creating or updating a transaction.
///
/// Everything except the type is kept as text so that empty fields reach
/// [TransactionForm::validate] instead of being rejected by the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// The date as "YYYY-MM-DD".
    #[serde(default)]
    pub date: String,
    /// Whether this is revenue, an expense or a loss.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Free text used to group losses.
    #[serde(default)]
    pub category: String,
    /// Optional free text.
    #[serde(default)]
    pub description: String,
    /// The amount as a decimal number.
    #[serde(default)]
    pub value: String,
}

impl TransactionForm {
    /// Check the required fields and build the body for the remote store.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingRequiredFields] if the date is empty or not a
    /// date, the category is blank, or the value is empty, not a number or zero.
    pub fn validate(&self) -> Result<TransactionPayload, Error> {
        let date = parse_date(&self.date).ok_or(Error::MissingRequiredFields)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::MissingRequiredFields);
        }

        let value = parse_value(&self.value).ok_or(Error::MissingRequiredFields)?;

        Ok(TransactionPayload {
            date,
            kind: self.kind,
            category: category.to_owned(),
            description: self.description.trim().to_owned(),
            value,
        })
    }
}

/// Parse a "YYYY-MM-DD" date, treating blank text as missing.
pub(crate) fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    Date::parse(text, DATE_FORMAT).ok()
}

/// Parse an amount, rejecting anything that is not a finite, non-zero number.
pub(crate) fn parse_value(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;

    (value.is_finite() && value != 0.0).then_some(value)
}

/// Render the inputs for a transaction, filled in from `defaults` when editing.
pub fn transaction_form_fields(defaults: Option<&Transaction>) -> Markup {
    let selected_type = defaults
        .map(|transaction| transaction.kind)
        .unwrap_or(TransactionType::Revenue);
    let date = defaults.map(|transaction| transaction.date.to_string());
    let value = defaults.map(|transaction| format!("{:.2}", transaction.value));

    html! {
        div
        {
            label for="f-date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="f-date"
                type="date"
                value=[date]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="f-type" class=(FORM_LABEL_STYLE) { "Type" }

            select
                name="type"
                id="f-type"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for kind in TransactionType::ALL {
                    option value=(kind.as_str()) selected[kind == selected_type] {
                        (kind.label())
                    }
                }
            }
        }

        div
        {
            label for="f-category" class=(FORM_LABEL_STYLE) { "Category" }

            input
                name="category"
                id="f-category"
                type="text"
                placeholder="Category"
                value=[defaults.map(|transaction| transaction.category.as_str())]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="f-desc" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="f-desc"
                type="text"
                placeholder="Description"
                value=[defaults.map(Transaction::description)]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="f-value" class=(FORM_LABEL_STYLE) { "Value" }

            div class="input-wrapper w-full"
            {
                input
                    name="value"
                    id="f-value"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0,00"
                    value=[value]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}
