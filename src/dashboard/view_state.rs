//! Whether the transaction form creates a new transaction or edits an existing one.

use crate::transaction::{Transaction, TransactionId};

/// The mode of the transaction form.
///
/// The state lives in the dashboard URL (`?edit=<id>`), so reloading the
/// page keeps it and the server holds nothing between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Submitting the form creates a transaction.
    #[default]
    Idle,
    /// Submitting the form updates the transaction with this ID.
    Editing(TransactionId),
}

impl ViewState {
    /// Start editing `id`.
    ///
    /// Stays idle if `id` is not in `snapshot`, e.g. it was deleted since the
    /// link was rendered.
    pub fn edit(snapshot: &[Transaction], id: TransactionId) -> Self {
        if snapshot.iter().any(|transaction| transaction.id == id) {
            ViewState::Editing(id)
        } else {
            tracing::debug!("Transaction {id} is not in the current view, staying idle");
            ViewState::Idle
        }
    }

    /// Stop editing without saving.
    pub fn cancel(self) -> Self {
        ViewState::Idle
    }

    /// The state after the form was submitted successfully.
    pub fn after_submit(self) -> Self {
        ViewState::Idle
    }

    /// The ID of the transaction being edited.
    pub fn editing_id(&self) -> Option<&TransactionId> {
        match self {
            ViewState::Idle => None,
            ViewState::Editing(id) => Some(id),
        }
    }

    /// The transaction being edited.
    pub fn editing<'a>(&self, snapshot: &'a [Transaction]) -> Option<&'a Transaction> {
        let id = self.editing_id()?;
        snapshot.iter().find(|transaction| &transaction.id == id)
    }

    /// The text of the form's submit button.
    pub fn submit_label(&self) -> &'static str {
        match self {
            ViewState::Idle => "Add",
            ViewState::Editing(_) => "Update",
        }
    }
}
