//! The dashboard's query string: the date filter and the transaction being edited.

use serde::{Deserialize, Serialize};

use crate::{
    dashboard::view_state::ViewState,
    endpoints,
    transaction::{DateFilter, TransactionId, parse_date},
};

/// The query parameters of the dashboard page.
///
/// The dates are kept as text so that a blank or malformed bound can be
/// dropped instead of failing the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The earliest date to show, "YYYY-MM-DD".
    pub from: Option<String>,
    /// The latest date to show, "YYYY-MM-DD".
    pub to: Option<String>,
    /// The transaction to load into the form.
    pub edit: Option<TransactionId>,
}

impl DashboardQuery {
    /// The date bounds to forward to the transaction source.
    pub fn date_filter(&self) -> DateFilter {
        DateFilter {
            from: parse_bound("from", self.from.as_deref()),
            to: parse_bound("to", self.to.as_deref()),
        }
    }
}

fn parse_bound(name: &str, text: Option<&str>) -> Option<time::Date> {
    let text = text?;
    let date = parse_date(text);

    if date.is_none() && !text.trim().is_empty() {
        tracing::debug!("Ignoring invalid date bound {name}={text:?}");
    }

    date
}

#[derive(Serialize)]
struct DashboardParams<'a> {
    #[serde(flatten)]
    filter: &'a DateFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit: Option<&'a TransactionId>,
}

/// The URL of the dashboard showing `filter` in `view_state`.
pub fn dashboard_url(filter: &DateFilter, view_state: &ViewState) -> String {
    url_with_params(endpoints::DASHBOARD_VIEW, filter, view_state.editing_id())
}

/// The URL of the dashboard content partial showing `filter`.
pub fn dashboard_content_url(filter: &DateFilter) -> String {
    url_with_params(endpoints::DASHBOARD_CONTENT, filter, None)
}

fn url_with_params(path: &str, filter: &DateFilter, edit: Option<&TransactionId>) -> String {
    let params = DashboardParams { filter, edit };

    match serde_urlencoded::to_string(&params) {
        Ok(query) if query.is_empty() => path.to_owned(),
        Ok(query) => format!("{path}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode dashboard query {filter:?}: {error}");
            path.to_owned()
        }
    }
}
