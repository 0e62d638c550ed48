//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

use std::fmt::Display;

use url::Url;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transaction table, summary and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content (summary, charts and table) without the page around it.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to upload a JSON file for importing transactions.
pub const IMPORT: &str = "/api/import";
/// The route to download all transactions as a JSON file.
pub const EXPORT: &str = "/api/export";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// `id` is inserted as a single percent-encoded path segment, so opaque IDs
/// containing slashes or spaces stay within the segment.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        encode_path_segment(&id.to_string()),
        &endpoint_path[param_end..]
    )
}

fn encode_path_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return segment.to_owned();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }

    url.path().trim_start_matches('/').to_owned()
}
