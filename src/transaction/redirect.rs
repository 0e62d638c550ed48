//! Where to send the client after a successful write.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::endpoints;

/// The query parameters accepted by the write endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    /// The page to reload once the write succeeds, e.g. "/dashboard?from=2024-01-01".
    pub redirect_url: Option<String>,
}

impl QueryParams {
    /// The requested redirect URL if it points back into this app,
    /// otherwise the dashboard.
    pub fn redirect_url(&self) -> String {
        self.redirect_url
            .as_deref()
            .and_then(normalize_redirect_url)
            .unwrap_or_else(|| endpoints::DASHBOARD_VIEW.to_owned())
    }
}

/// Keep only relative URLs so a crafted link cannot redirect off-site.
fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    if !raw_url.starts_with('/') || raw_url.starts_with("//") {
        return None;
    }

    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    uri.path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_owned())
}

/// Tell htmx to load `query_params`' redirect URL, which refetches the dashboard.
pub fn redirect_after_write(query_params: &QueryParams) -> Response {
    (
        HxRedirect(query_params.redirect_url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
