//! Middleware for logging requests and responses.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// The maximum number of bytes of a request's query string to include in the
/// `info` level log line. Longer query strings are truncated there and logged
/// in full at the `debug` level.
pub const LOG_QUERY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The method, path and query of the request and the status and latency of
/// the response are logged at the `info` level. Bodies are passed through
/// untouched so that file uploads and downloads are not buffered.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().unwrap_or_default().to_owned();

    log_request(method.as_str(), &path, &query);

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    tracing::info!(
        "Sending response: {method} {path} -> {} in {:.1}ms",
        response.status(),
        elapsed.as_secs_f64() * 1000.0
    );

    response
}

fn log_request(method: &str, path: &str, query: &str) {
    if query.is_empty() {
        tracing::info!("Received request: {method} {path}");
    } else if query.len() > LOG_QUERY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {method} {path}?{}...",
            truncate(query, LOG_QUERY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request query: {query:?}");
    } else {
        tracing::info!("Received request: {method} {path}?{query}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
