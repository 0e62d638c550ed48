//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    export::export_transactions,
    import::import_transactions,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::IMPORT, post(import_transactions))
        .route(endpoints::EXPORT, get(export_transactions))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        AppState, endpoints,
        endpoints::format_endpoint,
        test_utils::{FakeTransactionSource, transaction},
        transaction::TransactionType,
    };

    use super::build_router;

    fn new_server(source: &Arc<FakeTransactionSource>) -> TestServer {
        let state = AppState {
            transaction_source: source.clone(),
        };

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = new_server(&Arc::new(FakeTransactionSource::new()));

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_transaction_shows_on_dashboard() {
        let source = Arc::new(FakeTransactionSource::new());
        let server = new_server(&source);
        let form = [
            ("date", "2024-01-05"),
            ("type", "revenue"),
            ("category", "Consulting"),
            ("description", "January invoice"),
            ("value", "100"),
        ];

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .add_query_param("redirect_url", endpoints::DASHBOARD_VIEW)
            .form(&form)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("hx-redirect").to_str().unwrap(),
            endpoints::DASHBOARD_VIEW
        );

        let page = server.get(endpoints::DASHBOARD_VIEW).await;
        page.assert_status_ok();
        assert!(page.text().contains("Consulting"));
        assert!(page.text().contains("R$ 100,00"));
    }

    #[tokio::test]
    async fn edits_and_deletes_through_transaction_route() {
        let source = Arc::new(FakeTransactionSource::with_transactions(vec![transaction(
            "7",
            date!(2024 - 02 - 01),
            TransactionType::Expense,
            "Rent",
            40.0,
        )]));
        let server = new_server(&source);
        let path = format_endpoint(endpoints::TRANSACTION, "7");
        let form = [
            ("date", "2024-02-02"),
            ("type", "expense"),
            ("category", "Rent"),
            ("description", ""),
            ("value", "45"),
        ];

        server
            .put(&path)
            .form(&form)
            .await
            .assert_status(StatusCode::SEE_OTHER);
        assert_eq!(source.transactions()[0].value, 45.0);

        server
            .delete(&path)
            .await
            .assert_status(StatusCode::SEE_OTHER);
        assert!(source.transactions().is_empty());
    }

    #[tokio::test]
    async fn export_route_sends_attachment() {
        let server = new_server(&Arc::new(FakeTransactionSource::new()));

        let response = server.get(endpoints::EXPORT).await;

        response.assert_status_ok();
        assert_eq!(
            response.header("content-disposition").to_str().unwrap(),
            "attachment; filename=\"dre_export.json\""
        );
    }
}
