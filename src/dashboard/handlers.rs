//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and refreshing its content
//! - HTML view functions for rendering the dashboard UI
//!
//! The views are pure functions of the fetched snapshot, the [ViewState] and
//! the date filter.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    dashboard::{
        aggregation::{losses_by_category, monthly_series, summarize},
        charts::{ECHARTS_SCRIPT_URL, build_dashboard_charts, charts_view},
        query::{DashboardQuery, dashboard_content_url, dashboard_url},
        tables::{summary_cards, transactions_table},
        view_state::ViewState,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, base, currency_input_styles, link, loading_spinner,
    },
    import::TRANSACTIONS_CHANGED_EVENT,
    navigation::NavBar,
    transaction::{DateFilter, Transaction, TransactionSource, transaction_form_fields},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The remote store that owns the transactions.
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// Display the dashboard: filters, the transaction form, summary, charts and table.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filter = query.date_filter();
    let snapshot = fetch_snapshot(state.transaction_source.as_ref(), &filter).await;

    let view_state = match query.edit {
        Some(id) => ViewState::edit(&snapshot, id),
        None => ViewState::Idle,
    };

    dashboard_view(&snapshot, &view_state, &filter).into_response()
}

/// Render only the summary, charts and table, for htmx to swap into the page.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filter = query.date_filter();
    let snapshot = fetch_snapshot(state.transaction_source.as_ref(), &filter).await;

    dashboard_content(&snapshot, &filter).into_response()
}

/// Get the transactions within `filter`.
///
/// A failed read is logged and shown as an empty dashboard.
async fn fetch_snapshot(source: &dyn TransactionSource, filter: &DateFilter) -> Vec<Transaction> {
    match source.list(filter).await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::warn!("Could not fetch transactions, showing an empty dashboard: {error}");
            Vec::new()
        }
    }
}

fn redirect_query(redirect_url: &str) -> String {
    match serde_urlencoded::to_string([("redirect_url", redirect_url)]) {
        Ok(query) => format!("?{query}"),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {redirect_url}: {error}");
            String::new()
        }
    }
}

fn filter_form(filter: &DateFilter) -> Markup {
    let from = filter.from.map(|date| date.to_string());
    let to = filter.to.map(|date| date.to_string());

    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            div
            {
                label for="filter-from" class=(FORM_LABEL_STYLE) { "From" }
                input
                    name="from"
                    id="filter-from"
                    type="date"
                    value=[from]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-to" class=(FORM_LABEL_STYLE) { "To" }
                input
                    name="to"
                    id="filter-to"
                    type="date"
                    value=[to]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="w-32"
            {
                button type="submit" id="btn-filter" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
            }

            @if !filter.is_empty() {
                (link(endpoints::DASHBOARD_VIEW, "Clear"))
            }
        }
    }
}

fn transaction_form(
    snapshot: &[Transaction],
    view_state: &ViewState,
    filter: &DateFilter,
) -> Markup {
    let idle_url = dashboard_url(filter, &view_state.clone().after_submit());
    let query = redirect_query(&idle_url);

    let (post_url, put_url) = match view_state.editing_id() {
        None => (
            Some(format!("{}{query}", endpoints::TRANSACTIONS_API)),
            None,
        ),
        Some(id) => (
            None,
            Some(format!(
                "{}{query}",
                format_endpoint(endpoints::TRANSACTION, id)
            )),
        ),
    };
    let cancel_url = dashboard_url(filter, &view_state.clone().cancel());
    let heading = match view_state {
        ViewState::Idle => "New Transaction",
        ViewState::Editing(_) => "Edit Transaction",
    };

    html! {
        section class="w-full mb-4 p-4 rounded-lg shadow bg-white dark:bg-gray-800"
        {
            h2 class="text-xl font-semibold mb-4" { (heading) }

            form
                id="tx-form"
                hx-post=[post_url]
                hx-put=[put_url]
                hx-target-error="#alert-container"
                hx-disabled-elt="#btn-add"
                hx-indicator="#indicator"
                class="grid grid-cols-1 md:grid-cols-5 gap-4 items-end"
            {
                (transaction_form_fields(view_state.editing(snapshot)))

                div class="flex gap-2 md:col-span-5"
                {
                    div class="w-40"
                    {
                        button type="submit" id="btn-add" class=(BUTTON_PRIMARY_STYLE)
                        {
                            span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                            (view_state.submit_label())
                        }
                    }

                    @if view_state.editing_id().is_some() {
                        div class="w-40"
                        {
                            a href=(cancel_url) id="btn-cancel" class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                        }
                    }
                }
            }
        }
    }
}

fn import_export_section() -> Markup {
    html! {
        section class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            form
                hx-post=(endpoints::IMPORT)
                hx-encoding="multipart/form-data"
                hx-trigger="change"
                hx-target="#alert-container"
                hx-target-error="#alert-container"
            {
                label for="import-file" class=(FORM_LABEL_STYLE) { "Import JSON" }
                input
                    type="file"
                    name="file"
                    id="import-file"
                    accept=".json,application/json"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="w-40"
            {
                a
                    href=(endpoints::EXPORT)
                    id="btn-export"
                    download="dre_export.json"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Export JSON"
                }
            }
        }
    }
}

/// The summary, charts and transaction table for `snapshot`.
fn dashboard_content(snapshot: &[Transaction], filter: &DateFilter) -> Markup {
    let summary = summarize(snapshot);
    let charts = build_dashboard_charts(&monthly_series(snapshot), &losses_by_category(snapshot));

    html! {
        (summary_cards(&summary))
        (charts_view(&charts))
        (transactions_table(snapshot, filter))
    }
}

/// Renders the full dashboard page.
fn dashboard_view(snapshot: &[Transaction], view_state: &ViewState, filter: &DateFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (filter_form(filter))
            (transaction_form(snapshot, view_state, filter))
            (import_export_section())

            div
                id="dashboard-content"
                class="w-full"
                hx-get=(dashboard_content_url(filter))
                hx-trigger={(TRANSACTIONS_CHANGED_EVENT) " from:body"}
                hx-swap="innerHTML"
            {
                (dashboard_content(snapshot, filter))
            }
        }
    );

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        currency_input_styles(),
    ];

    base("Dashboard", &head_elements, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        dashboard::query::DashboardQuery,
        test_utils::{
            FakeTransactionSource, SourceCall, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, parse_html_document, parse_html_fragment, transaction,
        },
        transaction::{DateFilter, Transaction, TransactionId, TransactionType},
    };

    use super::{DashboardState, get_dashboard_content, get_dashboard_page};

    fn scenario() -> Vec<Transaction> {
        vec![
            transaction(
                "1",
                date!(2024 - 01 - 05),
                TransactionType::Revenue,
                "sales",
                100.0,
            ),
            transaction(
                "2",
                date!(2024 - 01 - 20),
                TransactionType::Expense,
                "rent",
                40.0,
            ),
            transaction(
                "3",
                date!(2024 - 02 - 10),
                TransactionType::Loss,
                "theft",
                10.0,
            ),
        ]
    }

    fn query(from: Option<&str>, edit: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            from: from.map(str::to_owned),
            to: None,
            edit: edit.map(TransactionId::new),
        }
    }

    async fn get_page(source: &Arc<FakeTransactionSource>, query: DashboardQuery) -> Html {
        let state = DashboardState {
            transaction_source: source.clone(),
        };

        let response: Response = get_dashboard_page(State(state), Query(query)).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("nothing matched {selector}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    fn count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    fn transaction_form(html: &Html) -> scraper::ElementRef<'_> {
        html.select(&Selector::parse("#tx-form").unwrap())
            .next()
            .expect("no transaction form")
    }

    #[tokio::test]
    async fn dashboard_shows_summary_charts_and_table() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()));

        let html = get_page(&source, DashboardQuery::default()).await;

        assert_eq!(text_of(&html, "#sum-revenue"), "R$ 100,00");
        assert_eq!(text_of(&html, "#sum-expense"), "R$ 40,00");
        assert_eq!(text_of(&html, "#sum-loss"), "R$ 10,00");
        assert_eq!(text_of(&html, "#sum-result"), "R$ 50,00");
        assert_eq!(count(&html, "#monthly-series-chart"), 1);
        assert_eq!(count(&html, "#losses-by-category-chart"), 1);
        assert_eq!(count(&html, "#tx-table tbody tr"), 3);

        let form = transaction_form(&html);
        assert_hx_endpoint(&form, "/api/transactions?redirect_url=%2Fdashboard", "hx-post");
        assert_form_submit_button_with_text(&form, "Add");
        assert_eq!(count(&html, "#btn-cancel"), 0);
    }

    #[tokio::test]
    async fn read_failure_shows_empty_dashboard() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()).failing_reads());

        let html = get_page(&source, DashboardQuery::default()).await;

        assert_eq!(text_of(&html, "#sum-revenue"), "R$ 0,00");
        assert_eq!(text_of(&html, "#sum-result"), "R$ 0,00");
        assert_eq!(count(&html, "#tx-table tbody tr"), 1);
        assert_eq!(count(&html, "[role=alert]"), 0);
    }

    #[tokio::test]
    async fn date_filter_is_forwarded_and_echoed() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()));

        let html = get_page(&source, query(Some("2024-02-01"), None)).await;

        assert_eq!(
            source.calls(),
            [SourceCall::List(DateFilter {
                from: Some(date!(2024 - 02 - 01)),
                to: None,
            })]
        );
        assert_eq!(count(&html, "#tx-table tbody tr"), 1);
        assert_eq!(text_of(&html, "#sum-loss"), "R$ 10,00");

        let from_input = html
            .select(&Selector::parse("#filter-from").unwrap())
            .next()
            .unwrap();
        assert_eq!(from_input.value().attr("value"), Some("2024-02-01"));

        let form = transaction_form(&html);
        assert_hx_endpoint(
            &form,
            "/api/transactions?redirect_url=%2Fdashboard%3Ffrom%3D2024-02-01",
            "hx-post",
        );
    }

    #[tokio::test]
    async fn edit_populates_form_and_cancel_writes_nothing() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()));

        let html = get_page(&source, query(None, Some("3"))).await;

        let form = transaction_form(&html);
        assert_hx_endpoint(&form, "/api/transactions/3?redirect_url=%2Fdashboard", "hx-put");
        assert!(form.value().attr("hx-post").is_none());
        assert_form_input_with_value(&form, "date", "date", "2024-02-10");
        assert_form_input_with_value(&form, "category", "text", "theft");
        assert_form_input_with_value(&form, "value", "number", "10.00");
        assert_form_submit_button_with_text(&form, "Update");

        let cancel = html
            .select(&Selector::parse("#btn-cancel").unwrap())
            .next()
            .expect("no cancel link");
        assert_eq!(cancel.value().attr("href"), Some("/dashboard"));

        // Following the cancel link only reads.
        let html = get_page(&source, DashboardQuery::default()).await;
        assert_form_submit_button_with_text(&transaction_form(&html), "Add");
        assert!(source.writes().is_empty());
    }

    #[tokio::test]
    async fn edit_of_unknown_transaction_stays_idle() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()));

        let html = get_page(&source, query(None, Some("99"))).await;

        let form = transaction_form(&html);
        assert!(form.value().attr("hx-post").is_some());
        assert_form_submit_button_with_text(&form, "Add");
        assert_eq!(count(&html, "#btn-cancel"), 0);
    }

    #[tokio::test]
    async fn content_partial_renders_without_page() {
        let source = Arc::new(FakeTransactionSource::with_transactions(scenario()));
        let state = DashboardState {
            transaction_source: source.clone(),
        };

        let response = get_dashboard_content(State(state), Query(DashboardQuery::default())).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(count(&html, "#sum-result"), 1);
        assert_eq!(count(&html, "#tx-table"), 1);
        assert_eq!(count(&html, "nav"), 0);
        assert_eq!(count(&html, "#tx-form"), 0);
    }
}
