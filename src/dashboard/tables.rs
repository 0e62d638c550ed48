//! The summary figures and the transaction table.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    dashboard::{
        aggregation::Summary,
        query::dashboard_url,
        view_state::ViewState,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    transaction::{DateFilter, Transaction, TransactionType},
};

/// Descriptions longer than this many characters are cut short in the table.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const CARD_STYLE: &str = "p-4 rounded-lg shadow bg-white dark:bg-gray-800";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

fn summary_card(id: &str, title: &str, amount: f64, color_class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (title) }
            p id=(id) class={"text-2xl font-bold " (color_class)} { (format_currency(amount)) }
        }
    }
}

/// Renders the revenue, expense, loss and result totals.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    let result = summary.result();

    html! {
        section
            id="summary"
            class="w-full grid grid-cols-2 lg:grid-cols-4 gap-4 mb-4"
        {
            (summary_card("sum-revenue", "Revenue", summary.revenue, TABLE_CELL_GREEN_STYLE))
            (summary_card("sum-expense", "Expenses", summary.expense, TABLE_CELL_RED_STYLE))
            (summary_card("sum-loss", "Losses", summary.loss, TABLE_CELL_RED_STYLE))
            (summary_card("sum-result", "Result", result, amount_color_class(result)))
        }
    }
}

fn type_badge(kind: TransactionType) -> Markup {
    let style = match kind {
        TransactionType::Revenue => {
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
        }
        TransactionType::Expense => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
        TransactionType::Loss => {
            "bg-orange-100 text-orange-800 dark:bg-orange-900 dark:text-orange-300"
        }
    };

    html! {
        span
            class={"badge " (kind.as_str()) " inline-flex items-center px-2.5 py-0.5 \
                text-xs font-semibold rounded-full " (style)}
        {
            (kind.label())
        }
    }
}

/// Shorten `description` to at most [MAX_DESCRIPTION_GRAPHEMES] characters.
fn truncate_description(description: &str) -> String {
    let mut graphemes = description.graphemes(true);
    let truncated: String = graphemes.by_ref().take(MAX_DESCRIPTION_GRAPHEMES).collect();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn transaction_row(transaction: &Transaction, filter: &DateFilter) -> Markup {
    let edit_url = dashboard_url(filter, &ViewState::Editing(transaction.id.clone()));
    let idle_url = dashboard_url(filter, &ViewState::Idle);
    let delete_url = match serde_urlencoded::to_string([("redirect_url", idle_url.as_str())]) {
        Ok(query) => format!(
            "{}?{query}",
            format_endpoint(endpoints::TRANSACTION, &transaction.id)
        ),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {idle_url}: {error}");
            format_endpoint(endpoints::TRANSACTION, &transaction.id)
        }
    };
    let description = transaction.description();

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (type_badge(transaction.kind)) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) title=(description) { (truncate_description(description)) }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                (format_currency(transaction.value))
            }
            td class={(TABLE_CELL_STYLE) " text-center whitespace-nowrap space-x-4"}
            {
                a href=(edit_url) class={"edit " (LINK_STYLE)} { "Edit" }

                button
                    type="button"
                    class={"del " (BUTTON_DELETE_STYLE)}
                    hx-delete=(delete_url)
                    hx-confirm="Remove transaction?"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}

/// Renders one row per transaction, or a placeholder row when there are none.
pub(super) fn transactions_table(transactions: &[Transaction], filter: &DateFilter) -> Markup {
    html! {
        section class="w-full mb-4"
        {
            div class="overflow-x-auto rounded-lg shadow"
            {
                table
                    id="tx-table"
                    class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Value" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction, filter))
                        }

                        @if transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="6" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No transactions in this period."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
