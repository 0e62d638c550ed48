//! Dashboard module
//!
//! Provides the income statement page: a transaction table, the totals per
//! type and charts of the monthly results and losses by category.

mod aggregation;
mod charts;
mod handlers;
mod query;
mod tables;
mod view_state;

pub use handlers::{get_dashboard_content, get_dashboard_page};
