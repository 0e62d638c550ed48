//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations:
//! - **Monthly Chart**: revenue, expenses and losses per month
//! - **Losses Chart**: losses grouped by category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::aggregation::{CategoryBreakdown, MonthlySeries};

/// The ECharts build loaded by the dashboard page.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the charts shown on the dashboard.
pub(super) fn build_dashboard_charts(
    series: &MonthlySeries,
    losses: &CategoryBreakdown,
) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "monthly-series-chart",
            options: monthly_series_chart(series).to_string(),
        },
        DashboardChart {
            id: "losses-by-category-chart",
            options: losses_by_category_chart(losses).to_string(),
        },
    ]
}

/// Renders the chart containers followed by the script that draws them.
///
/// The script sits next to the containers so that it runs again whenever
/// htmx swaps in new content.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }

            script { (charts_script(charts)) }
        }
    )
}

/// Generates JavaScript that draws each chart from scratch.
///
/// Any chart already attached to a container is disposed first, so every
/// render starts from a fresh instance.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom || typeof echarts === 'undefined') return;
                    echarts.getInstanceByDom(chartDom)?.dispose();

                    const isDarkMode = window.matchMedia('(prefers-color-scheme: dark)').matches;
                    const chart = echarts.init(chartDom, isDarkMode ? 'dark' : null);
                    const option = {};
                    chart.setOption(option);

                    new ResizeObserver(() => chart.resize()).observe(chartDom);
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script)
}

/// Escape '<' so that text from the store, e.g. a category of "</script>",
/// cannot end the inline script early.
///
/// '<' only ever appears inside JSON strings here, where `\u003c` decodes
/// back to the same character.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

pub(super) fn monthly_series_chart(series: &MonthlySeries) -> Chart {
    Chart::new()
        .title(Title::new().text("Monthly Result").subtext("Totals per month"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(80)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.labels.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Revenue").data(series.revenue.clone()))
        .series(Line::new().name("Expense").data(series.expense.clone()))
        .series(Line::new().name("Loss").data(series.loss.clone()))
}

pub(super) fn losses_by_category_chart(losses: &CategoryBreakdown) -> Chart {
    let data: Vec<(f64, &str)> = losses
        .values
        .iter()
        .zip(&losses.labels)
        .map(|(value, label)| (*value, label.as_str()))
        .collect();

    let subtext = if losses.is_empty() {
        "No losses in this period"
    } else {
        "Grouped by category"
    };

    Chart::new()
        .title(Title::new().text("Losses").subtext(subtext))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Losses").radius("60%").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return currencyFormatter.format(number || 0);",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
