//! Pie chart generation for the dashboard.
//!
//! Builds two ECharts pie charts from the collapsed category buckets: one
//! splitting assets by purpose (`category2`) and one by asset class
//! (`category1`). Each chart is serialized to JSON and initialized client
//! side with a small script emitted into the page head.

use charming::{
    Chart,
    component::Title,
    element::{JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::ChartBucket, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the grid of chart container divs.
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
        }
    )
}

/// Generates the JavaScript that initializes the ECharts instances, with
/// responsive resizing and dark mode support.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});",
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Builds a pie chart over the collapsed category buckets.
///
/// Each slice is labelled with its share of the total to one decimal place
/// and its absolute amount in yen, e.g. "82.5%\n(8,250円)".
pub(super) fn category_pie_chart(title: &str, buckets: &[ChartBucket]) -> Chart {
    let data: Vec<(f64, &str)> = buckets
        .iter()
        .map(|bucket| (bucket.total as f64, bucket.label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(yen_formatter()),
        )
        .series(
            Pie::new()
                .name(title)
                .radius("65%")
                .data(data)
                .label(Label::new().show(true).formatter(slice_label_formatter())),
        )
}

#[inline]
fn yen_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const yenFormatter = new Intl.NumberFormat('ja-JP');
            return (number || number === 0) ? yenFormatter.format(number) + '円' : \"-\";",
    )
}

/// Formats each slice label as a percentage over an absolute yen amount.
fn slice_label_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "params",
        "const yenFormatter = new Intl.NumberFormat('ja-JP');
            return params.name + '\\n' + params.percent.toFixed(1) + '%\\n('
                + yenFormatter.format(params.value) + '円)';",
    )
}
