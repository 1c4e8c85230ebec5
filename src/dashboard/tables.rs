//! Table and headline views for dashboard data display.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::CategoryTotal,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_yen},
};

/// Renders the grand total of all assets as the dashboard headline.
pub(super) fn grand_total_headline(grand_total: i64) -> Markup {
    html! {
        section class="w-full mx-auto mb-6 text-center" {
            h2 class="text-lg font-medium text-gray-600 dark:text-gray-400" { "総資産" }
            p
                id="grand-total"
                class="text-4xl font-bold"
            {
                (format_yen(grand_total))
            }
        }
    }
}

/// Renders a two-column table of category totals, largest first.
///
/// The rows are rendered in the order given, which the aggregation step has
/// already sorted by descending total.
pub(super) fn category_summary_table(title: &str, summary: &[CategoryTotal]) -> Markup {
    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { (title) }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "分類" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "金額" }
                        }
                    }
                    tbody {
                        @for group in summary {
                            tr class=(TABLE_ROW_STYLE) {
                                th
                                    scope="row"
                                    class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                {
                                    (group.label)
                                }
                                td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"} {
                                    (format_yen(group.total))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
