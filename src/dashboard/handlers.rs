//! Dashboard HTTP handlers and view rendering.
//!
//! Fetches transactions through the read cache, aggregates them by both
//! category columns, and renders the grand total headline, two pie charts,
//! and the matching summary tables.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error,
    cache::{TransactionCache, get_all_transactions_cached},
    dashboard::{
        aggregation::{
            DEFAULT_THRESHOLD_PERCENT, GroupKey, collapse_long_tail, grand_total, summarize,
        },
        charts::{DashboardChart, category_pie_chart, charts_script, charts_view},
        tables::{category_summary_table, grand_total_headline},
    },
    endpoints,
    html::{HeadElement, base, link},
    navigation::NavBar,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for fetching transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The read cache shared with the transaction endpoints.
    pub transaction_cache: Arc<Mutex<TransactionCache>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
        }
    }
}

/// Display a page with an overview of the user's assets.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = get_all_transactions_cached(&state.db_connection, &state.transaction_cache)
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let total = grand_total(&transactions);
    let purpose_summary = summarize(&transactions, GroupKey::Category2);
    let asset_class_summary = summarize(&transactions, GroupKey::Category1);

    let charts = [
        DashboardChart {
            id: "purpose-chart",
            options: category_pie_chart(
                "目的別",
                &collapse_long_tail(&purpose_summary, DEFAULT_THRESHOLD_PERCENT),
            )
            .to_string(),
        },
        DashboardChart {
            id: "asset-class-chart",
            options: category_pie_chart(
                "分類別",
                &collapse_long_tail(&asset_class_summary, DEFAULT_THRESHOLD_PERCENT),
            )
            .to_string(),
        },
    ];

    let tables = [
        category_summary_table("目的別", &purpose_summary),
        category_summary_table("分類別", &asset_class_summary),
    ];

    Ok(dashboard_view(nav_bar, total, &charts, &tables).into_response())
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some data.
                You can start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the grand total, charts, and tables.
fn dashboard_view(
    nav_bar: NavBar<'_>,
    total: i64,
    charts: &[DashboardChart],
    tables: &[Markup],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (grand_total_headline(total))

            (charts_view(charts))

            section class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for table in tables {
                        (table)
                    }
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use std::sync::{Arc, Mutex};

    use crate::{
        cache::TransactionCache,
        db::initialize,
        transaction::{NewTransaction, create_transaction},
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_test_state() -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            transaction_cache: Arc::new(Mutex::new(TransactionCache::default())),
        }
    }

    fn insert(state: &DashboardState, category1: &str, category2: &str, total_price: i64) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction {
                category1: category1.to_owned(),
                category2: category2.to_owned(),
                total_price,
                ..crate::transaction::core::test_utils::sample_transaction()
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state();
        insert(&state, "投資信託", "投資資金", 8250);
        insert(&state, "現金", "生活費", 1750);

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_element_exists(&html, "#purpose-chart");
        assert_element_exists(&html, "#asset-class-chart");
        assert_element_exists(&html, "table");
    }

    #[tokio::test]
    async fn dashboard_shows_grand_total_in_yen() {
        let state = get_test_state();
        insert(&state, "投資信託", "投資資金", 8250);
        insert(&state, "現金", "生活費", 1750);

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let selector = Selector::parse("#grand-total").unwrap();
        let headline = html.select(&selector).next().unwrap();
        assert_eq!(headline.text().collect::<String>().trim(), "10,000円");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let selector = Selector::parse("h2").unwrap();
        let heading = html.select(&selector).next().unwrap();
        assert!(
            heading
                .text()
                .collect::<String>()
                .contains("Nothing here yet")
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_element_exists(html: &Html, css_selector: &str) {
        let selector = Selector::parse(css_selector).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "element '{css_selector}' not found",
        );
    }
}
