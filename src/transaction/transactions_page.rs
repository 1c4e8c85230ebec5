//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    cache::{TransactionCache, get_all_transactions_cached},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_total_price, format_unit_price, link,
    },
    navigation::NavBar,
    transaction::Transaction,
};

/// The state needed for displaying the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for fetching transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The read cache shared with the dashboard.
    pub transaction_cache: Arc<Mutex<TransactionCache>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
        }
    }
}

/// Display all transactions as a table with a delete button per row.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
) -> Result<Response, Error> {
    let transactions = get_all_transactions_cached(&state.db_connection, &state.transaction_cache)
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    Ok(transactions_view(nav_bar, &transactions).into_response())
}

fn transactions_view(nav_bar: NavBar, transactions: &[Transaction]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4" { "Transactions" }

            @if transactions.is_empty() {
                p
                {
                    "No transactions yet. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Add one"))
                    " to get started."
                }
            } @else {
                div class="w-full overflow-x-auto rounded-lg shadow" {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                        thead class=(TABLE_HEADER_STYLE) {
                            tr {
                                th scope="col" class=(TABLE_CELL_STYLE) { "日付" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "内容" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "口座" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "分類1" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "分類2" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "数量" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "単価" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "金額" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "" }
                            }
                        }
                        tbody {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_endpoint = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let purchased_number = transaction
        .purchased_number
        .map(|number| number.to_string())
        .unwrap_or_default();

    html!(
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            th
                scope="row"
                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (transaction.title)
            }
            td class=(TABLE_CELL_STYLE) { (transaction.account_name) }
            td class=(TABLE_CELL_STYLE) { (transaction.category1) }
            td class=(TABLE_CELL_STYLE) { (transaction.category2) }
            td class={(TABLE_CELL_STYLE) " text-right"} { (purchased_number) }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"} {
                (format_unit_price(&transaction.category1, transaction.unit_price))
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"} {
                (format_total_price(transaction.total_price))
            }
            td class=(TABLE_CELL_STYLE) {
                button
                    hx-delete=(delete_endpoint)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}
