//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    cache::TransactionCache,
    endpoints,
    transaction::{NewTransaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The read cache to invalidate once the write succeeds.
    pub transaction_cache: Arc<Mutex<TransactionCache>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// When the transaction happened.
    pub date: Date,
    /// A short description of the transaction.
    pub title: String,
    /// The account the transaction belongs to.
    pub account_name: String,
    /// The top-level classification.
    pub category1: String,
    /// The purpose classification.
    pub category2: String,
    /// The quantity of units purchased, if applicable.
    #[serde(default)]
    pub purchased_number: Option<i64>,
    /// The price per unit, if applicable.
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// The settled amount in yen.
    pub total_price: i64,
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// Validation happens in [create_transaction], so an empty or overlong text
/// field comes back as an alert rather than a new row.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_transaction = NewTransaction {
        date: form.date,
        title: form.title,
        account_name: form.account_name,
        category1: form.category1,
        category2: form.category2,
        purchased_number: form.purchased_number,
        unit_price: form.unit_price,
        total_price: form.total_price,
    };

    // The connection lock is released before the cache lock is taken.
    {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        if let Err(error) = create_transaction(new_transaction, &connection) {
            tracing::error!("could not create transaction: {error}");

            return error.into_alert_response();
        }
    }

    match state.transaction_cache.lock() {
        Ok(mut cache) => cache.invalidate(),
        Err(error) => {
            tracing::error!("could not acquire cache lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        cache::{TransactionCache, get_all_transactions_cached},
        db::initialize,
        transaction::{create_transaction_endpoint, get_all_transactions},
    };

    use super::{CreateTransactionState, TransactionForm};

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            transaction_cache: Arc::new(Mutex::new(TransactionCache::default())),
        }
    }

    fn sample_form() -> TransactionForm {
        TransactionForm {
            date: date!(2024 - 11 - 18),
            title: "アステラス製薬".to_owned(),
            account_name: "楽天証券_Y".to_owned(),
            category1: "株式".to_owned(),
            category2: "投資資金".to_owned(),
            purchased_number: Some(5),
            unit_price: Some(1650.0),
            total_price: 8250,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(sample_form()))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_all_transactions(&connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].total_price, 8250);
        assert_eq!(transactions[0].title, "アステラス製薬");
    }

    #[tokio::test]
    async fn create_invalidates_cache() {
        let state = get_test_state();

        // Prime the cache with the empty table.
        let cached =
            get_all_transactions_cached(&state.db_connection, &state.transaction_cache).unwrap();
        assert!(cached.is_empty());

        create_transaction_endpoint(State(state.clone()), Form(sample_form()))
            .await
            .into_response();

        // The next cached fetch must see the new row.
        let cached =
            get_all_transactions_cached(&state.db_connection, &state.transaction_cache).unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn rejects_empty_required_field_with_alert() {
        let state = get_test_state();
        let mut form = sample_form();
        form.category2 = "".to_owned();

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().get(HX_REDIRECT).is_none());

        // No partial row was written.
        let connection = state.db_connection.lock().unwrap();
        assert!(get_all_transactions(&connection).unwrap().is_empty());
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
