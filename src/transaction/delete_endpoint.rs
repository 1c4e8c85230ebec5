//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, cache::TransactionCache, database_id::TransactionId,
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The read cache to invalidate once the delete succeeds.
    pub transaction_cache: Arc<Mutex<TransactionCache>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
        }
    }
}

/// A route handler for deleting a transaction by its ID.
///
/// Responds with an empty body and 200 OK so HTMX removes the table row.
/// Deleting an ID that no longer exists gets the same response: the row is
/// gone either way, so a stale page and a fresh page converge on the same
/// state.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    // The connection lock is released before the cache lock is taken.
    let result = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        delete_transaction(transaction_id, &connection)
    };

    match result {
        Ok(0) => {
            tracing::debug!("delete for missing transaction {transaction_id}, store unchanged");
            Html("").into_response()
        }
        Ok(_) => {
            match state.transaction_cache.lock() {
                Ok(mut cache) => cache.invalidate(),
                Err(error) => {
                    tracing::error!("could not acquire cache lock: {error}");
                    return Error::DatabaseLockError.into_alert_response();
                }
            }

            Html("").into_response()
        }
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
