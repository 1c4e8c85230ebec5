//! Shisan is a web app for tracking your personal financial assets.
//!
//! This library provides a small HTTP server that directly serves HTML pages:
//! a dashboard that aggregates and charts a single table of transactions, and
//! forms for adding and deleting rows in that table.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod cache;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use cache::{DEFAULT_CACHE_TTL, TransactionCache};
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::get_internal_server_error_response,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required transaction field was empty at insert time.
    ///
    /// The insert does not proceed and no partial row is written. The field
    /// name is reported back to the client so it can fix the form input.
    #[error("the {0} field must not be empty")]
    EmptyField(&'static str),

    /// A transaction text field exceeded the 200 character limit.
    #[error("the {0} field must be at most 200 characters")]
    FieldTooLong(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                get_internal_server_error_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an inline HTMX alert for form-driven mutations.
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyField(field) => Alert::error(
                "Missing required field",
                &format!("The {field} field must not be empty."),
            )
            .respond(StatusCode::UNPROCESSABLE_ENTITY),
            Error::FieldTooLong(field) => Alert::error(
                "Field too long",
                &format!("The {field} field must be at most 200 characters."),
            )
            .respond(StatusCode::UNPROCESSABLE_ENTITY),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .respond(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
