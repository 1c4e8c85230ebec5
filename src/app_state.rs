//! Implements a struct that holds the state of the server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::{cache::TransactionCache, db::initialize};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The time-to-live cache in front of the full-table transaction read.
    pub transaction_cache: Arc<Mutex<TransactionCache>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models. Cached reads expire after `cache_ttl`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cache_ttl: Duration) -> Result<Self, rusqlite::Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            transaction_cache: Arc::new(Mutex::new(TransactionCache::new(cache_ttl))),
        })
    }
}
