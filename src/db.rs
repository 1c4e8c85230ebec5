//! Database initialization for the application.

use rusqlite::Connection;

use crate::transaction::create_finance_table;

/// Initialize the database by creating the tables for the domain models.
///
/// This function is idempotent: running it against an already initialized
/// database is a no-op.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_finance_table(connection)
}
