//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

/// The maximum length of the transaction text fields, in characters.
pub const MAX_TEXT_FIELD_LENGTH: usize = 200;

// ============================================================================
// MODELS
// ============================================================================

/// A single financial event, e.g. buying fund units or depositing cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database on insert.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A short description of the transaction.
    pub title: String,
    /// The account the transaction belongs to, e.g. a brokerage account.
    pub account_name: String,
    /// The top-level classification, e.g. an asset class such as "投資信託".
    pub category1: String,
    /// The purpose classification, e.g. "投資資金".
    pub category2: String,
    /// The quantity of units purchased, if applicable.
    pub purchased_number: Option<i64>,
    /// The price per unit, if applicable.
    pub unit_price: Option<f64>,
    /// The settled amount in yen. All aggregates are computed from this field.
    pub total_price: i64,
}

/// The data needed to insert a new transaction.
///
/// `purchased_number` and `unit_price` are informational and are not checked
/// against `total_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
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
    pub purchased_number: Option<i64>,
    /// The price per unit, if applicable.
    pub unit_price: Option<f64>,
    /// The settled amount in yen.
    pub total_price: i64,
}

impl NewTransaction {
    /// Check that all required text fields are non-empty and within length limits.
    ///
    /// # Errors
    /// Returns [Error::EmptyField] if a required field is empty or whitespace,
    /// or [Error::FieldTooLong] if a field exceeds [MAX_TEXT_FIELD_LENGTH]
    /// characters.
    pub fn validate(&self) -> Result<(), Error> {
        let text_fields = [
            ("title", &self.title),
            ("account_name", &self.account_name),
            ("category1", &self.category1),
            ("category2", &self.category2),
        ];

        for (name, value) in text_fields {
            if value.trim().is_empty() {
                return Err(Error::EmptyField(name));
            }

            if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
                return Err(Error::FieldTooLong(name));
            }
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// Validation happens here, at the gateway boundary, so that no caller can
/// write a partial or invalid row regardless of what the UI enforces.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyField] if a required field is empty,
/// - or [Error::FieldTooLong] if a text field is longer than 200 characters,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    new_transaction.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO finance (date, title, account_name, category1, category2, purchased_number, unit_price, total_price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, date, title, account_name, category1, category2, purchased_number, unit_price, total_price",
        )?
        .query_row(
            (
                new_transaction.date,
                new_transaction.title,
                new_transaction.account_name,
                new_transaction.category1,
                new_transaction.category2,
                new_transaction.purchased_number,
                new_transaction.unit_price,
                new_transaction.total_price,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// The number of rows changed by a delete.
pub type RowsAffected = usize;

/// Delete a transaction from the database by its `id`.
///
/// Deleting an id that does not exist is not an error: the function reports
/// zero rows affected and the store is unchanged.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM finance WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Retrieve every transaction from the database.
///
/// The row order is whatever the store returns; callers must not rely on it
/// for correctness and must key any row-conditional formatting by field
/// value, never by row position.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, title, account_name, category1, category2, purchased_number, unit_price, total_price
             FROM finance",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Create the finance table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_finance_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS finance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                account_name TEXT NOT NULL,
                category1 TEXT NOT NULL,
                category2 TEXT NOT NULL,
                purchased_number INTEGER,
                unit_price REAL,
                total_price INTEGER NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('finance', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        title: row.get(2)?,
        account_name: row.get(3)?,
        category1: row.get(4)?,
        category2: row.get(5)?,
        purchased_number: row.get(6)?,
        unit_price: row.get(7)?,
        total_price: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
