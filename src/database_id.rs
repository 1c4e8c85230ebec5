//! Type aliases for database row IDs.

/// An ID that uniquely identifies a row in a database table.
pub type DatabaseId = i64;

/// An ID that uniquely identifies a transaction.
pub type TransactionId = DatabaseId;
