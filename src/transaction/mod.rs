//! Transaction feature module.
//!
//! Defines the transaction domain model, the database queries that implement
//! the mutation gateway, and the pages and endpoints for listing, creating,
//! and deleting transactions.

pub(crate) mod core;
mod create_endpoint;
mod delete_endpoint;
mod new_transaction_page;
mod transactions_page;

pub use core::{
    MAX_TEXT_FIELD_LENGTH, NewTransaction, Transaction, create_finance_table, create_transaction,
    delete_transaction, get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
