//! A time-to-live cache for the full-table transaction read.
//!
//! The dashboard and transactions pages re-read the whole finance table on
//! every render. This cache keeps the last fetch around for a bounded time so
//! repeated page loads do not hit the database. Mutation endpoints must call
//! [TransactionCache::invalidate] synchronously after a successful commit,
//! before responding, so the next render recomputes everything from a fresh
//! fetch.

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, get_all_transactions},
};

/// How long a cached fetch stays valid if no mutation invalidates it first.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CacheEntry {
    fetched_at: Instant,
    transactions: Vec<Transaction>,
}

/// A cache holding the most recent full-table read of transactions.
///
/// This is an explicit collaborator owned by [crate::AppState], not hidden
/// process-wide state.
#[derive(Debug)]
pub struct TransactionCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl TransactionCache {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Get the cached transactions, or `None` if the cache is empty or the
    /// entry has expired.
    pub fn get(&self) -> Option<&[Transaction]> {
        let entry = self.entry.as_ref()?;

        if entry.fetched_at.elapsed() >= self.ttl {
            return None;
        }

        Some(&entry.transactions)
    }

    /// Store a fresh fetch in the cache.
    pub fn put(&mut self, transactions: Vec<Transaction>) {
        self.entry = Some(CacheEntry {
            fetched_at: Instant::now(),
            transactions,
        });
    }

    /// Discard the cached fetch so the next read goes to the database.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for TransactionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Get every transaction, preferring the cache over the database.
///
/// On a cache miss the full table is read and the result stored for
/// subsequent calls. Lock order is cache first, then connection; mutation
/// endpoints must not hold the connection lock when they take the cache lock.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if a lock is poisoned, or
/// [Error::SqlError] if the read fails.
pub fn get_all_transactions_cached(
    connection: &Mutex<Connection>,
    cache: &Mutex<TransactionCache>,
) -> Result<Vec<Transaction>, Error> {
    let mut cache = cache
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire cache lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if let Some(transactions) = cache.get() {
        tracing::debug!("serving {} transactions from cache", transactions.len());
        return Ok(transactions.to_vec());
    }

    let connection = connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)?;
    cache.put(transactions.clone());

    Ok(transactions)
}

#[cfg(test)]
mod cache_tests {
    use std::{
        sync::Mutex,
        time::Duration,
    };

    use rusqlite::Connection;

    use super::{TransactionCache, get_all_transactions_cached};
    use crate::{
        db::initialize,
        transaction::{core::test_utils::sample_transaction, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn miss_fetches_from_database_and_populates_cache() {
        let connection = Mutex::new(get_test_connection());
        create_transaction(sample_transaction(), &connection.lock().unwrap()).unwrap();
        let cache = Mutex::new(TransactionCache::default());

        let transactions = get_all_transactions_cached(&connection, &cache).unwrap();

        assert_eq!(transactions.len(), 1);
        assert!(cache.lock().unwrap().get().is_some());
    }

    #[test]
    fn hit_does_not_see_uncached_writes() {
        let connection = Mutex::new(get_test_connection());
        let cache = Mutex::new(TransactionCache::default());
        // Prime the cache with the empty table.
        get_all_transactions_cached(&connection, &cache).unwrap();

        // Write behind the cache's back, without invalidating.
        create_transaction(sample_transaction(), &connection.lock().unwrap()).unwrap();

        let transactions = get_all_transactions_cached(&connection, &cache).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn invalidate_forces_fresh_fetch() {
        let connection = Mutex::new(get_test_connection());
        let cache = Mutex::new(TransactionCache::default());
        get_all_transactions_cached(&connection, &cache).unwrap();

        create_transaction(sample_transaction(), &connection.lock().unwrap()).unwrap();
        cache.lock().unwrap().invalidate();

        let transactions = get_all_transactions_cached(&connection, &cache).unwrap();
        assert_eq!(transactions.len(), 1);
    }

    #[test]
    fn entry_expires_after_ttl() {
        let mut cache = TransactionCache::new(Duration::ZERO);

        cache.put(vec![]);

        assert!(cache.get().is_none());
    }

    #[test]
    fn entry_is_served_within_ttl() {
        let mut cache = TransactionCache::new(Duration::from_secs(600));

        cache.put(vec![]);

        assert!(cache.get().is_some());
    }
}
