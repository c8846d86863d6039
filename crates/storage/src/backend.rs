//! Core storage traits and types.
//!
//! Repositories are written against [`StorageBackend`] so the backing store
//! can be swapped without touching business logic. The only backend shipped
//! today is [`crate::MemoryBackend`]; the trait boundary is where a
//! database-backed implementation would plug in.

use std::ops::RangeBounds;

use async_trait::async_trait;
use bytes::Bytes;
use snafu::Snafu;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors produced by storage backends
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StorageError {
    /// The backend failed to perform an operation
    #[snafu(display("Storage backend error: {message}"))]
    Backend { message: String },
}

impl StorageError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        BackendSnafu { message: message.into() }.build()
    }
}

/// A key-value pair returned from range queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: Bytes,
    pub value: Bytes,
}

/// Core trait for key-value storage operations
///
/// Implementations must be cheaply cloneable handles to shared state; every
/// repository holds its own clone.
#[async_trait]
pub trait StorageBackend: Clone + Send + Sync + 'static {
    /// Transaction type produced by [`StorageBackend::transaction`]
    type Txn: Transaction;

    /// Get the value for a key
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Set a key to a value
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()>;

    /// Delete a key (no-op when absent)
    async fn delete(&self, key: &[u8]) -> StorageResult<()>;

    /// Return all pairs whose key falls in the range, in key order
    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send;

    /// Start a buffered transaction
    async fn transaction(&self) -> StorageResult<Self::Txn>;
}

/// A buffered transaction: writes accumulate locally and become visible to
/// other readers only after [`Transaction::commit`].
#[async_trait]
pub trait Transaction: Send {
    /// Read a key, observing this transaction's own pending writes first
    async fn get(&mut self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Buffer a set operation
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Buffer a delete operation
    fn delete(&mut self, key: Vec<u8>);

    /// Atomically apply all buffered operations
    async fn commit(self) -> StorageResult<()>;
}

/// Compute the exclusive upper bound for a prefix scan
///
/// Returns `None` when the prefix is all `0xff` bytes, in which case the
/// scan is unbounded above.
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return Some(end);
        }
        end.pop();
    }
    None
}
