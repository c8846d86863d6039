//! Backend selection.
//!
//! [`Backend`] is the concrete storage handle held by application state. It
//! currently wraps only [`MemoryBackend`]; a persistent variant would be
//! added here without touching repository code.

use std::ops::RangeBounds;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    backend::{KeyValue, StorageBackend, StorageResult},
    memory::{MemoryBackend, MemoryTransaction},
};

/// Concrete storage backend handle
#[derive(Debug, Clone)]
pub enum Backend {
    /// In-memory storage (data lost on restart)
    Memory(MemoryBackend),
}

impl Backend {
    /// Create an in-memory backend
    pub fn memory() -> Self {
        Backend::Memory(MemoryBackend::new())
    }
}

#[async_trait]
impl StorageBackend for Backend {
    type Txn = MemoryTransaction;

    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        match self {
            Backend::Memory(b) => b.get(key).await,
        }
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        match self {
            Backend::Memory(b) => b.set(key, value).await,
        }
    }

    async fn delete(&self, key: &[u8]) -> StorageResult<()> {
        match self {
            Backend::Memory(b) => b.delete(key).await,
        }
    }

    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        match self {
            Backend::Memory(b) => b.get_range(range).await,
        }
    }

    async fn transaction(&self) -> StorageResult<MemoryTransaction> {
        match self {
            Backend::Memory(b) => b.transaction().await,
        }
    }
}
