//! In-memory storage backend.
//!
//! Thread-safe ordered key-value store over `RwLock<BTreeMap>`, with
//! buffered transactions applied atomically under the write lock. Data is
//! lost on restart; intended for tests and development mode.

use std::{
    collections::BTreeMap,
    ops::RangeBounds,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::backend::{KeyValue, StorageBackend, StorageError, StorageResult, Transaction};

type Map = BTreeMap<Vec<u8>, Bytes>;

/// In-memory storage backend (data lost on restart)
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    data: Arc<RwLock<Map>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<std::sync::RwLockReadGuard<'_, Map>> {
        self.data.read().map_err(|_| StorageError::backend("memory store lock poisoned"))
    }

    fn write(&self) -> StorageResult<std::sync::RwLockWriteGuard<'_, Map>> {
        self.data.write().map_err(|_| StorageError::backend("memory store lock poisoned"))
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    type Txn = MemoryTransaction;

    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        self.write()?.insert(key, Bytes::from(value));
        Ok(())
    }

    async fn delete(&self, key: &[u8]) -> StorageResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        Ok(self
            .read()?
            .range(range)
            .map(|(k, v)| KeyValue { key: Bytes::from(k.clone()), value: v.clone() })
            .collect())
    }

    async fn transaction(&self) -> StorageResult<MemoryTransaction> {
        Ok(MemoryTransaction { backend: self.clone(), ops: Vec::new() })
    }
}

/// A buffered write operation
#[derive(Debug, Clone)]
enum Op {
    Set(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Buffered transaction over [`MemoryBackend`]
///
/// Reads observe pending writes in this transaction (latest first), then
/// fall through to the shared map. Commit applies every buffered operation
/// under a single write-lock acquisition.
pub struct MemoryTransaction {
    backend: MemoryBackend,
    ops: Vec<Op>,
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn get(&mut self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        for op in self.ops.iter().rev() {
            match op {
                Op::Set(k, v) if k == key => return Ok(Some(Bytes::from(v.clone()))),
                Op::Delete(k) if k == key => return Ok(None),
                _ => {},
            }
        }
        self.backend.get(key).await
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.ops.push(Op::Set(key, value));
    }

    fn delete(&mut self, key: Vec<u8>) {
        self.ops.push(Op::Delete(key));
    }

    async fn commit(self) -> StorageResult<()> {
        let mut map = self.backend.write()?;
        for op in self.ops {
            match op {
                Op::Set(k, v) => {
                    map.insert(k, Bytes::from(v));
                },
                Op::Delete(k) => {
                    map.remove(&k);
                },
            }
        }
        Ok(())
    }
}
