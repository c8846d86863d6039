#![deny(unsafe_code)]

//! # Skilldir Storage
//!
//! Key-value storage abstraction for the Skilldir service. Repositories in
//! `skilldir-core` are generic over [`StorageBackend`]; the shipped backend
//! is the in-memory [`MemoryBackend`].

pub mod backend;
pub mod factory;
pub mod memory;

pub use backend::{KeyValue, StorageBackend, StorageError, StorageResult, Transaction, prefix_end};
pub use factory::Backend;
pub use memory::{MemoryBackend, MemoryTransaction};
