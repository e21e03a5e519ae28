//! Docket Data Layer
//!
//! Durable local key-value persistence. Every key holds one JSON document;
//! the file backend keeps one file per key under a data directory.

pub mod client;
pub mod file;
pub mod memory;
pub mod queries;

pub use client::{DbError, DbPool, DbResult, KvStore, in_memory, init_pool};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use queries::settings;
pub use queries::snapshot;
