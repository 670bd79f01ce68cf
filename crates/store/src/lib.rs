//! Generic persistent key-value storage for dashboard state.
//! One JSON document per key; file-backed in production, in-memory for tests.

pub mod error;
pub mod kv;
pub mod kv_file;
pub mod kv_memory;

pub use {
    error::{Error, Result},
    kv::KvStore,
    kv_file::FileKvStore,
    kv_memory::MemoryKvStore,
};
