//! Key-value persistence
//!
//! Recordings are stored one record per key (`recording_<id>`), written as a
//! complete object on every mutation. The API credential lives under a single
//! fixed key. The backing store is abstracted behind `KeyValueStore` so tests
//! can run against an in-memory map.

mod kv;
mod recordings;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use recordings::{RecordingStore, API_KEY_KEY, RECORDING_KEY_PREFIX};
