//! Gaane Storage
//!
//! [`SnapshotStore`](gaane_core::SnapshotStore) implementations: a JSON file
//! for real runs and an in-memory store for tests and ephemeral sessions.

#![forbid(unsafe_code)]

mod json;
mod memory;

pub use json::JsonSnapshotStore;
pub use memory::MemorySnapshotStore;
