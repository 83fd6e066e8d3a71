//! Persistence for the favorites list.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `json`: JSON file-based backend with atomic writes
//! - `memory`: In-process backend
//! - `bridge`: Hydration on startup and write-back on change

pub mod backend;
pub mod bridge;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use bridge::{PersistenceBridge, FAVORITE_IDS_KEY, FAVORITE_MOVIES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
