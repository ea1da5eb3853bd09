// Adapters layer: concrete key-value storage backends.

pub mod storage;

pub use storage::{LocalStorage, MemoryStorage};
