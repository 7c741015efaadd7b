// Adapters layer: concrete implementations of the domain ports.

pub mod storage;
pub mod token_store;

pub use storage::LocalStorage;
pub use token_store::{FileTokenStore, MemoryTokenStore};
