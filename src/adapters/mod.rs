// Adapters layer: concrete implementations for external systems (file store, http).

pub mod file_store;
pub mod http;

pub use file_store::FileStore;
