//! Template stores.

mod memory;

pub use memory::InMemoryStore;
