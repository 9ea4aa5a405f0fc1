//! Persistence Adapters
//!
//! In-memory stores that live for the process lifetime.

mod in_memory;

pub use in_memory::InMemoryWatchlist;
