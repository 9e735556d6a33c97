//! Persistence module
//!
//! Key-value stores for the tool usage counters: a JSON file for real use
//! and an in-memory map for tests and ephemeral sessions.

mod error;
mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryToolFrequencyStore;
pub use json_file_store::JsonFileToolFrequencyStore;
