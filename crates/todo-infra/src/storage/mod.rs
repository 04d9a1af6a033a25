//! Token storage implementations - file-backed and in-memory.

mod file;
mod memory;

pub use file::FileTokenStorage;
pub use memory::InMemoryTokenStorage;
