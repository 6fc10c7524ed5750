//! Keyword store implementations.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`MemoryStore`] | Process-local store for development and tests |

pub mod memory;

pub use memory::MemoryStore;
