//! Resource stores

pub mod memory;

pub use memory::{MemoryEntries, MemoryStore, SliceReader};
