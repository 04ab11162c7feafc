//! Collaborator port traits
//!
//! These traits define the interface between the playback engine
//! and board-specific storage and display implementations.

pub mod display;
pub mod storage;

pub use display::PixelSink;
pub use storage::{ResourceName, ResourceReader, ResourceStore, StorageError, MAX_NAME_LEN};
