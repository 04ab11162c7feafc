//! Playlist navigation
//!
//! Resolves the selection index to a resource by enumerating the storage
//! namespace and owns the open handle plus the codec that decodes it.

pub mod controller;

pub use controller::{Availability, NavError, PlaylistController, PlaylistStatus, Selection};
