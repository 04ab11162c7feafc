//! Board-agnostic animation playback engine
//!
//! This crate contains all playback logic that does not depend on
//! specific hardware implementations:
//!
//! - Storage and display port traits
//! - Frame codec (MAF header/palette parsing, per-frame decode)
//! - Playlist controller (resource enumeration and navigation)
//! - Playback scheduler (automatic cycling)
//! - Player (per-tick orchestration and control commands)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod player;
pub mod playlist;
pub mod scheduler;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
