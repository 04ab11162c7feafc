//! Board-side implementations of the playback ports
//!
//! This crate provides concrete implementations of the traits defined
//! in pixmatrix-core:
//!
//! - LED matrix frame buffer (layout mapping, gamma, brightness)
//! - Serial matrix mirror for the desktop viewer
//! - In-memory resource store for animations linked into flash

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod led;
pub mod serial;
pub mod storage;
