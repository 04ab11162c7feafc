//! Playback scheduler
//!
//! Decides when the player advances to the next animation on its own.

pub mod cycle;

pub use cycle::PlaybackScheduler;
