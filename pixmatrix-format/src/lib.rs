//! MAF (Matrix Animation File) format
//!
//! This crate defines the binary layout of the pre-rendered, palette-indexed
//! animations played by pixmatrix. A resource is a short header, a palette of
//! RGB triples and a sequence of fixed-size frames of palette indices.
//!
//! # Layout
//!
//! ```text
//! ┌───────┬────────┬────────┬─────────────┬──────────────┬─────────────────────────┐
//! │ WIDTH │ HEIGHT │ FRAMES │ PALETTE - 1 │ PALETTE      │ FRAME 0 .. FRAME n-1    │
//! │ 1B    │ 1B     │ 1B     │ 1B          │ 3B per color │ WIDTH × HEIGHT B each   │
//! └───────┴────────┴────────┴─────────────┴──────────────┴─────────────────────────┘
//! ```
//!
//! Frames are row-major (y outer, x inner). There is no magic number,
//! version or checksum: a resource is accepted when its dimensions match the
//! matrix it is played on.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod header;
pub mod palette;
pub mod writer;

pub use color::Rgb;
pub use header::{inspect, AnimationHeader, FormatError, HEADER_SIZE};
pub use palette::{Palette, MAX_PALETTE_LEN};
pub use writer::AnimationWriter;
