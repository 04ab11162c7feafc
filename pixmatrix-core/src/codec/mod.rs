//! Frame codec
//!
//! Parses a resource's header and palette once, then decodes one frame per
//! call straight from storage into a [`PixelSink`](crate::traits::PixelSink).
//! Only a single frame of palette indices is ever held in memory.

pub mod decoder;
pub mod state;

pub use decoder::{CodecError, FrameCodec};
pub use state::{CodecState, DecoderState, InvalidReason};
