//! Codec state definition
//!
//! The codec is explicitly tri-state. "Never initialized" and "initialized
//! but unplayable" are different states and are never inferred from zeroed
//! counters.

use pixmatrix_format::{AnimationHeader, FormatError};

use crate::traits::StorageError;

/// Why a resource cannot be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidReason {
    /// Resource dimensions differ from the matrix (as read from the header)
    GeometryMismatch { width: u8, height: u8 },
    /// Header or palette is malformed
    Format(FormatError),
    /// Storage failed while reading header or palette
    Storage(StorageError),
}

/// Per-resource decode state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderState {
    /// Parsed header
    pub header: AnimationHeader,
    /// Byte offset of frame 0
    pub frame_offset: u32,
    /// Index of the next frame to decode
    pub current_frame: u8,
}

impl DecoderState {
    /// Fresh state positioned at frame 0
    pub fn new(header: AnimationHeader) -> Self {
        Self {
            header,
            frame_offset: header.frame_offset(),
            current_frame: 0,
        }
    }

    /// Absolute byte position of the current frame
    pub fn frame_position(&self) -> u32 {
        self.frame_offset + self.header.frame_size() * self.current_frame as u32
    }

    /// Move to the next frame, wrapping after the last one
    pub fn advance(&mut self) {
        self.current_frame = self.current_frame.wrapping_add(1);
        if self.current_frame >= self.header.frame_count {
            self.current_frame = 0;
        }
    }
}

/// Codec state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecState {
    /// No resource has been initialized
    #[default]
    Uninitialized,
    /// The active resource can never be played on this matrix
    Invalid(InvalidReason),
    /// Frames can be decoded
    Ready(DecoderState),
}

impl CodecState {
    /// Check if frames can be decoded
    pub fn is_ready(&self) -> bool {
        matches!(self, CodecState::Ready(_))
    }

    /// Check if the active resource was rejected
    pub fn is_invalid(&self) -> bool {
        matches!(self, CodecState::Invalid(_))
    }
}
