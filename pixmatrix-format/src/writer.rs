//! Resource encoder
//!
//! Builds a MAF resource in a caller-provided buffer, one frame at a time.

use crate::color::Rgb;
use crate::header::{AnimationHeader, FormatError, HEADER_SIZE};
use crate::palette::MAX_PALETTE_LEN;

/// Incremental MAF encoder
///
/// ```
/// use pixmatrix_format::{AnimationWriter, Rgb};
///
/// let mut buf = [0u8; 64];
/// let mut writer = AnimationWriter::new(&mut buf, 2, 2, &[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// writer.push_frame(&[0, 1, 1, 0]).unwrap();
/// let len = writer.finish().unwrap();
/// assert_eq!(len, 4 + 6 + 4);
/// ```
pub struct AnimationWriter<'a> {
    buf: &'a mut [u8],
    width: u8,
    height: u8,
    palette_len: u16,
    frame_count: u8,
    pos: usize,
}

impl<'a> AnimationWriter<'a> {
    /// Start a resource with the given dimensions and palette
    ///
    /// The palette is written immediately; the header is completed by
    /// [`finish`](Self::finish) once the frame count is known.
    pub fn new(
        buf: &'a mut [u8],
        width: u8,
        height: u8,
        palette: &[Rgb],
    ) -> Result<Self, FormatError> {
        if width == 0 || height == 0 {
            return Err(FormatError::EmptyFrame);
        }
        if palette.is_empty() {
            return Err(FormatError::EmptyPalette);
        }
        if palette.len() > MAX_PALETTE_LEN {
            return Err(FormatError::PaletteTooLarge);
        }

        let palette_end = HEADER_SIZE + palette.len() * 3;
        if buf.len() < palette_end {
            return Err(FormatError::BufferTooSmall);
        }

        for (chunk, color) in buf[HEADER_SIZE..palette_end]
            .chunks_exact_mut(3)
            .zip(palette)
        {
            chunk.copy_from_slice(&color.to_bytes());
        }

        Ok(Self {
            buf,
            width,
            height,
            palette_len: palette.len() as u16,
            frame_count: 0,
            pos: palette_end,
        })
    }

    /// Append one frame of palette indices (row-major)
    pub fn push_frame(&mut self, indices: &[u8]) -> Result<(), FormatError> {
        let frame_size = self.width as usize * self.height as usize;
        if indices.len() != frame_size {
            return Err(FormatError::FrameSize {
                expected: frame_size as u32,
                actual: indices.len() as u32,
            });
        }
        if self.frame_count == u8::MAX {
            return Err(FormatError::TooManyFrames);
        }

        let end = self.pos + frame_size;
        if self.buf.len() < end {
            return Err(FormatError::BufferTooSmall);
        }

        self.buf[self.pos..end].copy_from_slice(indices);
        self.pos = end;
        self.frame_count += 1;
        Ok(())
    }

    /// Number of frames written so far
    pub fn frame_count(&self) -> u8 {
        self.frame_count
    }

    /// Write the header and return the total resource length
    pub fn finish(self) -> Result<usize, FormatError> {
        if self.frame_count == 0 {
            return Err(FormatError::ZeroFrames);
        }

        let header = AnimationHeader {
            width: self.width,
            height: self.height,
            frame_count: self.frame_count,
            palette_len: self.palette_len,
        };
        self.buf[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        Ok(self.pos)
    }
}
