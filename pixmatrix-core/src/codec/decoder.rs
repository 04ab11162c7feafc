//! MAF frame decoder

use pixmatrix_format::{AnimationHeader, Palette, Rgb, HEADER_SIZE};

use super::state::{CodecState, DecoderState, InvalidReason};
use crate::config::{MatrixGeometry, MAX_FRAME_PIXELS};
use crate::traits::storage::read_fully;
use crate::traits::{PixelSink, ResourceReader, StorageError};

/// Errors from a single decode pass
///
/// Whenever an error is returned no pixel has been written and no frame
/// has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// No playable resource has been initialized
    NotReady,
    /// Seek or read failed
    Storage(StorageError),
    /// Resource ended inside the frame
    ShortRead { expected: u16, actual: u16 },
    /// Frame references a color past the end of the palette
    PaletteIndex { index: u8, palette_len: u16 },
}

/// Frame codec for one active resource
pub struct FrameCodec {
    geometry: MatrixGeometry,
    state: CodecState,
    palette: Palette,
    /// Staging buffer for one frame of palette indices
    indices: [u8; MAX_FRAME_PIXELS],
}

impl FrameCodec {
    /// Create a codec for the given matrix
    pub const fn new(geometry: MatrixGeometry) -> Self {
        Self {
            geometry,
            state: CodecState::Uninitialized,
            palette: Palette::new(),
            indices: [0; MAX_FRAME_PIXELS],
        }
    }

    /// Matrix dimensions frames are decoded for
    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    /// Current codec state
    pub fn state(&self) -> &CodecState {
        &self.state
    }

    /// Check if frames can be decoded
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Header of the active resource (if ready)
    pub fn header(&self) -> Option<&AnimationHeader> {
        match &self.state {
            CodecState::Ready(s) => Some(&s.header),
            _ => None,
        }
    }

    /// Index of the next frame to decode (if ready)
    pub fn current_frame(&self) -> Option<u8> {
        match &self.state {
            CodecState::Ready(s) => Some(s.current_frame),
            _ => None,
        }
    }

    /// Palette of the active resource
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Forget the active resource
    pub fn reset(&mut self) {
        self.state = CodecState::Uninitialized;
        self.palette.clear();
    }

    /// Read header and palette of a freshly opened resource
    ///
    /// A dimension mismatch stops right after the width/height bytes and
    /// leaves the codec [`CodecState::Invalid`]; no frame of that resource
    /// will ever be produced.
    pub fn initialize<R: ResourceReader + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<AnimationHeader, InvalidReason> {
        self.reset();

        match self.read_header(reader) {
            Ok(header) => {
                self.state = CodecState::Ready(DecoderState::new(header));
                Ok(header)
            }
            Err(reason) => {
                self.palette.clear();
                self.state = CodecState::Invalid(reason);
                Err(reason)
            }
        }
    }

    fn read_header<R: ResourceReader + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<AnimationHeader, InvalidReason> {
        reader.seek(0).map_err(InvalidReason::Storage)?;

        let width = reader.read_byte().map_err(InvalidReason::Storage)?;
        let height = reader.read_byte().map_err(InvalidReason::Storage)?;
        if width != self.geometry.width() || height != self.geometry.height() {
            return Err(InvalidReason::GeometryMismatch { width, height });
        }

        let frame_count = reader.read_byte().map_err(InvalidReason::Storage)?;
        let palette_minus_one = reader.read_byte().map_err(InvalidReason::Storage)?;
        let header =
            AnimationHeader::from_bytes([width, height, frame_count, palette_minus_one])
                .map_err(InvalidReason::Format)?;

        let buf = self
            .palette
            .prepare(header.palette_len as usize)
            .map_err(InvalidReason::Format)?;
        let read = read_fully(reader, buf).map_err(InvalidReason::Storage)?;
        if read < buf.len() {
            return Err(InvalidReason::Storage(StorageError::EndOfResource));
        }

        debug_assert_eq!(header.frame_offset() as usize, HEADER_SIZE + buf.len());
        Ok(header)
    }

    /// Decode the current frame into `display` and advance
    ///
    /// The frame's index bytes are read and checked against the palette
    /// before the first pixel is written, so a frame is emitted either
    /// completely (followed by one commit) or not at all.
    ///
    /// A frame with an out-of-range palette index is skipped: the frame
    /// index advances so the next call decodes the following frame. The
    /// same holds when the resource ends inside the frame. A transient
    /// [`StorageError::Io`] does not advance, so the frame is retried.
    ///
    /// Returns the index of the decoded frame.
    pub fn decode_frame<R, D>(&mut self, reader: &mut R, display: &mut D) -> Result<u8, CodecError>
    where
        R: ResourceReader + ?Sized,
        D: PixelSink + ?Sized,
    {
        let Self {
            geometry,
            state,
            palette,
            indices,
        } = self;

        let decoder = match state {
            CodecState::Ready(decoder) => decoder,
            _ => return Err(CodecError::NotReady),
        };

        let size = geometry.pixel_count();
        let frame = &mut indices[..size];

        let read = match reader
            .seek(decoder.frame_position())
            .and_then(|()| read_fully(reader, frame))
        {
            Ok(read) => read,
            Err(e) => {
                if e.is_end_of_resource() {
                    decoder.advance();
                }
                return Err(CodecError::Storage(e));
            }
        };
        if read < size {
            // Truncated resource: the missing frame can never be read
            decoder.advance();
            return Err(CodecError::ShortRead {
                expected: size as u16,
                actual: read as u16,
            });
        }

        if let Some(&index) = frame.iter().find(|&&i| !palette.contains(i)) {
            decoder.advance();
            return Err(CodecError::PaletteIndex {
                index,
                palette_len: palette.len(),
            });
        }

        let width = geometry.width() as usize;
        for (i, &index) in frame.iter().enumerate() {
            let x = (i % width) as u8;
            let y = (i / width) as u8;
            // Every index was checked against the palette above
            display.set_pixel(x, y, palette.get(index).unwrap_or(Rgb::BLACK));
        }

        let decoded = decoder.current_frame;
        decoder.advance();
        display.commit_frame();

        Ok(decoded)
    }
}
