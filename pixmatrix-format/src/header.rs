//! Animation header parsing
//!
//! Header format:
//! - WIDTH (1 byte): matrix width the animation was rendered for
//! - HEIGHT (1 byte): matrix height the animation was rendered for
//! - FRAMES (1 byte): number of frames (1-255)
//! - PALETTE - 1 (1 byte): palette length minus one (0 => 1 color, 255 => 256 colors)

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 4;

/// Errors that can occur while parsing or encoding a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Header declares zero frames
    ZeroFrames,
    /// Header declares a zero width or height
    EmptyFrame,
    /// Resource is shorter than its header declares
    Truncated { expected: u32, actual: u32 },
    /// Resource has bytes past the last frame
    TrailingData { expected: u32, actual: u32 },
    /// Palette has no entries
    EmptyPalette,
    /// Palette has more than 256 entries
    PaletteTooLarge,
    /// More than 255 frames
    TooManyFrames,
    /// Frame data length differs from width × height
    FrameSize { expected: u32, actual: u32 },
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Fixed-layout metadata at the start of every resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationHeader {
    /// Matrix width in pixels
    pub width: u8,
    /// Matrix height in pixels
    pub height: u8,
    /// Number of frames (never 0 once parsed)
    pub frame_count: u8,
    /// Number of palette entries (1-256)
    pub palette_len: u16,
}

impl AnimationHeader {
    /// Parse the four header bytes
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Result<Self, FormatError> {
        let [width, height, frame_count, palette_minus_one] = bytes;

        if width == 0 || height == 0 {
            return Err(FormatError::EmptyFrame);
        }
        if frame_count == 0 {
            return Err(FormatError::ZeroFrames);
        }

        Ok(Self {
            width,
            height,
            frame_count,
            palette_len: palette_minus_one as u16 + 1,
        })
    }

    /// Encode the header into its four wire bytes
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        [
            self.width,
            self.height,
            self.frame_count,
            // palette_len is 1..=256
            (self.palette_len.max(1) - 1) as u8,
        ]
    }

    /// Check whether this animation was rendered for the given matrix
    pub fn matches(&self, width: u8, height: u8) -> bool {
        self.width == width && self.height == height
    }

    /// Byte length of the palette block
    pub fn palette_bytes(&self) -> u32 {
        self.palette_len as u32 * 3
    }

    /// Byte offset of frame 0
    pub fn frame_offset(&self) -> u32 {
        HEADER_SIZE as u32 + self.palette_bytes()
    }

    /// Number of index bytes in one frame
    pub fn frame_size(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Absolute byte offset of the given frame
    pub fn frame_position(&self, frame: u8) -> u32 {
        self.frame_offset() + self.frame_size() * frame as u32
    }

    /// Total byte length of a well-formed resource with this header
    pub fn resource_len(&self) -> u32 {
        self.frame_offset() + self.frame_size() * self.frame_count as u32
    }
}

/// Parse and size-check a complete resource held in memory
///
/// Only the header and the total length are checked; palette indices are
/// validated during playback.
pub fn inspect(bytes: &[u8]) -> Result<AnimationHeader, FormatError> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated {
            expected: HEADER_SIZE as u32,
            actual: bytes.len() as u32,
        });
    }

    let header = AnimationHeader::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])?;
    let expected = header.resource_len();
    let actual = bytes.len() as u32;

    if actual < expected {
        return Err(FormatError::Truncated { expected, actual });
    }
    if actual > expected {
        return Err(FormatError::TrailingData { expected, actual });
    }

    Ok(header)
}
