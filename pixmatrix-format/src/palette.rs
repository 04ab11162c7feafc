//! Fixed-capacity color palette
//!
//! The palette is stored as raw wire bytes so it can be filled with a single
//! block read straight from storage.

use crate::color::Rgb;
use crate::header::FormatError;

/// Maximum number of palette entries
pub const MAX_PALETTE_LEN: usize = 256;

/// Palette of up to 256 RGB colors
#[derive(Clone)]
pub struct Palette {
    bytes: [u8; MAX_PALETTE_LEN * 3],
    len: u16,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Palette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Palette {
    /// Create an empty palette
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_PALETTE_LEN * 3],
            len: 0,
        }
    }

    /// Build a palette from a list of colors
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, FormatError> {
        let mut palette = Self::new();
        let buf = palette.prepare(colors.len())?;
        for (chunk, color) in buf.chunks_exact_mut(3).zip(colors) {
            chunk.copy_from_slice(&color.to_bytes());
        }
        Ok(palette)
    }

    /// Resize the palette and return its byte storage for filling
    ///
    /// The returned slice is exactly `len * 3` bytes long.
    pub fn prepare(&mut self, len: usize) -> Result<&mut [u8], FormatError> {
        if len == 0 {
            return Err(FormatError::EmptyPalette);
        }
        if len > MAX_PALETTE_LEN {
            return Err(FormatError::PaletteTooLarge);
        }

        self.len = len as u16;
        Ok(&mut self.bytes[..len * 3])
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of entries
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Check if the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether an index byte refers to an entry
    pub fn contains(&self, index: u8) -> bool {
        (index as u16) < self.len
    }

    /// Look up a color by index
    pub fn get(&self, index: u8) -> Option<Rgb> {
        if !self.contains(index) {
            return None;
        }
        let i = index as usize * 3;
        Some(Rgb::new(self.bytes[i], self.bytes[i + 1], self.bytes[i + 2]))
    }

    /// Raw wire bytes of the loaded entries
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize * 3]
    }

    /// Iterate over the loaded colors
    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.as_bytes()
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }
}
