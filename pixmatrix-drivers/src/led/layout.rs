//! Matrix coordinate to strip index mapping

/// How the LED strip is wired through the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layout {
    /// Every row runs left to right
    Progressive,
    /// Odd rows run right to left
    #[default]
    Serpentine,
}

impl Layout {
    /// Strip index of pixel (x, y), or `None` when outside the matrix
    pub const fn index(&self, width: u8, height: u8, x: u8, y: u8) -> Option<usize> {
        if x >= width || y >= height {
            return None;
        }
        let row = y as usize * width as usize;
        let column = match self {
            Layout::Serpentine if y % 2 == 1 => (width - 1 - x) as usize,
            _ => x as usize,
        };
        Some(row + column)
    }
}
