//! LED matrix frame buffer
//!
//! Receives decoded pixels through [`PixelSink`], keeps the logical
//! row-major image and the corrected strip-ordered buffer that is pushed
//! to the LEDs.

use pixmatrix_core::config::MatrixGeometry;
use pixmatrix_core::traits::PixelSink;
use pixmatrix_format::Rgb;
use smart_leds::RGB8;

use super::gamma::gamma_correct;
use super::layout::Layout;

/// Frame buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    /// The matrix has more pixels than the buffer capacity
    CapacityExceeded { pixels: usize, capacity: usize },
}

/// Frame buffer for a matrix of up to `N` LEDs
pub struct LedMatrix<const N: usize> {
    geometry: MatrixGeometry,
    layout: Layout,
    brightness: u8,
    gamma: bool,
    /// Colors as decoded, row-major
    pixels: [Rgb; N],
    /// Corrected colors in strip order
    strip: [RGB8; N],
    frames: u32,
    dirty: bool,
}

impl<const N: usize> LedMatrix<N> {
    /// Create a blank matrix
    pub fn new(geometry: MatrixGeometry, layout: Layout) -> Result<Self, MatrixError> {
        if geometry.pixel_count() > N {
            return Err(MatrixError::CapacityExceeded {
                pixels: geometry.pixel_count(),
                capacity: N,
            });
        }
        Ok(Self {
            geometry,
            layout,
            brightness: u8::MAX,
            gamma: true,
            pixels: [Rgb::BLACK; N],
            strip: [RGB8::default(); N],
            frames: 0,
            dirty: false,
        })
    }

    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set global brightness (255 = full) and re-render the strip buffer
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.refresh();
    }

    /// Enable or disable gamma correction and re-render the strip buffer
    pub fn set_gamma(&mut self, enabled: bool) {
        self.gamma = enabled;
        self.refresh();
    }

    /// Blank every pixel (not committed)
    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
        self.strip.fill(RGB8::default());
    }

    /// Logical image, row-major
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.geometry.pixel_count()]
    }

    /// Color at (x, y) as decoded
    pub fn pixel(&self, x: u8, y: u8) -> Option<Rgb> {
        if x >= self.geometry.width() || y >= self.geometry.height() {
            return None;
        }
        self.pixels
            .get(y as usize * self.geometry.width() as usize + x as usize)
            .copied()
    }

    /// Strip buffer ready to be written to the LEDs
    pub fn strip(&self) -> &[RGB8] {
        &self.strip[..self.geometry.pixel_count()]
    }

    /// Number of committed frames
    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    /// Return whether a frame was committed since the last call
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    fn correct(&self, color: Rgb) -> RGB8 {
        let channel = |value: u8| {
            let value = if self.gamma { gamma_correct(value) } else { value };
            ((value as u16 * (self.brightness as u16 + 1)) >> 8) as u8
        };
        RGB8::new(channel(color.r), channel(color.g), channel(color.b))
    }

    fn refresh(&mut self) {
        let width = self.geometry.width();
        let height = self.geometry.height();
        for y in 0..height {
            for x in 0..width {
                let color = self.pixels[y as usize * width as usize + x as usize];
                if let Some(index) = self.layout.index(width, height, x, y) {
                    self.strip[index] = self.correct(color);
                }
            }
        }
    }
}

impl<const N: usize> PixelSink for LedMatrix<N> {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        let width = self.geometry.width();
        let Some(index) = self.layout.index(width, self.geometry.height(), x, y) else {
            return;
        };
        self.pixels[y as usize * width as usize + x as usize] = color;
        self.strip[index] = self.correct(color);
    }

    fn commit_frame(&mut self) {
        self.frames = self.frames.wrapping_add(1);
        self.dirty = true;
    }
}
