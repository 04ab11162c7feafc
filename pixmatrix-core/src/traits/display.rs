//! Display port

use pixmatrix_format::Rgb;

/// Pixel sink for decoded frames
///
/// The codec writes every pixel of a frame and then commits it. What
/// "commit" means (latching LEDs, swapping buffers, mirroring) is up to
/// the implementation.
pub trait PixelSink {
    /// Set one pixel (origin top-left)
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb);

    /// Signal that all pixels of the current frame have been written
    fn commit_frame(&mut self);
}

impl<D: PixelSink + ?Sized> PixelSink for &mut D {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        (**self).set_pixel(x, y, color)
    }

    fn commit_frame(&mut self) {
        (**self).commit_frame()
    }
}
