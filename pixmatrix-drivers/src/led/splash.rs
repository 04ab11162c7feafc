//! Boot splash

use pixmatrix_core::config::MatrixGeometry;
use pixmatrix_core::traits::PixelSink;
use pixmatrix_format::Rgb;

/// Draw and commit the boot gradient
///
/// Red ramps up along x, green along y, blue is full.
pub fn draw_splash<D: PixelSink + ?Sized>(display: &mut D, geometry: MatrixGeometry) {
    let width = geometry.width() as u16;
    let height = geometry.height() as u16;
    for y in 0..geometry.height() {
        for x in 0..geometry.width() {
            let red = (x as u16 * 255 / width) as u8;
            let green = (y as u16 * 255 / height) as u8;
            display.set_pixel(x, y, Rgb::new(red, green, 255));
        }
    }
    display.commit_frame();
}
