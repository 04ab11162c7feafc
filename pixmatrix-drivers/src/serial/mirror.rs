//! Serial matrix mirror
//!
//! Line protocol read by the desktop virtual matrix viewer:
//!
//! - `LEDINFO{WW}{HH}` once, width and height as two hex digits each
//! - `LEDDATA{RRGGBB...}` per frame, every pixel row-major
//!
//! Hex digits are uppercase, lines end with `\n`.

use embedded_io::Write;
use pixmatrix_core::config::MatrixGeometry;
use pixmatrix_format::Rgb;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Pixels encoded per write call
const CHUNK_PIXELS: usize = 16;

fn hex_byte(value: u8) -> [u8; 2] {
    [HEX[(value >> 4) as usize], HEX[(value & 0x0F) as usize]]
}

/// Writes matrix frames to a serial port
pub struct MatrixMirror<W> {
    writer: W,
}

impl<W: Write> MatrixMirror<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Announce the matrix size
    pub fn write_info(&mut self, geometry: MatrixGeometry) -> Result<(), W::Error> {
        let width = hex_byte(geometry.width());
        let height = hex_byte(geometry.height());
        self.writer.write_all(b"LEDINFO")?;
        self.writer.write_all(&width)?;
        self.writer.write_all(&height)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Send one frame of row-major pixels
    pub fn write_frame(&mut self, pixels: &[Rgb]) -> Result<(), W::Error> {
        self.writer.write_all(b"LEDDATA")?;

        let mut line = [0u8; CHUNK_PIXELS * 6];
        for chunk in pixels.chunks(CHUNK_PIXELS) {
            for (pixel, out) in chunk.iter().zip(line.chunks_exact_mut(6)) {
                out[..2].copy_from_slice(&hex_byte(pixel.r));
                out[2..4].copy_from_slice(&hex_byte(pixel.g));
                out[4..].copy_from_slice(&hex_byte(pixel.b));
            }
            self.writer.write_all(&line[..chunk.len() * 6])?;
        }

        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
