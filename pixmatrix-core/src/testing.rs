//! Mock collaborators shared by the unit tests

use pixmatrix_format::{AnimationWriter, Rgb};

use crate::traits::{PixelSink, ResourceReader, ResourceStore, StorageError};

pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);

/// Encode a resource into a Vec
pub fn encode(width: u8, height: u8, palette: &[Rgb], frames: &[&[u8]]) -> Vec<u8> {
    let mut buf = vec![0u8; 4 + palette.len() * 3 + width as usize * height as usize * frames.len()];
    let mut writer = AnimationWriter::new(&mut buf, width, height, palette).unwrap();
    for frame in frames {
        writer.push_frame(frame).unwrap();
    }
    let len = writer.finish().unwrap();
    buf.truncate(len);
    buf
}

/// 2x2, 3 frames, magenta/green
pub fn reference_animation() -> Vec<u8> {
    encode(
        2,
        2,
        &[MAGENTA, GREEN],
        &[&[1, 0, 0, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]],
    )
}

/// Single-color animation of the given size
pub fn solid_animation(width: u8, height: u8, frames: usize, color: Rgb) -> Vec<u8> {
    let frame = vec![0u8; width as usize * height as usize];
    let frames: Vec<&[u8]> = (0..frames).map(|_| frame.as_slice()).collect();
    encode(width, height, &[color], &frames)
}

/// In-memory reader with injectable read failures
pub struct TestReader {
    data: Vec<u8>,
    pos: usize,
    fail_reads: bool,
}

impl TestReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            fail_reads: false,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }
}

impl ResourceReader for TestReader {
    fn seek(&mut self, position: u32) -> Result<(), StorageError> {
        if position as usize > self.data.len() {
            return Err(StorageError::SeekOutOfRange);
        }
        self.pos = position as usize;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Io);
        }
        let byte = *self.data.get(self.pos).ok_or(StorageError::EndOfResource)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Io);
        }
        let n = buffer.len().min(self.data.len() - self.pos);
        buffer[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

pub struct TestEntry {
    pub name: String,
    pub data: Vec<u8>,
    /// Listed but cannot be opened
    pub broken: bool,
}

/// Store that keeps every resource in a Vec and logs opens
#[derive(Default)]
pub struct TestStore {
    pub entries: Vec<TestEntry>,
    pub opened: Vec<String>,
}

impl TestStore {
    pub fn with(names: &[&str], data: &[u8]) -> Self {
        let mut store = Self::default();
        for name in names {
            store.add(name, data.to_vec());
        }
        store
    }

    pub fn add(&mut self, name: &str, data: Vec<u8>) {
        self.entries.push(TestEntry {
            name: name.into(),
            data,
            broken: false,
        });
    }

    pub fn add_broken(&mut self, name: &str) {
        self.entries.push(TestEntry {
            name: name.into(),
            data: Vec::new(),
            broken: true,
        });
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|e| e.name != name);
    }
}

fn entry_name(entry: &TestEntry) -> &str {
    &entry.name
}

impl ResourceStore for TestStore {
    type Reader = TestReader;
    type Entries<'a> = std::iter::Map<std::slice::Iter<'a, TestEntry>, fn(&TestEntry) -> &str>;

    fn entries(&self) -> Self::Entries<'_> {
        self.entries.iter().map(entry_name as fn(&TestEntry) -> &str)
    }

    fn open(&mut self, name: &str) -> Result<TestReader, StorageError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or(StorageError::NotFound)?;
        if entry.broken {
            return Err(StorageError::Io);
        }
        self.opened.push(name.into());
        Ok(TestReader::new(entry.data.clone()))
    }
}

/// Sink that records every committed frame
#[derive(Default)]
pub struct RecordingSink {
    pub pending: Vec<(u8, u8, Rgb)>,
    pub frames: Vec<Vec<(u8, u8, Rgb)>>,
    pub commits: usize,
    pixels: usize,
}

impl RecordingSink {
    /// Total number of set_pixel calls
    pub fn pixel_count(&self) -> usize {
        self.pixels
    }
}

impl PixelSink for RecordingSink {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        self.pixels += 1;
        self.pending.push((x, y, color));
    }

    fn commit_frame(&mut self) {
        self.commits += 1;
        self.frames.push(core::mem::take(&mut self.pending));
    }
}
