//! In-memory resource store
//!
//! Serves animations that are linked into flash (or otherwise live in
//! memory) as a flat namespace. Names are matched by prefix, so several
//! namespaces can share one table.

use heapless::Vec;
use pixmatrix_core::traits::{ResourceReader, ResourceStore, StorageError};

/// One stored resource
#[derive(Debug, Clone, Copy)]
struct Entry<'d> {
    name: &'d str,
    data: &'d [u8],
}

/// Fixed-capacity store of `N` borrowed resources
pub struct MemoryStore<'d, const N: usize> {
    namespace: &'d str,
    entries: Vec<Entry<'d>, N>,
}

impl<'d, const N: usize> MemoryStore<'d, N> {
    /// Create an empty store listing names that start with `namespace`
    pub const fn new(namespace: &'d str) -> Self {
        Self {
            namespace,
            entries: Vec::new(),
        }
    }

    /// Add or replace a resource
    ///
    /// Returns the data back when the store is full.
    pub fn insert(&mut self, name: &'d str, data: &'d [u8]) -> Result<(), &'d [u8]> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.data = data;
            return Ok(());
        }
        self.entries
            .push(Entry { name, data })
            .map_err(|entry| entry.data)
    }

    /// Remove a resource; later entries keep their relative order
    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Total stored resources, including other namespaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'d, const N: usize> ResourceStore for MemoryStore<'d, N> {
    type Reader = SliceReader<'d>;
    type Entries<'a>
        = MemoryEntries<'a, 'd>
    where
        Self: 'a;

    fn entries(&self) -> MemoryEntries<'_, 'd> {
        MemoryEntries {
            iter: self.entries.iter(),
            namespace: self.namespace,
        }
    }

    fn open(&mut self, name: &str) -> Result<SliceReader<'d>, StorageError> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.name.starts_with(self.namespace))
            .map(|e| SliceReader::new(e.data))
            .ok_or(StorageError::NotFound)
    }
}

/// Iterator over the names in a [`MemoryStore`] namespace
pub struct MemoryEntries<'a, 'd> {
    iter: core::slice::Iter<'a, Entry<'d>>,
    namespace: &'d str,
}

impl<'a, 'd> Iterator for MemoryEntries<'a, 'd> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let namespace = self.namespace;
        self.iter
            .by_ref()
            .find(|e| e.name.starts_with(namespace))
            .map(|e| e.name)
    }
}

/// Reader over a byte slice
#[derive(Debug, Clone)]
pub struct SliceReader<'d> {
    data: &'d [u8],
    position: usize,
}

impl<'d> SliceReader<'d> {
    pub const fn new(data: &'d [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl ResourceReader for SliceReader<'_> {
    fn seek(&mut self, position: u32) -> Result<(), StorageError> {
        let position = position as usize;
        if position > self.data.len() {
            return Err(StorageError::SeekOutOfRange);
        }
        self.position = position;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, StorageError> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(StorageError::EndOfResource)?;
        self.position += 1;
        Ok(byte)
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let remaining = &self.data[self.position..];
        let n = buffer.len().min(remaining.len());
        buffer[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::{Layout, LedMatrix};
    use pixmatrix_core::config::{MatrixGeometry, PlayerConfig};
    use pixmatrix_core::player::{ControlCommand, Player};
    use pixmatrix_format::{AnimationWriter, Rgb};

    const A: &[u8] = &[2, 2, 1, 0, 255, 0, 0, 0, 0, 0, 0];
    const B: &[u8] = &[2, 2, 1, 0, 0, 0, 255, 0, 0, 0, 0];

    fn store() -> MemoryStore<'static, 4> {
        let mut store = MemoryStore::new("/animations/");
        store.insert("/animations/a.maf", A).unwrap();
        store.insert("/web/index.html", b"<html>").unwrap();
        store.insert("/animations/b.maf", B).unwrap();
        store
    }

    #[test]
    fn test_entries_filtered_by_namespace() {
        let store = store();
        let names: std::vec::Vec<&str> = store.entries().collect();

        assert_eq!(names, ["/animations/a.maf", "/animations/b.maf"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_open_outside_namespace() {
        let mut store = store();

        assert!(store.open("/animations/b.maf").is_ok());
        assert_eq!(
            store.open("/web/index.html").err(),
            Some(StorageError::NotFound)
        );
    }

    #[test]
    fn test_insert_replace_remove() {
        let mut store = store();

        store.insert("/animations/a.maf", B).unwrap();
        assert_eq!(store.len(), 3);
        store.insert("/animations/c.maf", A).unwrap();
        assert_eq!(store.insert("/animations/d.maf", A), Err(A));

        assert!(store.remove("/animations/a.maf"));
        assert!(!store.remove("/animations/a.maf"));
        let names: std::vec::Vec<&str> = store.entries().collect();
        assert_eq!(names, ["/animations/b.maf", "/animations/c.maf"]);
    }

    #[test]
    fn test_slice_reader() {
        let mut reader = SliceReader::new(&[1, 2, 3, 4, 5]);
        let mut buf = [0u8; 4];

        reader.seek(3).unwrap();
        assert_eq!(reader.read_block(&mut buf), Ok(2));
        assert_eq!(&buf[..2], &[4, 5]);
        assert_eq!(reader.read_block(&mut buf), Ok(0));
        assert_eq!(reader.read_byte(), Err(StorageError::EndOfResource));
        assert_eq!(reader.seek(6), Err(StorageError::SeekOutOfRange));

        reader.seek(0).unwrap();
        assert_eq!(reader.read_byte(), Ok(1));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_player_over_memory_store() {
        let mut buf = [0u8; 64];
        let mut writer =
            AnimationWriter::new(&mut buf, 2, 2, &[Rgb::BLACK, Rgb::WHITE]).unwrap();
        writer.push_frame(&[1, 0, 0, 1]).unwrap();
        writer.push_frame(&[0, 1, 1, 0]).unwrap();
        let len = writer.finish().unwrap();

        let mut store = MemoryStore::<4>::new("/animations/");
        store.insert("/animations/a.maf", &buf[..len]).unwrap();
        store.insert("/animations/b.maf", B).unwrap();

        let geometry = MatrixGeometry::new(2, 2).unwrap();
        let mut player = Player::new(store, &PlayerConfig::new(geometry), 0);
        let mut matrix = LedMatrix::<4>::new(geometry, Layout::Serpentine).unwrap();
        player.start(0).unwrap();

        assert_eq!(player.tick(0, &mut matrix).rendered, Some(Ok(0)));
        assert_eq!(matrix.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(matrix.pixel(1, 1), Some(Rgb::WHITE));
        assert_eq!(matrix.pixel(1, 0), Some(Rgb::BLACK));

        player.apply(ControlCommand::Next, 0);
        assert_eq!(player.tick(100, &mut matrix).rendered, Some(Ok(0)));
        assert_eq!(matrix.pixel(0, 0), Some(Rgb::new(0, 0, 255)));
        assert_eq!(matrix.frame_count(), 2);
    }
}
