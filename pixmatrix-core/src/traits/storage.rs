//! Storage port
//!
//! Animations live as named resources in a flat, directory-like namespace.
//! A [`ResourceStore`] enumerates and opens them; the returned
//! [`ResourceReader`] is the open handle. Dropping the reader closes it.

use heapless::String;

/// Maximum resource name length (SPIFFS-style object names)
pub const MAX_NAME_LEN: usize = 32;

/// Owned resource name
pub type ResourceName = String<MAX_NAME_LEN>;

/// Errors reported by storage implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No resource with that name
    NotFound,
    /// Resource name does not fit in [`ResourceName`]
    NameTooLong,
    /// Seek position past the end of the resource
    SeekOutOfRange,
    /// Read past the end of the resource
    EndOfResource,
    /// Underlying device or filesystem failure
    Io,
}

impl StorageError {
    /// The requested bytes lie past the end of the resource
    ///
    /// Retrying cannot succeed until the resource is rewritten.
    pub fn is_end_of_resource(&self) -> bool {
        matches!(self, Self::SeekOutOfRange | Self::EndOfResource)
    }
}

/// Open handle on one resource
///
/// All operations are synchronous and bounded-latency.
pub trait ResourceReader {
    /// Move the read cursor to an absolute byte position
    fn seek(&mut self, position: u32) -> Result<(), StorageError>;

    /// Read one byte and advance the cursor
    fn read_byte(&mut self) -> Result<u8, StorageError>;

    /// Read up to `buffer.len()` bytes and advance the cursor
    ///
    /// Returns the number of bytes read; `0` means end of resource.
    fn read_block(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError>;
}

/// Namespace of animation resources
pub trait ResourceStore {
    /// Handle type returned by [`open`](Self::open)
    type Reader: ResourceReader;

    /// Iterator over resource names in namespace order
    type Entries<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// Enumerate the namespace
    ///
    /// The order must be stable as long as no resource is added or removed.
    fn entries(&self) -> Self::Entries<'_>;

    /// Open a resource by name, positioned at byte 0
    fn open(&mut self, name: &str) -> Result<Self::Reader, StorageError>;
}

impl<R: ResourceReader + ?Sized> ResourceReader for &mut R {
    fn seek(&mut self, position: u32) -> Result<(), StorageError> {
        (**self).seek(position)
    }

    fn read_byte(&mut self) -> Result<u8, StorageError> {
        (**self).read_byte()
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read_block(buffer)
    }
}

/// Read until `buffer` is full or the resource ends
///
/// Returns the number of bytes actually read.
pub fn read_fully<R: ResourceReader + ?Sized>(
    reader: &mut R,
    buffer: &mut [u8],
) -> Result<usize, StorageError> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = reader.read_block(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
