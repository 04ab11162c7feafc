//! Settings persistence
//!
//! Stores the postcard-encoded [`PlayerSettings`] in a wear-leveled
//! key-value map in the last 64KB of flash, via sequential-storage.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{self, SerializationError};

use pixmatrix_core::config::{
    decode_settings, encode_settings, ConfigError, PlayerSettings, MAX_SETTINGS_SIZE,
};

/// Flash size on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Partition for settings
pub const SETTINGS_PARTITION_SIZE: usize = 64 * 1024;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch buffer for map operations
const DATA_BUFFER_SIZE: usize = 64;

/// Keys in the settings map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum StorageKey {
    PlayerSettings = 0,
}

impl map::Key for StorageKey {
    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.is_empty() {
            return Err(SerializationError::BufferTooSmall);
        }
        buffer[0] = *self as u8;
        Ok(1)
    }

    fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
        match buffer.first() {
            Some(0) => Ok((StorageKey::PlayerSettings, 1)),
            Some(_) => Err(SerializationError::InvalidFormat),
            None => Err(SerializationError::BufferTooSmall),
        }
    }
}

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Nothing stored yet
    NotFound,
    /// Flash or map operation failed
    Storage,
    /// Stored bytes are not valid settings
    Config(ConfigError),
}

impl From<ConfigError> for PersistError {
    fn from(e: ConfigError) -> Self {
        PersistError::Config(e)
    }
}

/// Flash-backed settings store
pub struct SettingsStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> SettingsStore<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Load the last saved settings
    pub async fn load(&mut self) -> Result<PlayerSettings, PersistError> {
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];

        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &StorageKey::PlayerSettings,
        )
        .await;

        match result {
            Ok(Some(bytes)) => Ok(decode_settings(bytes)?),
            Ok(None) => Err(PersistError::NotFound),
            Err(_) => Err(PersistError::Storage),
        }
    }

    /// Save settings
    pub async fn save(&mut self, settings: &PlayerSettings) -> Result<(), PersistError> {
        let mut encoded = [0u8; MAX_SETTINGS_SIZE];
        let bytes: &[u8] = encode_settings(settings, &mut encoded)?;
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];

        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &StorageKey::PlayerSettings,
            &bytes,
        )
        .await
        .map_err(|_| PersistError::Storage)
    }
}
