//! Runtime settings persistence
//!
//! Settings are stored as a version byte followed by postcard data so a
//! board can keep the last cycle interval and mode across reboots.

use serde::{Deserialize, Serialize};

use super::types::{ConfigError, PlayerSettings};

/// Current settings format version
pub const SETTINGS_VERSION: u8 = 1;

/// Upper bound of an encoded settings record
pub const MAX_SETTINGS_SIZE: usize = 16;

#[derive(Serialize, Deserialize)]
struct StoredSettings {
    version: u8,
    settings: PlayerSettings,
}

/// Encode settings into `buf`, returning the used prefix
pub fn encode_settings<'a>(
    settings: &PlayerSettings,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8], ConfigError> {
    let stored = StoredSettings {
        version: SETTINGS_VERSION,
        settings: *settings,
    };
    postcard::to_slice(&stored, buf).map_err(|_| ConfigError::Serialize)
}

/// Decode settings written by [`encode_settings`]
pub fn decode_settings(bytes: &[u8]) -> Result<PlayerSettings, ConfigError> {
    // The version is a plain u8 and therefore the first raw byte
    match bytes.first() {
        Some(&SETTINGS_VERSION) => {}
        Some(&found) => return Err(ConfigError::VersionMismatch { found }),
        None => return Err(ConfigError::Deserialize),
    }

    let stored: StoredSettings =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
    Ok(stored.settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerMode;

    #[test]
    fn test_settings_persist() {
        let settings = PlayerSettings {
            cycle_interval_s: 300,
            auto_cycle: false,
            mode: PlayerMode::Visualization,
        };

        let mut buf = [0u8; MAX_SETTINGS_SIZE];
        let used = encode_settings(&settings, &mut buf).unwrap().len();

        assert_eq!(buf[0], SETTINGS_VERSION);
        assert_eq!(decode_settings(&buf[..used]), Ok(settings));
    }

    #[test]
    fn test_version_mismatch() {
        let mut buf = [0u8; MAX_SETTINGS_SIZE];
        let used = encode_settings(&PlayerSettings::default(), &mut buf)
            .unwrap()
            .len();
        buf[0] = 7;

        assert_eq!(
            decode_settings(&buf[..used]),
            Err(ConfigError::VersionMismatch { found: 7 })
        );
    }

    #[test]
    fn test_empty_or_truncated() {
        assert_eq!(decode_settings(&[]), Err(ConfigError::Deserialize));
        assert_eq!(
            decode_settings(&[SETTINGS_VERSION]),
            Err(ConfigError::Deserialize)
        );
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            encode_settings(&PlayerSettings::default(), &mut buf).err(),
            Some(ConfigError::Serialize)
        );
    }
}
