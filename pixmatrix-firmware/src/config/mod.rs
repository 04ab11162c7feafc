//! Configuration loading and parsing
//!
//! `player.toml` is compiled into the firmware and parsed at boot by a
//! small no_std parser. Runtime settings changed through the buttons are
//! persisted to flash and override the file.

pub mod persistence;
pub mod toml;

pub use persistence::SettingsStore;
pub use toml::{parse_config, FirmwareConfig, HardwareConfig, ParseError};
