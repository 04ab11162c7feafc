//! Simple TOML parser for player configuration
//!
//! Handles only the subset used by `player.toml`:
//!
//! - `[matrix]`, `[player]` and `[display]` section headers
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...)
//!
//! Unknown keys are ignored so newer files still boot older firmware.
//! The build script validates the same file with the full `toml` crate.

use pixmatrix_core::config::{MatrixGeometry, PlayerConfig, PlayerMode};
use pixmatrix_drivers::led::Layout;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Width or height missing, zero or too large
    InvalidGeometry,
}

/// Board-side output options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareConfig {
    /// LED strip wiring
    pub layout: Layout,
    /// Global brightness (255 = full)
    pub brightness: u8,
    /// Apply gamma 2.2 before output
    pub gamma: bool,
    /// Write every frame to the serial mirror
    pub serial_mirror: bool,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Serpentine,
            brightness: 255,
            gamma: true,
            serial_mirror: false,
        }
    }
}

/// Everything read from `player.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareConfig {
    pub player: PlayerConfig,
    pub hardware: HardwareConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Matrix,
    Player,
    Display,
}

/// Parse TOML configuration
pub fn parse_config(input: &str) -> Result<FirmwareConfig, ParseError> {
    let mut section = Section::Root;
    let mut width: u8 = 0;
    let mut height: u8 = 0;
    let mut hardware = HardwareConfig::default();
    let mut player = PlayerConfig::new(MatrixGeometry::new(1, 1).map_err(|_| ParseError::InvalidGeometry)?);

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            continue;
        };

        match (section, key) {
            (Section::Matrix, "width") => width = parse_int(value)?,
            (Section::Matrix, "height") => height = parse_int(value)?,
            (Section::Matrix, "layout") => hardware.layout = parse_layout(value)?,
            (Section::Player, "cycle_interval_s") => {
                player.settings.cycle_interval_s = parse_int(value)?
            }
            (Section::Player, "auto_cycle") => player.settings.auto_cycle = parse_bool(value)?,
            (Section::Player, "mode") => player.settings.mode = parse_mode(value)?,
            (Section::Player, "frame_interval_ms") => {
                player.frame_interval_ms = parse_int(value)?
            }
            (Section::Display, "brightness") => hardware.brightness = parse_int(value)?,
            (Section::Display, "gamma") => hardware.gamma = parse_bool(value)?,
            (Section::Display, "serial_mirror") => hardware.serial_mirror = parse_bool(value)?,
            _ => {}
        }
    }

    player.geometry = MatrixGeometry::new(width, height).map_err(|_| ParseError::InvalidGeometry)?;
    if player.frame_interval_ms == 0 {
        return Err(ParseError::InvalidValue);
    }

    Ok(FirmwareConfig { player, hardware })
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "matrix" => Ok(Section::Matrix),
        "player" => Ok(Section::Player),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_layout(value: &str) -> Result<Layout, ParseError> {
    match parse_string(value) {
        "serpentine" => Ok(Layout::Serpentine),
        "progressive" => Ok(Layout::Progressive),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_mode(value: &str) -> Result<PlayerMode, ParseError> {
    match parse_string(value) {
        "animation" => Ok(PlayerMode::Animation),
        "visualization" => Ok(PlayerMode::Visualization),
        _ => Err(ParseError::InvalidValue),
    }
}
