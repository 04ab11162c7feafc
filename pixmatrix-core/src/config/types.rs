//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported matrix (pixels per frame)
///
/// Bounds the codec's frame staging buffer.
pub const MAX_FRAME_PIXELS: usize = 32 * 32;

/// Default automatic cycle interval in seconds
pub const DEFAULT_CYCLE_INTERVAL_S: u16 = 10;

/// Default tick period in milliseconds
pub const DEFAULT_FRAME_INTERVAL_MS: u16 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    InvalidGeometry,
    /// Matrix exceeds [`MAX_FRAME_PIXELS`]
    GeometryTooLarge,
    /// Settings could not be serialized
    Serialize,
    /// Settings could not be deserialized
    Deserialize,
    /// Stored settings have an unknown version
    VersionMismatch { found: u8 },
}

/// Fixed dimensions of the LED matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixGeometry {
    width: u8,
    height: u8,
}

impl MatrixGeometry {
    /// Create a geometry, rejecting empty or oversized matrices
    pub const fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGeometry);
        }
        if width as usize * height as usize > MAX_FRAME_PIXELS {
            return Err(ConfigError::GeometryTooLarge);
        }
        Ok(Self { width, height })
    }

    /// Matrix width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Matrix height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of pixels in one frame
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// What owns the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlayerMode {
    /// Stored animations are decoded every tick
    #[default]
    Animation,
    /// An external renderer (audio visualization) draws; decoding is paused
    Visualization,
}

/// Settings that can be changed at runtime through control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerSettings {
    /// Seconds between automatic advances (0 = never)
    pub cycle_interval_s: u16,
    /// Automatic cycling enabled (play/pause)
    pub auto_cycle: bool,
    /// Display mode
    pub mode: PlayerMode,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            cycle_interval_s: DEFAULT_CYCLE_INTERVAL_S,
            auto_cycle: true,
            mode: PlayerMode::Animation,
        }
    }
}

/// Complete player configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerConfig {
    /// Matrix dimensions every animation must match
    pub geometry: MatrixGeometry,
    /// Runtime settings at boot
    pub settings: PlayerSettings,
    /// Tick period of the board loop
    pub frame_interval_ms: u16,
}

impl PlayerConfig {
    /// Create a configuration with default settings
    pub fn new(geometry: MatrixGeometry) -> Self {
        Self {
            geometry,
            settings: PlayerSettings::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}
