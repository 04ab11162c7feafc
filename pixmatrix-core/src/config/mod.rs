//! Configuration types
//!
//! Board-agnostic player configuration. Runtime settings can be stored as
//! postcard binary data.

#[cfg(feature = "serde")]
pub mod settings;
pub mod types;

#[cfg(feature = "serde")]
pub use settings::{decode_settings, encode_settings, MAX_SETTINGS_SIZE, SETTINGS_VERSION};
pub use types::*;
