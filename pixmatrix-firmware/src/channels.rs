//! Inter-task communication channels
//!
//! Button tasks only push actions here; the player task drains the channel
//! at the start of every tick, so the playback engine is never shared.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for button actions
const ACTION_CHANNEL_SIZE: usize = 8;

/// What a button press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Next,
    Previous,
    /// Toggle automatic cycling
    PlayPause,
    /// Toggle animation/visualization mode
    Mode,
}

/// Button actions for the player task
pub static ACTION_CHANNEL: Channel<CriticalSectionRawMutex, ButtonAction, ACTION_CHANNEL_SIZE> =
    Channel::new();
