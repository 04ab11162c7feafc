//! Control commands

use crate::config::{PlayerMode, PlayerSettings};
use crate::playlist::{NavError, Selection};

/// Commands accepted by [`Player::apply`](super::Player::apply)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    /// Switch to the next animation
    Next,
    /// Switch to the previous animation
    Previous,
    /// Reopen the current animation (after uploads or deletions)
    Reload,
    /// Enable automatic cycling
    Play,
    /// Disable automatic cycling
    Pause,
    /// Set the automatic cycle interval in seconds (0 = never)
    SetInterval(u16),
    /// Switch display mode
    SetMode(PlayerMode),
}

impl ControlCommand {
    /// Check if the command switches animations
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            ControlCommand::Next | ControlCommand::Previous | ControlCommand::Reload
        )
    }
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// A navigation command ran
    Navigated(Result<Selection, NavError>),
    /// Settings changed; the new values should be persisted
    Updated(PlayerSettings),
}
