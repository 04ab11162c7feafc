//! Player
//!
//! Per-tick orchestration of the playlist, codec and scheduler, and the
//! control command surface used by buttons or a network front-end.

pub mod command;
pub mod engine;

pub use command::{CommandOutcome, ControlCommand};
pub use engine::{Player, PlayerStatus, TickReport};
