//! Tick-driven player

use crate::codec::CodecError;
use crate::config::{PlayerConfig, PlayerMode, PlayerSettings};
use crate::playlist::{Availability, NavError, PlaylistController, Selection};
use crate::scheduler::PlaybackScheduler;
use crate::traits::{PixelSink, ResourceStore};

use super::command::{CommandOutcome, ControlCommand};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Outcome of the automatic advance, if one was due
    pub advanced: Option<Result<Selection, NavError>>,
    /// Outcome of the frame decode, `None` outside animation mode
    pub rendered: Option<Result<u8, CodecError>>,
}

/// Snapshot for status displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerStatus {
    pub index: usize,
    pub count: usize,
    pub mode: PlayerMode,
    pub settings: PlayerSettings,
    pub availability: Availability,
}

/// Animation player
///
/// Owns the playlist (and through it the storage handle and codec) and the
/// cycle scheduler. The board calls [`tick`](Self::tick) once per frame
/// interval and feeds control commands through [`apply`](Self::apply)
/// between ticks.
pub struct Player<S: ResourceStore> {
    playlist: PlaylistController<S>,
    scheduler: PlaybackScheduler,
    mode: PlayerMode,
}

impl<S: ResourceStore> Player<S> {
    /// Create a player; nothing is opened until [`start`](Self::start)
    pub fn new(store: S, config: &PlayerConfig, now: u64) -> Self {
        let settings = config.settings;
        Self {
            playlist: PlaylistController::new(store, config.geometry),
            scheduler: PlaybackScheduler::new(
                settings.cycle_interval_s,
                settings.auto_cycle,
                now,
            ),
            mode: settings.mode,
        }
    }

    /// Open the first animation and arm the scheduler
    pub fn start(&mut self, now: u64) -> Result<Selection, NavError> {
        self.scheduler.on_manual_navigation(now);
        self.playlist.reload()
    }

    /// Run one tick: advance if due, then decode a frame in animation mode
    pub fn tick<D: PixelSink + ?Sized>(&mut self, now: u64, display: &mut D) -> TickReport {
        let advanced = self
            .scheduler
            .tick(now)
            .then(|| self.playlist.select_next());

        let rendered = match self.mode {
            PlayerMode::Animation => Some(self.playlist.render_frame(display)),
            PlayerMode::Visualization => None,
        };

        TickReport { advanced, rendered }
    }

    /// Apply a control command
    pub fn apply(&mut self, command: ControlCommand, now: u64) -> CommandOutcome {
        if command.is_navigation() {
            self.scheduler.on_manual_navigation(now);
        }

        match command {
            ControlCommand::Next => CommandOutcome::Navigated(self.playlist.select_next()),
            ControlCommand::Previous => {
                CommandOutcome::Navigated(self.playlist.select_previous())
            }
            ControlCommand::Reload => CommandOutcome::Navigated(self.playlist.reload()),
            ControlCommand::Play => {
                self.scheduler.play(now);
                CommandOutcome::Updated(self.settings())
            }
            ControlCommand::Pause => {
                self.scheduler.pause();
                CommandOutcome::Updated(self.settings())
            }
            ControlCommand::SetInterval(seconds) => {
                self.scheduler.set_interval(seconds, now);
                CommandOutcome::Updated(self.settings())
            }
            ControlCommand::SetMode(mode) => {
                self.mode = mode;
                CommandOutcome::Updated(self.settings())
            }
        }
    }

    /// Current runtime settings
    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings {
            cycle_interval_s: self.scheduler.interval_s(),
            auto_cycle: self.scheduler.is_enabled(),
            mode: self.mode,
        }
    }

    pub fn status(&self) -> PlayerStatus {
        let playlist = self.playlist.status();
        PlayerStatus {
            index: playlist.index,
            count: playlist.count,
            mode: self.mode,
            settings: self.settings(),
            availability: playlist.availability,
        }
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn playlist(&self) -> &PlaylistController<S> {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut PlaylistController<S> {
        &mut self.playlist
    }

    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatrixGeometry;
    use crate::testing::{reference_animation, RecordingSink, TestStore, GREEN, MAGENTA};

    fn config() -> PlayerConfig {
        let mut config = PlayerConfig::new(MatrixGeometry::new(2, 2).unwrap());
        config.settings.cycle_interval_s = 10;
        config
    }

    fn player(names: &[&str]) -> Player<TestStore> {
        let store = TestStore::with(names, &reference_animation());
        let mut player = Player::new(store, &config(), 0);
        player.start(0).unwrap();
        player
    }

    #[test]
    fn test_tick_renders_frames() {
        let mut player = player(&["a.maf"]);
        let mut sink = RecordingSink::default();

        let report = player.tick(100, &mut sink);
        assert_eq!(report.advanced, None);
        assert_eq!(report.rendered, Some(Ok(0)));
        assert_eq!(
            sink.frames[0],
            vec![(0, 0, GREEN), (1, 0, MAGENTA), (0, 1, MAGENTA), (1, 1, MAGENTA)]
        );

        assert_eq!(player.tick(200, &mut sink).rendered, Some(Ok(1)));
        assert_eq!(player.tick(300, &mut sink).rendered, Some(Ok(2)));
        assert_eq!(player.tick(400, &mut sink).rendered, Some(Ok(0)));
        assert_eq!(sink.frames[3], sink.frames[0]);
    }

    #[test]
    fn test_tick_cycles_on_interval() {
        let mut player = player(&["a.maf", "b.maf", "c.maf"]);
        let mut sink = RecordingSink::default();

        let mut advances = 0;
        for now in (0..=30_000).step_by(100) {
            if let Some(result) = player.tick(now, &mut sink).advanced {
                assert!(result.is_ok());
                advances += 1;
            }
        }

        assert_eq!(advances, 3);
        assert_eq!(player.status().index, 0);
    }

    #[test]
    fn test_manual_navigation_postpones_cycle() {
        let mut player = player(&["a.maf", "b.maf"]);
        let mut sink = RecordingSink::default();

        let outcome = player.apply(ControlCommand::Next, 9_000);
        assert!(matches!(outcome, CommandOutcome::Navigated(Ok(Selection { index: 1, .. }))));

        assert_eq!(player.tick(10_000, &mut sink).advanced, None);
        assert!(player.tick(19_000, &mut sink).advanced.is_some());
        assert_eq!(player.status().index, 0);
    }

    #[test]
    fn test_previous_wraps() {
        let mut player = player(&["a.maf", "b.maf", "c.maf"]);

        player.apply(ControlCommand::Previous, 0);
        assert_eq!(player.status().index, 2);
    }

    #[test]
    fn test_pause_stops_cycling() {
        let mut player = player(&["a.maf", "b.maf"]);
        let mut sink = RecordingSink::default();

        let outcome = player.apply(ControlCommand::Pause, 0);
        assert_eq!(
            outcome,
            CommandOutcome::Updated(PlayerSettings {
                cycle_interval_s: 10,
                auto_cycle: false,
                mode: PlayerMode::Animation,
            })
        );
        assert_eq!(player.tick(60_000, &mut sink).advanced, None);

        player.apply(ControlCommand::Play, 60_000);
        assert!(player.tick(70_000, &mut sink).advanced.is_some());
    }

    #[test]
    fn test_zero_interval_disables_cycling() {
        let mut player = player(&["a.maf", "b.maf"]);
        let mut sink = RecordingSink::default();

        player.apply(ControlCommand::SetInterval(0), 0);
        assert_eq!(player.settings().cycle_interval_s, 0);
        assert_eq!(player.tick(1_000_000, &mut sink).advanced, None);
        assert_eq!(player.status().index, 0);
    }

    #[test]
    fn test_visualization_mode_skips_decode() {
        let mut player = player(&["a.maf", "b.maf"]);
        let mut sink = RecordingSink::default();

        player.apply(ControlCommand::SetMode(PlayerMode::Visualization), 0);
        let report = player.tick(10_000, &mut sink);

        // Cycling continues, only the decode is suppressed
        assert!(report.advanced.is_some());
        assert_eq!(report.rendered, None);
        assert_eq!(sink.pixel_count(), 0);

        player.apply(ControlCommand::SetMode(PlayerMode::Animation), 10_000);
        assert_eq!(player.tick(10_100, &mut sink).rendered, Some(Ok(0)));
    }

    #[test]
    fn test_empty_store() {
        let mut player = Player::new(TestStore::default(), &config(), 0);
        let mut sink = RecordingSink::default();

        assert_eq!(player.start(0), Err(NavError::EmptyPlaylist));
        let report = player.tick(10_000, &mut sink);
        assert_eq!(report.advanced, Some(Err(NavError::EmptyPlaylist)));
        assert_eq!(report.rendered, Some(Err(CodecError::NotReady)));
        assert_eq!(player.status().availability, Availability::Idle);
    }

    #[test]
    fn test_reload_picks_up_uploads() {
        let mut player = Player::new(TestStore::default(), &config(), 0);
        assert!(player.start(0).is_err());

        player
            .playlist_mut()
            .store_mut()
            .add("new.maf", reference_animation());
        let outcome = player.apply(ControlCommand::Reload, 500);

        assert!(matches!(outcome, CommandOutcome::Navigated(Ok(_))));
        assert_eq!(player.status().count, 1);
        assert_eq!(player.status().availability, Availability::Playing);
        assert_eq!(player.scheduler().deadline(), 10_500);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = config();
        config.settings.auto_cycle = false;
        config.settings.mode = PlayerMode::Visualization;
        let player = Player::new(TestStore::default(), &config, 0);

        assert_eq!(player.settings(), config.settings);
        assert_eq!(player.mode(), PlayerMode::Visualization);
    }
}
