//! Player task
//!
//! Owns the playback engine, the LED frame buffer and the WS2812 output.
//! Every tick it drains button actions, lets the player advance and decode
//! one frame, and pushes the frame out when one was committed.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Instant, Ticker, Timer};
use smart_leds::RGB8;

use pixmatrix_core::codec::CodecError;
use pixmatrix_core::config::{PlayerMode, PlayerSettings};
use pixmatrix_core::player::{CommandOutcome, ControlCommand, Player, TickReport};
use pixmatrix_core::playlist::{NavError, Selection};
use pixmatrix_drivers::led::{draw_splash, LedMatrix};
use pixmatrix_drivers::serial::MatrixMirror;
use pixmatrix_drivers::storage::MemoryStore;

use crate::animations::{ANIMATIONS, ANIMATION_NAMESPACE, MATRIX_PIXELS, MAX_ANIMATIONS};
use crate::channels::{ButtonAction, ACTION_CHANNEL};
use crate::config::{FirmwareConfig, SettingsStore};

/// How long the boot splash stays up
const SPLASH_MS: u64 = 1000;

pub type LedOutput = PioWs2812<'static, PIO0, 0, MATRIX_PIXELS, Grb>;
pub type SerialMirror = MatrixMirror<BufferedUartTx>;

/// Everything the player task owns
pub struct PlayerResources {
    pub config: FirmwareConfig,
    pub leds: LedOutput,
    pub mirror: Option<SerialMirror>,
    pub settings: SettingsStore<'static>,
}

#[embassy_executor::task]
pub async fn player_task(resources: PlayerResources) {
    let PlayerResources {
        config,
        mut leds,
        mut mirror,
        settings: mut settings_store,
    } = resources;
    let geometry = config.player.geometry;

    info!(
        "Player task started: {}x{}, {} animations",
        geometry.width(),
        geometry.height(),
        ANIMATIONS.len()
    );

    let mut store = MemoryStore::<'static, MAX_ANIMATIONS>::new(ANIMATION_NAMESPACE);
    for &(name, data) in ANIMATIONS {
        if store.insert(name, data).is_err() {
            warn!("Animation table full, skipping {}", name);
        }
    }

    let mut matrix = match LedMatrix::<MATRIX_PIXELS>::new(geometry, config.hardware.layout) {
        Ok(matrix) => matrix,
        Err(e) => {
            error!("Cannot create frame buffer: {:?}", e);
            return;
        }
    };
    matrix.set_brightness(config.hardware.brightness);
    matrix.set_gamma(config.hardware.gamma);

    if let Some(mirror) = mirror.as_mut() {
        if mirror.write_info(geometry).is_err() {
            warn!("Serial mirror: failed to send LEDINFO");
        }
    }

    draw_splash(&mut matrix, geometry);
    show(&mut matrix, &mut leds, &mut mirror).await;
    Timer::after(Duration::from_millis(SPLASH_MS)).await;

    let start = Instant::now();
    let mut player = Player::new(store, &config.player, 0);
    log_navigation(player.start(0));

    let mut ticker = Ticker::every(Duration::from_millis(config.player.frame_interval_ms as u64));

    loop {
        ticker.next().await;
        let now = start.elapsed().as_millis();

        while let Ok(action) = ACTION_CHANNEL.try_receive() {
            let command = to_command(action, &player.settings());
            debug!("Applying {:?}", command);

            match player.apply(command, now) {
                CommandOutcome::Navigated(result) => log_navigation(result),
                CommandOutcome::Updated(settings) => {
                    info!(
                        "Settings: interval={}s auto={} mode={:?}",
                        settings.cycle_interval_s, settings.auto_cycle, settings.mode
                    );
                    if let Err(e) = settings_store.save(&settings).await {
                        warn!("Failed to persist settings: {:?}", e);
                    }
                }
            }
        }

        let report = player.tick(now, &mut matrix);
        log_tick(&report);

        show(&mut matrix, &mut leds, &mut mirror).await;
    }
}

/// Map a button press onto a player command
fn to_command(action: ButtonAction, settings: &PlayerSettings) -> ControlCommand {
    match action {
        ButtonAction::Next => ControlCommand::Next,
        ButtonAction::Previous => ControlCommand::Previous,
        ButtonAction::PlayPause if settings.auto_cycle => ControlCommand::Pause,
        ButtonAction::PlayPause => ControlCommand::Play,
        ButtonAction::Mode => ControlCommand::SetMode(match settings.mode {
            PlayerMode::Animation => PlayerMode::Visualization,
            PlayerMode::Visualization => PlayerMode::Animation,
        }),
    }
}

/// Push a committed frame to the LEDs and the serial mirror
async fn show(
    matrix: &mut LedMatrix<MATRIX_PIXELS>,
    leds: &mut LedOutput,
    mirror: &mut Option<SerialMirror>,
) {
    if !matrix.take_dirty() {
        return;
    }

    match <&[RGB8; MATRIX_PIXELS]>::try_from(matrix.strip()) {
        Ok(frame) => leds.write(frame).await,
        Err(_) => error!("Frame buffer size does not match the LED count"),
    }

    if let Some(mirror) = mirror.as_mut() {
        if mirror.write_frame(matrix.pixels()).is_err() {
            trace!("Serial mirror: dropped frame {}", matrix.frame_count());
        }
    }
}

fn log_navigation(result: Result<Selection, NavError>) {
    match result {
        Ok(selection) => info!(
            "Playing animation {}: {} frames, {} colors",
            selection.index, selection.header.frame_count, selection.header.palette_len
        ),
        Err(NavError::EmptyPlaylist) => debug!("No animations to play"),
        Err(NavError::Unavailable(e)) => warn!("Animation unavailable: {:?}", e),
        Err(NavError::Rejected(reason)) => warn!("Animation rejected: {:?}", reason),
    }
}

fn log_tick(report: &TickReport) {
    if let Some(result) = report.advanced {
        log_navigation(result);
    }

    match report.rendered {
        Some(Err(CodecError::PaletteIndex { index, palette_len })) => warn!(
            "Skipped frame: palette index {} out of {} colors",
            index, palette_len
        ),
        Some(Err(CodecError::NotReady)) | None => {}
        Some(Err(e)) => warn!("Frame decode failed: {:?}", e),
        Some(Ok(frame)) => trace!("Frame {}", frame),
    }
}
