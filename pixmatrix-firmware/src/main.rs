//! pixmatrix - LED Matrix Animation Player Firmware
//!
//! Main firmware binary for RP2040 boards driving a WS2812 matrix.
//! Animations in MAF format are linked into flash at build time and
//! decoded one frame per tick.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pixmatrix_drivers::serial::MatrixMirror;

use crate::channels::ButtonAction;
use crate::config::{parse_config, FirmwareConfig, SettingsStore};

/// Embedded configuration (compiled into firmware)
/// Edit player.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../player.toml");

mod animations {
    //! Generated by build.rs from player.toml and animations/*.maf
    include!(concat!(env!("OUT_DIR"), "/animations.rs"));
}
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pixmatrix firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut config = load_config();

    // Settings changed at runtime win over player.toml
    let mut settings = SettingsStore::new(p.FLASH, p.DMA_CH1);
    match settings.load().await {
        Ok(stored) => {
            info!("Loaded settings from flash");
            config.player.settings = stored;
        }
        Err(e) => info!("No stored settings ({:?}), using player.toml", e),
    }

    // WS2812 data on GPIO16 via PIO0
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let leds = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    info!("WS2812 output initialized");

    // Serial mirror on UART0 (GPIO0 TX, GPIO1 RX), 115200 baud
    let mirror = if config.hardware.serial_mirror {
        let tx_buf = TX_BUF.init([0u8; 1024]);
        let rx_buf = RX_BUF.init([0u8; 16]);
        let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
        let (tx, _rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
        info!("Serial mirror enabled");
        Some(MatrixMirror::new(tx))
    } else {
        None
    };

    // Buttons to ground on GPIO2..GPIO5
    let buttons = [
        (Input::new(p.PIN_2, Pull::Up), ButtonAction::Next),
        (Input::new(p.PIN_3, Pull::Up), ButtonAction::Previous),
        (Input::new(p.PIN_4, Pull::Up), ButtonAction::PlayPause),
        (Input::new(p.PIN_5, Pull::Up), ButtonAction::Mode),
    ];

    for (button, action) in buttons {
        spawner.spawn(tasks::button_task(button, action)).unwrap();
    }
    spawner
        .spawn(tasks::player_task(tasks::PlayerResources {
            config,
            leds,
            mirror,
            settings,
        }))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded player.toml
///
/// build.rs has already validated the file, so a failure here means the
/// runtime parser and the build check disagree.
fn load_config() -> FirmwareConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration: {}x{}, interval {}s, tick {}ms",
                config.player.geometry.width(),
                config.player.geometry.height(),
                config.player.settings.cycle_interval_s,
                config.player.frame_interval_ms
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using generated geometry with default settings");
            fallback_config()
        }
    }
}

fn fallback_config() -> FirmwareConfig {
    use pixmatrix_core::config::{MatrixGeometry, PlayerConfig};

    let geometry = match MatrixGeometry::new(animations::MATRIX_WIDTH, animations::MATRIX_HEIGHT) {
        Ok(geometry) => geometry,
        Err(_) => defmt::panic!("Generated matrix geometry is invalid"),
    };
    FirmwareConfig {
        player: PlayerConfig::new(geometry),
        hardware: Default::default(),
    }
}
