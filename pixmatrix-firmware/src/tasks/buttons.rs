//! Button input task
//!
//! One task instance per button. A press is a falling edge (buttons pull
//! to ground) that is still low after the debounce delay.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use crate::channels::{ButtonAction, ACTION_CHANNEL};

/// Debounce delay
const DEBOUNCE_MS: u64 = 30;

#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(mut button: Input<'static>, action: ButtonAction) {
    info!("Button task started: {:?}", action);

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if button.is_high() {
            continue;
        }

        debug!("Button pressed: {:?}", action);
        if ACTION_CHANNEL.try_send(action).is_err() {
            warn!("Action channel full, dropping {:?}", action);
        }

        button.wait_for_high().await;
    }
}
