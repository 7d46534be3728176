use crate::prelude::*;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::peripherals::{P0_11, WDT};
use embassy_nrf::wdt;
use embassy_nrf::wdt::Watchdog;
use embassy_nrf::Peri;

pub mod buzzer;
pub mod display;
pub mod gauge;
pub mod sampler;
pub mod status_leds;

// Re-exports
pub use buzzer::*;
pub use display::*;
pub use gauge::*;
pub use sampler::*;
pub use status_leds::*;

/// Waits for the newest snapshot for `consumer`, reporting any that were
/// overwritten before it caught up. A failed receive is logged and yields
/// `None` so the caller skips this actuation cycle.
pub(crate) async fn next_snapshot(
    source: &mut StateReader,
    consumer: &'static str,
    timeout: Option<Duration>,
) -> Option<StateRecord> {
    let result = source.next_within(timeout).await;
    let missed = source.take_missed();
    if missed > 0 {
        warn!("{}: lagged, {} snapshots overwritten", consumer, missed);
    }
    match result {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("{}: no state snapshot: {:?}", consumer, e);
            None
        }
    }
}

// Keeps our system alive
#[embassy_executor::task]
pub async fn watchdog_task(wdt: Peri<'static, WDT>) {
    let wdt_config = unwrap!(wdt::Config::try_new(&wdt));
    let (_wdt, [mut handle]) = match Watchdog::try_new(wdt, wdt_config) {
        Ok(x) => x,
        Err(_) => {
            // Watchdog already running with another handle count; wait for
            // it to expire.
            loop {
                cortex_m::asm::wfe();
            }
        }
    };
    loop {
        handle.pet();
        Timer::after(Duration::from_secs(2)).await;
    }
}

/// GPREGRET value the UF2 bootloader checks to stay in mass-storage mode.
const UF2_BOOT_MAGIC: u8 = 0x57;

/// Reboots into the bootloader once the boot button has been held low
/// for the debounce interval. Shares nothing with the state pipeline.
#[embassy_executor::task]
pub async fn bootsel_task(btn_pin: Peri<'static, P0_11>) {
    const DEBOUNCE: Duration = Duration::from_millis(200);

    let mut button = Input::new(btn_pin, Pull::Up);

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(DEBOUNCE).await;
        if button.is_high() {
            debug!("Boot button released within debounce, ignored");
            continue;
        }

        info!("Boot button pressed, entering bootloader");
        embassy_nrf::pac::POWER
            .gpregret()
            .write(|w| w.set_gpregret(UF2_BOOT_MAGIC));
        cortex_m::peripheral::SCB::sys_reset();
    }
}
