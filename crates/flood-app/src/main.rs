#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use flood_app::prelude::*;

// Application main entry point. The spawner can be used to start async tasks.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Flood monitor {} starting", FW_VERSION);
    let board = FloodBoard::default();

    spawner.must_spawn(watchdog_task(board.wdt));
    spawner.must_spawn(bootsel_task(board.bootsel));

    let endpoints = init_state_channel();
    let joystick = board.joystick.configure().await;
    let status_leds = board.status_leds.configure();
    let buzzer = board.buzzer.configure();
    let matrix = unwrap!(board.matrix.configure());

    spawner.must_spawn(display_task(endpoints.display, CONFIG));
    spawner.must_spawn(status_led_task(
        status_leds,
        endpoints.status_leds,
        CONFIG,
    ));
    spawner.must_spawn(buzzer_task(buzzer, endpoints.buzzer, CONFIG));
    spawner.must_spawn(gauge_task(matrix, endpoints.gauge, CONFIG));

    // Consumers are waiting on the channel before the first sample lands.
    let high_prio_spawner = init_executors();
    high_prio_spawner.must_spawn(sampler_task(
        joystick,
        endpoints.writer,
        CONFIG,
    ));

    info!("All tasks started, delivery {:?}", CONFIG.delivery);
}
