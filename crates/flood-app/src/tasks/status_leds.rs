use crate::prelude::*;
use embassy_nrf::gpio::Level;
use flood_bsp::StatusLeds;
use flood_pipeline::{LedLevels, LedMode};

fn apply(leds: &mut StatusLeds, levels: LedLevels) {
    leds.red.set_level(Level::from(levels.red));
    leds.blue.set_level(Level::from(levels.blue));
}

/// Plays the indicator pattern for each snapshot: blue while calm, solid
/// red for a river alert, blinking red for a rain alert.
#[embassy_executor::task]
pub async fn status_led_task(
    mut leds: StatusLeds,
    mut source: StateReader,
    config: PipelineConfig,
) {
    let mut mode: Option<LedMode> = None;
    loop {
        let Some(record) =
            next_snapshot(&mut source, "Status LEDs", config.receive_timeout)
                .await
        else {
            continue;
        };

        let next = LedMode::from_record(&record);
        if mode != Some(next) {
            debug!("Status LEDs: {:?}", next);
            mode = Some(next);
        }
        for step in next.pattern(config.led_dwell) {
            apply(&mut leds, step.level);
            Timer::after(step.hold).await;
        }
    }
}

