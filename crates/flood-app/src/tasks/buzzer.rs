use crate::prelude::*;
use embassy_nrf::pwm::{DutyCycle, SimplePwm};
use flood_bsp::BUZZER_MAX_DUTY;
use flood_pipeline::{BuzzerGate, TONE_DUTY_PERCENT};

const TONE_DUTY: u16 =
    BUZZER_MAX_DUTY / 100 * TONE_DUTY_PERCENT as u16;

/// Beeps 500 ms on / 500 ms off for as long as an alert is active.
#[embassy_executor::task]
pub async fn buzzer_task(
    mut buzzer: SimplePwm<'static>,
    mut source: StateReader,
    config: PipelineConfig,
) {
    let mut sounding = false;
    loop {
        let Some(record) =
            next_snapshot(&mut source, "Buzzer", config.receive_timeout).await
        else {
            buzzer.set_duty(0, DutyCycle::normal(0));
            continue;
        };

        if record.alert_active() != sounding {
            sounding = record.alert_active();
            debug!("Buzzer: alarm {}", if sounding { "on" } else { "off" });
        }

        for step in BuzzerGate::pattern(&record, config.buzzer_half_period) {
            let duty = if step.level { TONE_DUTY } else { 0 };
            buzzer.set_duty(0, DutyCycle::normal(duty));
            Timer::after(step.hold).await;
        }
    }
}
