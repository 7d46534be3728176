//! Duty-cycled alarm gate.

use embassy_time::Duration;

use crate::actuator::{pattern, Pattern, Step};
use crate::state::StateRecord;

/// Alarm tone frequency.
pub const TONE_HZ: u32 = 1_000;
/// Alarm tone duty cycle while sounding.
pub const TONE_DUTY_PERCENT: u8 = 50;

/// Maps a snapshot to tone on/off steps. `true` means sounding.
pub struct BuzzerGate;

impl BuzzerGate {
    /// Default length of both the tone and the silence.
    pub const HALF_PERIOD: Duration = Duration::from_millis(500);

    pub fn pattern(
        record: &StateRecord,
        half_period: Duration,
    ) -> Pattern<bool> {
        if record.alert_active() {
            pattern([
                Step::new(true, half_period),
                Step::new(false, half_period),
            ])
        } else {
            pattern([Step::new(false, half_period)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(river: u8, rain: u8) -> Pattern<bool> {
        BuzzerGate::pattern(
            &StateRecord::new(river, rain),
            BuzzerGate::HALF_PERIOD,
        )
    }

    #[test]
    fn alert_beeps_then_rests() {
        let steps = gate(80, 0);
        assert_eq!(steps.len(), 2);
        assert!(steps[0].level);
        assert!(!steps[1].level);
        assert!(steps.iter().all(|s| s.hold.as_millis() == 500));
    }

    #[test]
    fn calm_is_silent() {
        let steps = gate(70, 80);
        assert_eq!(steps.len(), 1);
        assert!(!steps[0].level);
        assert_eq!(steps[0].hold, BuzzerGate::HALF_PERIOD);
    }

    #[test]
    fn half_period_sets_tone_and_rest() {
        let half = Duration::from_millis(250);
        let steps = BuzzerGate::pattern(&StateRecord::new(90, 0), half);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.hold == half));
    }
}
