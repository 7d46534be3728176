//! Red/blue status indicator driven by the alert state.

use embassy_time::Duration;

use crate::actuator::{pattern, Pattern, Step};
use crate::state::{AlertOrigin, StateRecord};

/// Outputs of the two status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLevels {
    /// Danger indicator.
    pub red: bool,
    /// Safe indicator.
    pub blue: bool,
}

impl LedLevels {
    pub const SAFE: Self = Self { red: false, blue: true };
    pub const DANGER: Self = Self { red: true, blue: false };
    pub const OFF: Self = Self { red: false, blue: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    Calm,
    AlertRiver,
    AlertRain,
}

impl LedMode {
    /// Default dwell of every indicator step.
    pub const DWELL: Duration = Duration::from_millis(300);

    pub const fn from_record(record: &StateRecord) -> Self {
        match record.alert() {
            None => Self::Calm,
            Some(AlertOrigin::River) => Self::AlertRiver,
            Some(AlertOrigin::Rain) => Self::AlertRain,
        }
    }

    /// Waveform to play before taking the next snapshot.
    ///
    /// Every step lasts `dwell`. A rain alert blinks the danger LED;
    /// repeated snapshots in that mode chain into a continuous square wave.
    pub fn pattern(self, dwell: Duration) -> Pattern<LedLevels> {
        match self {
            Self::Calm => pattern([Step::new(LedLevels::SAFE, dwell)]),
            Self::AlertRiver => pattern([Step::new(LedLevels::DANGER, dwell)]),
            Self::AlertRain => pattern([
                Step::new(LedLevels::DANGER, dwell),
                Step::new(LedLevels::OFF, dwell),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(records: &[StateRecord]) -> heapless::Vec<Step<LedLevels>, 64> {
        let mut timeline = heapless::Vec::new();
        for record in records {
            for step in LedMode::from_record(record).pattern(LedMode::DWELL) {
                timeline.push(step).unwrap();
            }
        }
        timeline
    }

    #[test]
    fn modes_follow_alert_origin() {
        assert_eq!(
            LedMode::from_record(&StateRecord::new(10, 10)),
            LedMode::Calm
        );
        assert_eq!(
            LedMode::from_record(&StateRecord::new(71, 10)),
            LedMode::AlertRiver
        );
        assert_eq!(
            LedMode::from_record(&StateRecord::new(10, 81)),
            LedMode::AlertRain
        );
        assert_eq!(
            LedMode::from_record(&StateRecord::new(90, 90)),
            LedMode::AlertRiver
        );
    }

    #[test]
    fn sustained_rain_alert_blinks() {
        let timeline = play(&[StateRecord::new(10, 95); 8]);
        assert_eq!(timeline.len(), 16);
        for (i, step) in timeline.iter().enumerate() {
            assert_eq!(step.hold, Duration::from_millis(300));
            assert_eq!(step.level.red, i % 2 == 0);
            assert!(!step.level.blue);
        }
    }

    #[test]
    fn sustained_river_alert_stays_solid() {
        let timeline = play(&[StateRecord::new(85, 10); 8]);
        assert!(timeline.iter().all(|s| s.level == LedLevels::DANGER));
        assert!(timeline.iter().all(|s| s.hold.as_millis() == 300));
    }

    #[test]
    fn calm_holds_safe_indicator() {
        let steps = LedMode::Calm.pattern(LedMode::DWELL);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].level, LedLevels::SAFE);
        assert_eq!(steps[0].hold, LedMode::DWELL);
    }

    #[test]
    fn dwell_sets_every_step() {
        let dwell = Duration::from_millis(120);
        let steps = LedMode::AlertRain.pattern(dwell);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.hold == dwell));
    }
}
