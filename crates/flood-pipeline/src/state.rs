/// Upper bound of both percentages.
pub const MAX_PERCENT: u8 = 100;

/// River level strictly above this raises a river alert.
pub const RIVER_ALERT_LEVEL: u8 = 70;
/// Rain volume strictly above this raises a rain alert.
pub const RAIN_ALERT_LEVEL: u8 = 80;

pub const INITIAL_RIVER_LEVEL: u8 = 50;
pub const INITIAL_RAIN_VOLUME: u8 = 30;

/// Which reading raised the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertOrigin {
    River,
    Rain,
}

/// Derives the alert state from the two percentages.
///
/// Returns `None` when neither threshold is exceeded. A simultaneous breach
/// is always attributed to the river.
pub const fn classify(river_level: u8, rain_volume: u8) -> Option<AlertOrigin> {
    if river_level > RIVER_ALERT_LEVEL {
        Some(AlertOrigin::River)
    } else if rain_volume > RAIN_ALERT_LEVEL {
        Some(AlertOrigin::Rain)
    } else {
        None
    }
}

/// Snapshot of the monitored quantities.
///
/// Both percentages are clamped to `0..=100` on construction, and the alert
/// flags are derived from them on demand so they can never disagree.
/// Records are `Copy` and move through the distribution channel by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateRecord {
    river_level: u8,
    rain_volume: u8,
}

impl StateRecord {
    pub const fn new(river_level: u8, rain_volume: u8) -> Self {
        Self {
            river_level: clamp_percent(river_level),
            rain_volume: clamp_percent(rain_volume),
        }
    }

    pub const fn river_level(&self) -> u8 {
        self.river_level
    }

    pub const fn rain_volume(&self) -> u8 {
        self.rain_volume
    }

    pub const fn alert(&self) -> Option<AlertOrigin> {
        classify(self.river_level, self.rain_volume)
    }

    pub const fn alert_active(&self) -> bool {
        self.alert().is_some()
    }

    /// `true` for a river-driven alert. Only meaningful while
    /// [`alert_active`](Self::alert_active) holds.
    pub const fn alert_origin(&self) -> bool {
        matches!(self.alert(), Some(AlertOrigin::River))
    }
}

impl Default for StateRecord {
    fn default() -> Self {
        Self::new(INITIAL_RIVER_LEVEL, INITIAL_RAIN_VOLUME)
    }
}

const fn clamp_percent(value: u8) -> u8 {
    if value > MAX_PERCENT {
        MAX_PERCENT
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_thresholds_everywhere() {
        for r in 0..=MAX_PERCENT {
            for v in 0..=MAX_PERCENT {
                let alert = classify(r, v);
                assert_eq!(alert.is_some(), r > 70 || v > 80, "r={r} v={v}");
                if r > 70 {
                    assert_eq!(alert, Some(AlertOrigin::River));
                }
            }
        }
    }

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(classify(70, 80), None);
        assert_eq!(classify(71, 0), Some(AlertOrigin::River));
        assert_eq!(classify(0, 81), Some(AlertOrigin::Rain));
        assert_eq!(classify(100, 100), Some(AlertOrigin::River));
    }

    #[test]
    fn record_flags_follow_levels() {
        let calm = StateRecord::new(50, 30);
        assert!(!calm.alert_active());

        let rain = StateRecord::new(40, 90);
        assert!(rain.alert_active());
        assert!(!rain.alert_origin());

        let river = StateRecord::new(75, 95);
        assert!(river.alert_active());
        assert!(river.alert_origin());
    }

    #[test]
    fn construction_clamps() {
        let record = StateRecord::new(200, 101);
        assert_eq!(record.river_level(), 100);
        assert_eq!(record.rain_volume(), 100);
    }

    #[test]
    fn default_is_boot_state() {
        let record = StateRecord::default();
        assert_eq!(record.river_level(), 50);
        assert_eq!(record.rain_volume(), 30);
        assert!(!record.alert_active());
    }
}
