use crate::state::{
    StateRecord, INITIAL_RAIN_VOLUME, INITIAL_RIVER_LEVEL, MAX_PERCENT,
};

/// One pair of raw joystick readings from the 12-bit converter (`0..=4095`).
///
/// The Y axis drives the river level, the X axis drives the rain volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub x: u16,
    pub y: u16,
}

/// Rest position of the stick and the dead zone around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub center_x: u16,
    pub center_y: u16,
    /// Deviations with magnitude up to and including this are ignored.
    pub tolerance: u16,
    /// Percentage change applied per sampling cycle while deflected.
    pub step: u8,
}

impl Calibration {
    /// Values measured on the reference board.
    pub const DEFAULT: Self =
        Self { center_x: 1960, center_y: 2000, tolerance: 250, step: 1 };
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Signed deviation of `raw` from `center`, or zero inside the dead zone.
///
/// Raw readings are not range-checked.
pub const fn dead_zone(raw: u16, center: u16, tolerance: u16) -> i32 {
    let deviation = raw as i32 - center as i32;
    if deviation.abs() > tolerance as i32 {
        deviation
    } else {
        0
    }
}

/// Owns the authoritative river/rain state and integrates stick deflection
/// into it, one step per sample.
#[derive(Debug, Clone)]
pub struct Normalizer {
    calibration: Calibration,
    river_level: u8,
    rain_volume: u8,
}

impl Normalizer {
    pub const fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            river_level: INITIAL_RIVER_LEVEL,
            rain_volume: INITIAL_RAIN_VOLUME,
        }
    }

    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Current state without consuming a sample.
    pub const fn snapshot(&self) -> StateRecord {
        StateRecord::new(self.river_level, self.rain_volume)
    }

    /// Filtered `(x, y)` deviations for a sample.
    pub const fn deviations(&self, sample: AxisSample) -> (i32, i32) {
        let cal = &self.calibration;
        (
            dead_zone(sample.x, cal.center_x, cal.tolerance),
            dead_zone(sample.y, cal.center_y, cal.tolerance),
        )
    }

    /// Applies one sample and returns the resulting snapshot.
    pub fn update(&mut self, sample: AxisSample) -> StateRecord {
        let (dx, dy) = self.deviations(sample);
        let step = self.calibration.step;
        self.river_level = integrate(self.river_level, dy, step);
        self.rain_volume = integrate(self.rain_volume, dx, step);
        self.snapshot()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Calibration::DEFAULT)
    }
}

fn integrate(value: u8, deviation: i32, step: u8) -> u8 {
    let next = match deviation.signum() {
        0 => return value,
        1 => i16::from(value) + i16::from(step),
        _ => i16::from(value) - i16::from(step),
    };
    next.min(i16::from(MAX_PERCENT)).max(0) as u8
}
