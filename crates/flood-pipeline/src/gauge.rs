//! Proportional LED-matrix gauge.
//!
//! The river level is mapped onto a strip of `N` pixels as a run of fully
//! lit pixels followed by at most one dimmer pixel carrying the fractional
//! remainder. Pixel words are packed `0x00RRGGBB`.

use crate::state::{StateRecord, MAX_PERCENT};

/// Pixels on the 5x5 matrix, addressed linearly.
pub const MATRIX_LEDS: usize = 25;

/// Brightness of a fully lit pixel.
pub const MAX_LED_VALUE: u32 = 30;

/// Channel offset used while an alert is active (red byte).
pub const ALERT_SHIFT: u32 = 16;
/// Channel offset used while calm (green byte).
pub const CALM_SHIFT: u32 = 8;

/// Renders the gauge for `record` onto a fresh `N`-pixel buffer.
pub fn render<const N: usize>(record: &StateRecord) -> [u32; N] {
    let mut pixels = [0; N];
    render_into(record, &mut pixels);
    pixels
}

/// Renders the gauge into `pixels`, overwriting every element.
pub fn render_into(record: &StateRecord, pixels: &mut [u32]) {
    let shift = if record.alert_active() { ALERT_SHIFT } else { CALM_SHIFT };

    // Lit count in hundredths of a pixel, kept integral so whole-pixel
    // levels never pick up a spurious partial from float rounding.
    let scaled = pixels.len() * usize::from(record.river_level());
    let full_count = scaled / usize::from(MAX_PERCENT);
    let remainder = (scaled % usize::from(MAX_PERCENT)) as u32;

    let full = MAX_LED_VALUE << shift;
    let partial = (remainder * MAX_LED_VALUE / u32::from(MAX_PERCENT)) << shift;

    for (i, pixel) in pixels.iter_mut().enumerate() {
        *pixel = if i < full_count {
            full
        } else if i == full_count && remainder > 0 {
            partial
        } else {
            0
        };
    }
}
