//! Text layout for the 128x64 status panel.
//!
//! [`compose`] decides what goes where; drawing glyphs and flushing the
//! buffer is up to the panel driver.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::state::{AlertOrigin, StateRecord};

pub const ALERT_BANNER: &str = "ALERT!";
pub const RIVER_MESSAGE: &str = "RIVER FULL!";
pub const RAIN_MESSAGE: &str = "HEAVY RAIN!";

const LEVEL_LABEL: &str = "LEVEL:";
const RAIN_LABEL: &str = "RAIN:";

const LABEL_X: u8 = 5;
const VALUE_X: u8 = 70;
const UNIT_X: u8 = 100;
const LEVEL_Y: u8 = 7;
const RAIN_Y: u8 = 17;
const BANNER_Y: u8 = 27;
const MESSAGE_Y: u8 = 37;

const MAX_TEXT: usize = 12;
const MAX_ITEMS: usize = 8;

/// Rectangle outline or fill in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextItem {
    pub x: u8,
    pub y: u8,
    pub text: String<MAX_TEXT>,
}

/// Everything drawn for one snapshot, in drawing order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    pub border: [Rect; 2],
    pub items: Vec<TextItem, MAX_ITEMS>,
}

impl DisplayFrame {
    /// Thick double border: a filled outer rectangle with a cleared inner one.
    pub const BORDER: [Rect; 2] = [
        Rect { x: 1, y: 1, width: 126, height: 62, fill: true },
        Rect { x: 4, y: 4, width: 120, height: 56, fill: false },
    ];

    fn new() -> Self {
        Self { border: Self::BORDER, items: Vec::new() }
    }

    fn text(&mut self, x: u8, y: u8, args: core::fmt::Arguments<'_>) {
        let mut text = String::new();
        // Every value placed on the panel fits MAX_TEXT.
        let _ = text.write_fmt(args);
        let _ = self.items.push(TextItem { x, y, text });
    }

    /// Text at row `y`, if any.
    pub fn line(&self, y: u8) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.y == y && item.x == LABEL_X)
            .map(|item| item.text.as_str())
    }
}

/// Lays out the readings and, when alerting, the origin-specific banner.
pub fn compose(record: &StateRecord) -> DisplayFrame {
    let mut frame = DisplayFrame::new();

    frame.text(LABEL_X, LEVEL_Y, format_args!("{LEVEL_LABEL}"));
    frame.text(VALUE_X, LEVEL_Y, format_args!("{}", record.river_level()));
    frame.text(UNIT_X, LEVEL_Y, format_args!("%"));

    frame.text(LABEL_X, RAIN_Y, format_args!("{RAIN_LABEL}"));
    frame.text(VALUE_X, RAIN_Y, format_args!("{}", record.rain_volume()));
    frame.text(UNIT_X, RAIN_Y, format_args!("%"));

    if let Some(origin) = record.alert() {
        let message = match origin {
            AlertOrigin::River => RIVER_MESSAGE,
            AlertOrigin::Rain => RAIN_MESSAGE,
        };
        frame.text(LABEL_X, BANNER_Y, format_args!("{ALERT_BANNER}"));
        frame.text(LABEL_X, MESSAGE_Y, format_args!("{message}"));
    }

    frame
}
