#![no_std]
//! Sensor-to-actuator pipeline for the flood monitor.
//!
//! A sampler turns two noisy analog axes into a bounded [`StateRecord`],
//! publishes it through a bounded distribution channel, and independent
//! actuator consumers turn each snapshot into display text, status LED
//! patterns, buzzer gating and a proportional LED-matrix gauge.
//!
//! Nothing in here touches hardware. The firmware crate wires these pieces
//! to peripherals and schedules them.

mod actuator;
mod buzzer;
mod config;
mod display;
mod distribution;
mod error;
mod gauge;
mod normalizer;
mod state;
mod status_led;

pub use actuator::{Pattern, Step};
pub use buzzer::{BuzzerGate, TONE_DUTY_PERCENT, TONE_HZ};
pub use config::{Delivery, PipelineConfig};
pub use display::{
    compose, DisplayFrame, Rect, TextItem, ALERT_BANNER, RAIN_MESSAGE,
    RIVER_MESSAGE,
};
pub use distribution::{
    PublishStats, StateBus, StateBusReader, StateBusWriter, StatePublisher,
    StateQueue, StateQueueReader, StateQueueWriter, StateSource,
    CONSUMER_COUNT, QUEUE_CAPACITY,
};
pub use error::PipelineError;
pub use gauge::{
    render, render_into, ALERT_SHIFT, CALM_SHIFT, MATRIX_LEDS, MAX_LED_VALUE,
};
pub use normalizer::{dead_zone, AxisSample, Calibration, Normalizer};
pub use state::{
    classify, AlertOrigin, StateRecord, INITIAL_RAIN_VOLUME,
    INITIAL_RIVER_LEVEL, MAX_PERCENT, RAIN_ALERT_LEVEL, RIVER_ALERT_LEVEL,
};
pub use status_led::{LedLevels, LedMode};
