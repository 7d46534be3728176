#![no_std]
//! WS2812 strip transmitter on the nRF52 PWM sequencer.
//!
//! Each colour bit becomes one PWM period whose high time encodes 0 or 1.
//! The sequence buffer holds 24 words per LED plus a trailing reset word,
//! so size it with [`buffer_words`].

use embassy_nrf::{
    gpio::Pin,
    pwm::{
        self, Config, Error, Instance, Prescaler, SequenceConfig,
        SequenceLoad, SequencePwm, SingleSequenceMode, SingleSequencer,
    },
    Peri,
};
use embassy_time::Timer;
use smart_leds_trait::{SmartLedsWriteAsync, RGB8};

/// WS2812 0-bit high time in ns.
const T0H_NS: u32 = 400;
/// WS2812 1-bit high time in ns.
const T1H_NS: u32 = 800;
/// WS2812 bit period in ns.
const BIT_NS: u32 = 1250;
/// Latch time after the last bit in ns.
const RESET_NS: u32 = 50_000;

const BITS_PER_LED: usize = 24;

/// Sequencer words needed to drive `leds` LEDs.
pub const fn buffer_words(leds: usize) -> usize {
    leds * BITS_PER_LED + 1
}

const fn to_ticks(ns: u32) -> u32 {
    const PWM_CLOCK_MHZ: u32 = pwm::PWM_CLK_HZ / 1_000_000;
    (ns * PWM_CLOCK_MHZ + 500) / 1_000
}

/// Polarity flag; a word with only this set holds the line low.
const RES: u16 = 0x8000;

const RESET_TICKS: u32 = to_ticks(RESET_NS);

const BITS: [u16; 2] =
    [to_ticks(T0H_NS) as u16 | RES, to_ticks(T1H_NS) as u16 | RES];

const PWM_PERIOD: u16 = to_ticks(BIT_NS) as u16;

/// Wire order is green, red, blue, most significant bit first.
const fn wire_order(color: RGB8) -> u32 {
    (color.g as u32) << 16 | (color.r as u32) << 8 | color.b as u32
}

/// Strip driver with a `WORDS`-long sequence buffer, see [`buffer_words`].
pub struct Ws2812<'d, const WORDS: usize> {
    seq_pwm: SequencePwm<'d>,
    seq_words: [u16; WORDS],
    seq_config: SequenceConfig,
}

impl<'d, const WORDS: usize> Ws2812<'d, WORDS> {
    pub fn new<T: Instance>(
        pwm: Peri<'d, T>,
        pin: Peri<'d, impl Pin>,
    ) -> Result<Self, Error> {
        let mut config = Config::default();
        config.sequence_load = SequenceLoad::Common;
        config.prescaler = Prescaler::Div1;
        config.max_duty = PWM_PERIOD;

        let seq_pwm = SequencePwm::new_1ch(pwm, pin, config)?;

        let mut seq_config = SequenceConfig::default();
        // The trailing RES word already covers one tick.
        seq_config.end_delay = RESET_TICKS - 1;

        let mut strip =
            Ws2812 { seq_pwm, seq_words: [BITS[0]; WORDS], seq_config };
        if let Some(last) = strip.seq_words.last_mut() {
            *last = RES;
        }
        Ok(strip)
    }

    /// LEDs the buffer can address.
    pub const fn capacity(&self) -> usize {
        WORDS.saturating_sub(1) / BITS_PER_LED
    }

    fn encode(&mut self, index: usize, color: RGB8) {
        let bits = wire_order(color);
        let start = index * BITS_PER_LED;
        let words = &mut self.seq_words[start..start + BITS_PER_LED];
        for (i, word) in words.iter_mut().enumerate() {
            let bit = (bits >> (BITS_PER_LED - 1 - i)) & 1;
            *word = BITS[bit as usize];
        }
    }
}

impl<'d, const WORDS: usize> SmartLedsWriteAsync for Ws2812<'d, WORDS> {
    type Error = Error;
    type Color = RGB8;

    /// Sends the colours in index order. LEDs past the end of the iterator
    /// are driven dark; colours past the buffer capacity are ignored.
    async fn write<C, I>(&mut self, iterator: C) -> Result<(), Self::Error>
    where
        C: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let capacity = self.capacity();
        let mut colors = iterator.into_iter();
        for index in 0..capacity {
            let color = colors.next().map(Into::into).unwrap_or_default();
            self.encode(index, color);
        }

        let sequencer = SingleSequencer::new(
            &mut self.seq_pwm,
            &self.seq_words,
            self.seq_config.clone(),
        );
        sequencer.start(SingleSequenceMode::Times(1))?;
        let frame_ns = (WORDS as u64) * u64::from(BIT_NS) + u64::from(RESET_NS);
        Timer::after_nanos(frame_ns).await;
        sequencer.stop();

        Ok(())
    }
}
