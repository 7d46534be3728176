use embassy_time::Duration;

use crate::buzzer::BuzzerGate;
use crate::normalizer::Calibration;
use crate::status_led::LedMode;

/// How snapshots reach the consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Every consumer sees every snapshot.
    Broadcast,
    /// One shared FIFO; each snapshot goes to whichever consumer takes it.
    SingleDelivery,
}

/// Cadences and wiring of the pipeline. Alert thresholds are not part of
/// this; they are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipelineConfig {
    pub calibration: Calibration,
    pub sample_period: Duration,
    pub display_period: Duration,
    pub gauge_period: Duration,
    /// Hold time of each status LED step.
    pub led_dwell: Duration,
    /// Tone and silence length of the alarm.
    pub buzzer_half_period: Duration,
    /// `None` blocks consumers until a snapshot arrives.
    pub receive_timeout: Option<Duration>,
    /// How often the sampler reports its publish counters.
    pub stats_period: Duration,
    pub delivery: Delivery,
}

impl PipelineConfig {
    pub const DEFAULT: Self = Self {
        calibration: Calibration::DEFAULT,
        sample_period: Duration::from_millis(100),
        display_period: Duration::from_millis(200),
        gauge_period: Duration::from_millis(200),
        led_dwell: LedMode::DWELL,
        buzzer_half_period: BuzzerGate::HALF_PERIOD,
        receive_timeout: None,
        stats_period: Duration::from_secs(10),
        delivery: Delivery::Broadcast,
    };

    pub const fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub const fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = Some(timeout);
        self
    }

    /// Sampling cycles between two stats reports.
    pub const fn cycles_per_report(&self) -> u64 {
        let period = self.sample_period.as_millis();
        if period == 0 {
            1
        } else {
            let cycles = self.stats_period.as_millis() / period;
            if cycles == 0 {
                1
            } else {
                cycles
            }
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cadence() {
        let config = PipelineConfig::default();
        assert_eq!(config.sample_period.as_millis(), 100);
        assert_eq!(config.gauge_period.as_millis(), 200);
        assert_eq!(config.led_dwell.as_millis(), 300);
        assert_eq!(config.buzzer_half_period.as_millis(), 500);
        assert_eq!(config.receive_timeout, None);
        assert_eq!(config.delivery, Delivery::Broadcast);
        assert_eq!(config.cycles_per_report(), 100);
    }

    #[test]
    fn builders_override_fields() {
        let config = PipelineConfig::DEFAULT
            .with_delivery(Delivery::SingleDelivery)
            .with_receive_timeout(Duration::from_secs(1));
        assert_eq!(config.delivery, Delivery::SingleDelivery);
        assert_eq!(config.receive_timeout, Some(Duration::from_secs(1)));
    }
}
