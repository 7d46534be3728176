use crate::board::{
    BuzzerResources, JoystickResources, MatrixResources, StatusLedResources,
};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive},
    interrupt::{self, InterruptExt},
    pwm::{self, DutyCycle, Prescaler, SimplePwm},
    saadc::{self, ChannelConfig, Gain, Reference, Resolution, Saadc},
};
use ws2812_nrf_pwm::{buffer_words, Ws2812};

/// LEDs on the gauge matrix.
pub const MATRIX_LEN: usize = 25;

/// Strip driver sized for the gauge matrix.
pub type Matrix = Ws2812<'static, { buffer_words(MATRIX_LEN) }>;

/// Converter resolution; full scale reads 4095.
pub const ADC_MAX: u16 = 4095;

/// PWM counter top for the buzzer: 1 MHz / 1000 = 1 kHz tone.
pub const BUZZER_MAX_DUTY: u16 = 1000;

bind_interrupts!(struct SaadcIrqs {
    SAADC => saadc::InterruptHandler;
});

/// Both joystick channels, sampled together as `[x, y]`.
pub type Joystick = Saadc<'static, 2>;

impl JoystickResources {
    /// Brings up the SAADC at 12 bits with a VDD-referenced full scale and
    /// runs offset calibration.
    pub async fn configure(self) -> Joystick {
        let mut config = saadc::Config::default();
        config.resolution = Resolution::_12BIT;

        let mut x = ChannelConfig::single_ended(self.x);
        x.gain = Gain::GAIN1_4;
        x.reference = Reference::VDD1_4;
        let mut y = ChannelConfig::single_ended(self.y);
        y.gain = Gain::GAIN1_4;
        y.reference = Reference::VDD1_4;

        interrupt::SAADC.set_priority(interrupt::Priority::P3);
        let mut saadc = Saadc::new(self.saadc, SaadcIrqs, config, [x, y]);
        saadc.calibrate().await;
        saadc
    }
}

/// Danger and safe indicator outputs.
pub struct StatusLeds {
    pub red: Output<'static>,
    pub blue: Output<'static>,
}

impl StatusLedResources {
    pub fn configure(self) -> StatusLeds {
        StatusLeds {
            red: Output::new(self.red, Level::Low, OutputDrive::Standard),
            blue: Output::new(self.blue, Level::Low, OutputDrive::Standard),
        }
    }
}

impl BuzzerResources {
    /// PWM channel 0 counting at 1 MHz up to [`BUZZER_MAX_DUTY`], silent.
    pub fn configure(self) -> SimplePwm<'static> {
        let mut config = pwm::SimpleConfig::default();
        config.prescaler = Prescaler::Div16;
        config.max_duty = BUZZER_MAX_DUTY;
        let mut buzzer = SimplePwm::new_1ch(self.pwm, self.pin, &config);
        buzzer.set_duty(0, DutyCycle::normal(0));
        buzzer
    }
}

impl MatrixResources {
    pub fn configure(self) -> Result<Matrix, pwm::Error> {
        Ws2812::new(self.pwm, self.pin)
    }
}
