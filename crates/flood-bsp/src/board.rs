use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, P0_11, PWM0, PWM1, SAADC, WDT};
use embassy_nrf::Peri;

/// Two-axis joystick on the SAADC.
pub struct JoystickResources {
    pub saadc: Peri<'static, SAADC>,
    /// Horizontal axis, AIN1. Drives the rain volume.
    pub x: Peri<'static, peripherals::P0_03>,
    /// Vertical axis, AIN0. Drives the river level.
    pub y: Peri<'static, peripherals::P0_02>,
}

/// Red (danger) and blue (safe) status LEDs, active high.
pub struct StatusLedResources {
    pub red: Peri<'static, peripherals::P0_13>,
    pub blue: Peri<'static, peripherals::P0_14>,
}

/// Passive buzzer driven by a PWM tone.
pub struct BuzzerResources {
    pub pwm: Peri<'static, PWM1>,
    pub pin: Peri<'static, peripherals::P0_15>,
}

/// Data line of the 5x5 WS2812 matrix.
pub struct MatrixResources {
    pub pwm: Peri<'static, PWM0>,
    pub pin: Peri<'static, peripherals::P0_16>,
}

/// Represents all the peripherals and pins used by the flood monitor.
pub struct FloodBoard {
    /// Button that reboots into the bootloader, active low.
    pub bootsel: Peri<'static, P0_11>,
    pub joystick: JoystickResources,
    pub status_leds: StatusLedResources,
    pub buzzer: BuzzerResources,
    pub matrix: MatrixResources,
    /// Watchdog Timer.
    pub wdt: Peri<'static, WDT>,
}

impl Default for FloodBoard {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl FloodBoard {
    /// Create a new instance based on HAL configuration
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            bootsel: p.P0_11,
            joystick: JoystickResources {
                saadc: p.SAADC,
                x: p.P0_03,
                y: p.P0_02,
            },
            status_leds: StatusLedResources { red: p.P0_13, blue: p.P0_14 },
            buzzer: BuzzerResources { pwm: p.PWM1, pin: p.P0_15 },
            matrix: MatrixResources { pwm: p.PWM0, pin: p.P0_16 },
            wdt: p.WDT,
        }
    }
}
