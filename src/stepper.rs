// Use rppal in production
#[cfg(not(test))]
use rppal::gpio::{Gpio, OutputPin};

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_gpio::{Gpio, OutputPin};

use tracing::info;

use crate::config::MotorConfig;
use crate::error::HardwareError;
use crate::motor::{Direction, MotorDriver};

/// STEP/DIR/ENABLE stepper driver (A4988, DRV8825) on Raspberry Pi GPIO.
pub struct GpioStepper {
    step: OutputPin,
    dir: OutputPin,
    enable: OutputPin,
    enable_active_low: bool,
    clockwise_high: bool,
}

fn drive(pin: &mut OutputPin, high: bool) {
    if high {
        pin.set_high();
    } else {
        pin.set_low();
    }
}

impl GpioStepper {
    /// Claim the pins and leave the driver disabled with STEP low.
    pub fn new(config: &MotorConfig) -> Result<Self, HardwareError> {
        let gpio = Gpio::new()?;

        let step = gpio.get(config.step_pin)?.into_output_low();
        let dir = gpio.get(config.dir_pin)?.into_output_low();
        // Start in the disabled state, whichever polarity EN uses.
        let enable = if config.enable_active_low {
            gpio.get(config.enable_pin)?.into_output_high()
        } else {
            gpio.get(config.enable_pin)?.into_output_low()
        };

        info!(
            "stepper on STEP={} DIR={} EN={}",
            config.step_pin, config.dir_pin, config.enable_pin
        );

        Ok(Self {
            step,
            dir,
            enable,
            enable_active_low: config.enable_active_low,
            clockwise_high: config.clockwise_high,
        })
    }
}

impl MotorDriver for GpioStepper {
    fn set_enabled(&mut self, enabled: bool) {
        drive(&mut self.enable, enabled != self.enable_active_low);
    }

    fn set_direction(&mut self, direction: Direction) {
        let clockwise = direction == Direction::Clockwise;
        drive(&mut self.dir, clockwise == self.clockwise_high);
    }

    fn set_step(&mut self, high: bool) {
        drive(&mut self.step, high);
    }
}

impl Drop for GpioStepper {
    fn drop(&mut self) {
        // Never leave the coils energized.
        self.set_step(false);
        self.set_enabled(false);
    }
}
