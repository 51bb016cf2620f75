// Use rppal in production
#[cfg(not(test))]
use rppal::i2c::I2c;

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_i2c::I2c;

#[cfg(not(test))]
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::SensorConfig;
use crate::error::HardwareError;
use crate::light::IlluminanceSource;

// BH1750 instruction set
const POWER_ON: u8 = 0x01;
const RESET: u8 = 0x07;
const CONTINUOUS_HIGH_RES: u8 = 0x10;

/// Worst-case conversion time in high resolution mode.
const MEASUREMENT_TIME: Duration = Duration::from_millis(180);

/// Counts per lux at the default measurement time register.
const COUNTS_PER_LUX: f32 = 1.2;

/// BH1750 ambient light sensor on the Pi's I2C bus.
pub struct Bh1750 {
    i2c: I2c,
    address: u16,
}

impl Bh1750 {
    pub fn new(config: &SensorConfig) -> Result<Self, HardwareError> {
        let mut i2c = I2c::with_bus(config.i2c_bus)?;
        i2c.set_slave_address(config.address)?;

        let not_responding = |source| HardwareError::SensorNotResponding {
            address: config.address,
            source,
        };
        i2c.write(&[POWER_ON]).map_err(not_responding)?;
        i2c.write(&[RESET]).map_err(not_responding)?;
        i2c.write(&[CONTINUOUS_HIGH_RES]).map_err(not_responding)?;

        // First conversion has to finish before the data register is valid.
        #[cfg(not(test))]
        thread::sleep(MEASUREMENT_TIME);

        info!(
            "BH1750 initialized on i2c-{} at 0x{:02X}",
            config.i2c_bus, config.address
        );
        Ok(Self {
            i2c,
            address: config.address,
        })
    }

    /// Convert the big-endian data register to lux.
    pub fn to_lux(raw: [u8; 2]) -> f32 {
        f32::from(u16::from_be_bytes(raw)) / COUNTS_PER_LUX
    }
}

impl IlluminanceSource for Bh1750 {
    fn read(&mut self) -> Option<f32> {
        let mut data = [0u8; 2];
        match self.i2c.read(&mut data) {
            Ok(2) => Some(Self::to_lux(data)),
            Ok(n) => {
                warn!("BH1750 0x{:02X}: short read ({} bytes)", self.address, n);
                None
            }
            Err(e) => {
                warn!("BH1750 0x{:02X}: {}", self.address, e);
                None
            }
        }
    }
}
