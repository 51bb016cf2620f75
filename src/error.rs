use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while claiming the Raspberry Pi peripherals.
#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("gpio: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("i2c: {0}")]
    I2c(#[from] rppal::i2c::Error),

    #[error("light sensor at 0x{address:02X} did not respond to power-on: {source}")]
    SensorNotResponding {
        address: u16,
        #[source]
        source: rppal::i2c::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
