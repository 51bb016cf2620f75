use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

// ** SAMPLING CONFIGURATION ** //

/// Length of the averaging window used to measure ambient light each cycle.
pub const SAMPLE_WINDOW_MS: u64 = 60_000;
/// One sensor poll per second while averaging.
pub const SAMPLE_INTERVAL_MS: u64 = 1_000;

// ** SCAN CONFIGURATION ** //

/// How long a sweep keeps stepping before it stops.
pub const SWEEP_DURATION_MS: u64 = 10_000;
/// Sensor cadence while sweeping.
pub const SWEEP_SAMPLE_INTERVAL_MS: u64 = 500;
/// Half period of a step pulse (high for this long, then low for this long).
/// Sets the rotation speed: 500us gives 1000 steps per second.
pub const STEP_PULSE_US: u64 = 500;
/// A cycle average below `baseline * DROP_RATIO` triggers a scan (10% drop).
pub const DROP_RATIO: f32 = 0.9;
/// A sweep peak above `baseline * ACCEPT_RATIO` is kept (30% brighter).
pub const ACCEPT_RATIO: f32 = 1.3;

// ** MOTOR CONFIGURATION ** //

/// BCM pin numbers for a STEP/DIR/ENABLE driver (A4988, DRV8825).
pub const GPIO_STEP: u8 = 17;
pub const GPIO_DIR: u8 = 27;
pub const GPIO_ENABLE: u8 = 22;
/// A4988/DRV8825 boards enable the outputs when EN is pulled low.
pub const ENABLE_ACTIVE_LOW: bool = true;
/// DIR level that turns the platform clockwise.
pub const CLOCKWISE_HIGH: bool = true;

// ** SENSOR CONFIGURATION ** //

/// I2C bus 1 is the header bus on every Pi since the model B rev 2.
pub const I2C_BUS: u8 = 1;
/// BH1750 with ADDR tied low.
pub const BH1750_ADDR: u16 = 0x23;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "lumen-seek.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub scan: ScanConfig,
    pub motor: MotorConfig,
    pub sensor: SensorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    pub window_ms: u64,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub sweep_ms: u64,
    pub sample_interval_ms: u64,
    pub step_pulse_us: u64,
    pub drop_ratio: f32,
    pub accept_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorConfig {
    pub step_pin: u8,
    pub dir_pin: u8,
    pub enable_pin: u8,
    pub enable_active_low: bool,
    pub clockwise_high: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    pub i2c_bus: u8,
    pub address: u16,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            window_ms: SAMPLE_WINDOW_MS,
            interval_ms: SAMPLE_INTERVAL_MS,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sweep_ms: SWEEP_DURATION_MS,
            sample_interval_ms: SWEEP_SAMPLE_INTERVAL_MS,
            step_pulse_us: STEP_PULSE_US,
            drop_ratio: DROP_RATIO,
            accept_ratio: ACCEPT_RATIO,
        }
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            step_pin: GPIO_STEP,
            dir_pin: GPIO_DIR,
            enable_pin: GPIO_ENABLE,
            enable_active_low: ENABLE_ACTIVE_LOW,
            clockwise_high: CLOCKWISE_HIGH,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_bus: I2C_BUS,
            address: BH1750_ADDR,
        }
    }
}

impl SamplingConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ScanConfig {
    pub fn sweep(&self) -> Duration {
        Duration::from_millis(self.sweep_ms)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn step_pulse(&self) -> Duration {
        Duration::from_micros(self.step_pulse_us)
    }
}

impl Config {
    /// Parse a TOML document. Missing keys fall back to the defaults above.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from `DEFAULT_CONFIG_PATH` when it exists,
    /// else use the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Path::new(DEFAULT_CONFIG_PATH),
            None => {
                warn!("no {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                return Ok(Self::default());
            }
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scan = &self.scan;
        if !(scan.drop_ratio > 0.0 && scan.drop_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scan.drop_ratio must be in (0, 1], got {}",
                scan.drop_ratio
            )));
        }
        if !(scan.accept_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scan.accept_ratio must be positive, got {}",
                scan.accept_ratio
            )));
        }

        let durations = [
            ("sampling.window_ms", self.sampling.window_ms),
            ("sampling.interval_ms", self.sampling.interval_ms),
            ("scan.sweep_ms", scan.sweep_ms),
            ("scan.sample_interval_ms", scan.sample_interval_ms),
            ("scan.step_pulse_us", scan.step_pulse_us),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{} must be non-zero", name)));
        }

        let pins = [self.motor.step_pin, self.motor.dir_pin, self.motor.enable_pin];
        if pins[0] == pins[1] || pins[0] == pins[2] || pins[1] == pins[2] {
            return Err(ConfigError::Invalid(format!(
                "motor pins must be distinct, got step={} dir={} enable={}",
                pins[0], pins[1], pins[2]
            )));
        }

        Ok(())
    }
}
