use std::time::Duration;

use tracing::debug;

use crate::clock::Clock;
use crate::light::IlluminanceSource;

/// Result of averaging a sensor over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightAverage {
    /// Mean of the valid readings, 0 when there were none.
    pub lux: f32,
    pub valid: u32,
    pub attempts: u32,
}

impl LightAverage {
    /// True when not a single valid reading was collected.
    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }
}

/// Poll `sensor` every `interval` until `window` has elapsed and average the
/// valid readings. Invalid readings are skipped, not counted as zero.
pub fn sample<S, C>(sensor: &mut S, clock: &mut C, window: Duration, interval: Duration) -> LightAverage
where
    S: IlluminanceSource,
    C: Clock,
{
    let start = clock.now();
    let mut sum = 0.0_f64;
    let mut valid = 0_u32;
    let mut attempts = 0_u32;

    while clock.elapsed_since(start) < window {
        attempts += 1;
        if let Some(lux) = sensor.read() {
            sum += f64::from(lux);
            valid += 1;
        }
        clock.delay(interval);
    }

    let lux = if valid > 0 { (sum / f64::from(valid)) as f32 } else { 0.0 };
    debug!("sampled {:.1} lux from {}/{} readings", lux, valid, attempts);

    LightAverage {
        lux,
        valid,
        attempts,
    }
}
