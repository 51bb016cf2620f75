use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::ScanConfig;
use crate::light::IlluminanceSource;
use crate::motor::{self, Direction, MotorDriver};

/// Outcome of one sweep, handed to the revert planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanResult {
    pub direction: Direction,
    /// Brightest valid reading seen, 0 if none.
    pub peak_lux: f32,
    /// Steps taken from the sweep origin when `peak_lux` was read.
    pub peak_offset: i64,
    pub total_steps: i64,
}

impl ScanResult {
    /// Steps back from the end of the sweep to the peak.
    pub fn steps_to_peak(&self) -> i64 {
        self.total_steps - self.peak_offset
    }
}

/// Best reading so far. Only a strictly brighter reading replaces it, so a tie
/// keeps the earliest offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Peak {
    lux: f32,
    offset: i64,
}

impl Peak {
    fn offer(&mut self, lux: f32, offset: i64) -> bool {
        if lux > self.lux {
            self.lux = lux;
            self.offset = offset;
            true
        } else {
            false
        }
    }
}

/// Rotate in `direction` for `config.sweep()`, stepping every iteration and
/// reading the sensor whenever `config.sample_interval()` has passed since the
/// previous reading.
///
/// The motor is enabled for the sweep only and disabled before returning. The
/// platform is left `total_steps` from the origin in `direction`.
pub fn sweep<D, S, C>(
    driver: &mut D,
    sensor: &mut S,
    clock: &mut C,
    direction: Direction,
    config: &ScanConfig,
) -> ScanResult
where
    D: MotorDriver,
    S: IlluminanceSource,
    C: Clock,
{
    let duration = config.sweep();
    let interval = config.sample_interval();
    let half_period = config.step_pulse();

    info!("scan start: {} for {:?}", direction, duration);

    driver.set_enabled(true);
    driver.set_direction(direction);

    let start = clock.now();
    let mut last_sample = start;
    let mut total_steps = 0_i64;
    let mut peak = Peak::default();

    while clock.elapsed_since(start) < duration {
        motor::pulse(driver, clock, half_period);
        total_steps += 1;

        if clock.elapsed_since(last_sample) >= interval {
            last_sample = clock.now();
            if let Some(lux) = sensor.read()
                && peak.offer(lux, total_steps)
            {
                debug!("new peak {:.1} lux at step {}", lux, total_steps);
            }
        }
    }

    driver.set_enabled(false);

    let result = ScanResult {
        direction,
        peak_lux: peak.lux,
        peak_offset: peak.offset,
        total_steps,
    };
    info!(
        "scan done: {} steps {}, peak {:.1} lux at step {}",
        result.total_steps, direction, result.peak_lux, result.peak_offset
    );
    result
}
