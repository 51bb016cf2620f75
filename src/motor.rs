use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::clock::Clock;

/// Rotation sense of the platform axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Sign of one step in this direction, relative to a clockwise-positive axis.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => write!(f, "CW"),
            Direction::CounterClockwise => write!(f, "CCW"),
        }
    }
}

/// Output lines of a STEP/DIR/ENABLE stepper driver.
///
/// The driver only toggles outputs. Pulse width and step rate are owned by the
/// caller, see [`pulse`].
pub trait MotorDriver {
    fn set_enabled(&mut self, enabled: bool);
    fn set_direction(&mut self, direction: Direction);
    fn set_step(&mut self, high: bool);
}

/// One step: STEP high for `half_period`, then low for `half_period`.
pub fn pulse<D: MotorDriver, C: Clock>(driver: &mut D, clock: &mut C, half_period: Duration) {
    driver.set_step(true);
    clock.delay(half_period);
    driver.set_step(false);
    clock.delay(half_period);
}

/// Move `steps` steps in `direction`, holding the enable line only for the
/// span of the move. Zero or negative counts do not touch the driver at all.
///
/// Returns the number of pulses issued.
pub fn move_steps<D: MotorDriver, C: Clock>(
    driver: &mut D,
    clock: &mut C,
    direction: Direction,
    steps: i64,
    half_period: Duration,
) -> i64 {
    if steps <= 0 {
        return 0;
    }

    driver.set_enabled(true);
    driver.set_direction(direction);
    for _ in 0..steps {
        pulse(driver, clock, half_period);
    }
    driver.set_enabled(false);

    debug!("moved {} steps {}", steps, direction);
    steps
}
