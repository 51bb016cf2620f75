use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::clock::Clock;
use crate::motor::{self, Direction, MotorDriver};
use crate::scan::ScanResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertTarget {
    /// The sweep peak beat the baseline by enough to keep.
    Peak,
    /// Not bright enough, go back to where the sweep started.
    Origin,
}

impl fmt::Display for RevertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevertTarget::Peak => write!(f, "peak"),
            RevertTarget::Origin => write!(f, "origin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertPlan {
    pub target: RevertTarget,
    /// Opposite of the sweep direction.
    pub direction: Direction,
    /// Steps to move; zero or less means stay put.
    pub steps: i64,
}

/// Decide where to settle after `scan`, given the baseline the scan was
/// triggered against.
///
/// The peak is kept only when `peak_lux > baseline * accept_ratio`.
pub fn plan(scan: &ScanResult, baseline: f32, accept_ratio: f32) -> RevertPlan {
    let threshold = baseline * accept_ratio;
    let (target, steps) = if scan.peak_lux > threshold {
        (RevertTarget::Peak, scan.steps_to_peak())
    } else {
        (RevertTarget::Origin, scan.total_steps)
    };

    info!(
        "peak {:.1} lux vs threshold {:.1}: back to {} ({} steps {})",
        scan.peak_lux,
        threshold,
        target,
        steps.max(0),
        scan.direction.reversed()
    );

    RevertPlan {
        target,
        direction: scan.direction.reversed(),
        steps,
    }
}

/// Carry out `plan`. Returns the number of steps actually moved.
pub fn execute<D: MotorDriver, C: Clock>(
    driver: &mut D,
    clock: &mut C,
    plan: &RevertPlan,
    half_period: Duration,
) -> i64 {
    motor::move_steps(driver, clock, plan.direction, plan.steps, half_period)
}
