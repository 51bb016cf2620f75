use std::fmt;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::light::IlluminanceSource;
use crate::motor::{Direction, MotorDriver};
use crate::revert::{self, RevertPlan};
use crate::sampler::{self, LightAverage};
use crate::scan::{self, ScanResult};

/// What the controller should do with a fresh cycle average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// No baseline yet: adopt the average, don't scan.
    Initialize,
    /// Within the hysteresis band: adopt the average, don't scan.
    Hold,
    /// Dropped below `baseline * drop_ratio`: adopt the average, then scan.
    Scan,
}

/// Hysteresis check. A scan is triggered only on a strict drop below
/// `baseline * drop_ratio`.
pub fn decide(baseline: Option<f32>, current: f32, drop_ratio: f32) -> Decision {
    match baseline {
        None => Decision::Initialize,
        Some(baseline) if current < baseline * drop_ratio => Decision::Scan,
        Some(_) => Decision::Hold,
    }
}

/// Summary of one control cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// The window produced no valid reading; nothing changed.
    NoData,
    Initialized { lux: f32 },
    Stable { lux: f32 },
    Scanned {
        lux: f32,
        scan: ScanResult,
        plan: RevertPlan,
        moved: i64,
    },
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::NoData => write!(f, "no valid light readings"),
            CycleOutcome::Initialized { lux } => write!(f, "baseline initialized at {:.1} lux", lux),
            CycleOutcome::Stable { lux } => write!(f, "stable at {:.1} lux", lux),
            CycleOutcome::Scanned { lux, plan, moved, .. } => write!(
                f,
                "dropped to {:.1} lux, scanned, moved {} steps {} to {}",
                lux, moved, plan.direction, plan.target
            ),
        }
    }
}

/// Light-seeking controller for one axis.
///
/// Holds the state that survives between cycles: the baseline and the
/// direction the next sweep starts in. Both reset on restart.
pub struct Controller<D, S, C> {
    config: Config,
    driver: D,
    sensor: S,
    clock: C,
    baseline: Option<f32>,
    next_direction: Direction,
}

impl<D, S, C> Controller<D, S, C>
where
    D: MotorDriver,
    S: IlluminanceSource,
    C: Clock,
{
    pub fn new(config: Config, driver: D, sensor: S, clock: C) -> Self {
        Self {
            config,
            driver,
            sensor,
            clock,
            baseline: None,
            next_direction: Direction::default(),
        }
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Run one cycle: sample, decide, and on a drop scan and revert.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let average = sampler::sample(
            &mut self.sensor,
            &mut self.clock,
            self.config.sampling.window(),
            self.config.sampling.interval(),
        );
        self.apply(average)
    }

    /// Run `cycles` cycles back to back and return the last outcome.
    pub fn run_cycles(&mut self, cycles: u64) -> Option<CycleOutcome> {
        let mut last = None;
        for _ in 0..cycles {
            last = Some(self.run_cycle());
        }
        last
    }

    /// Run cycles forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    fn apply(&mut self, average: LightAverage) -> CycleOutcome {
        if average.is_empty() {
            warn!(
                "no valid reading in {} attempts, keeping baseline {:?}",
                average.attempts, self.baseline
            );
            return CycleOutcome::NoData;
        }

        let lux = average.lux;
        match decide(self.baseline, lux, self.config.scan.drop_ratio) {
            Decision::Initialize => {
                self.baseline = Some(lux);
                info!("baseline set to {:.1} lux", lux);
                CycleOutcome::Initialized { lux }
            }
            Decision::Hold => {
                self.baseline = Some(lux);
                info!("stable, baseline now {:.1} lux", lux);
                CycleOutcome::Stable { lux }
            }
            Decision::Scan => {
                info!(
                    "light dropped from {:.1} to {:.1} lux, scanning",
                    self.baseline.unwrap_or_default(),
                    lux
                );
                // The drop itself is what the sweep has to beat.
                self.baseline = Some(lux);
                let (scan, plan, moved) = self.scan_and_revert(lux);
                CycleOutcome::Scanned {
                    lux,
                    scan,
                    plan,
                    moved,
                }
            }
        }
    }

    fn scan_and_revert(&mut self, baseline: f32) -> (ScanResult, RevertPlan, i64) {
        let scan_config = &self.config.scan;
        let scan = scan::sweep(
            &mut self.driver,
            &mut self.sensor,
            &mut self.clock,
            self.next_direction,
            scan_config,
        );

        let plan = revert::plan(&scan, baseline, scan_config.accept_ratio);
        let moved = revert::execute(
            &mut self.driver,
            &mut self.clock,
            &plan,
            scan_config.step_pulse(),
        );

        self.next_direction = self.next_direction.reversed();
        info!("next scan starts {}", self.next_direction);

        (scan, plan, moved)
    }
}
