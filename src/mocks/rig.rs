// Simulated platform: one clock, one stepper, one light sensor sharing state.
// Every delay advances the manual clock, every rising STEP edge moves the
// dead-reckoned position, and the sensor reads a function of position and time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Clock;
use crate::light::IlluminanceSource;
use crate::motor::{Direction, MotorDriver};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorEvent {
    Enabled(bool),
    Direction(Direction),
    Step(bool),
}

type LightFn = Box<dyn FnMut(i64, Duration) -> Option<f32>>;

struct RigState {
    now: Duration,
    position: i64,
    enabled: bool,
    direction: Direction,
    step_high: bool,
    pulses: u64,
    steps_while_disabled: u64,
    overlapping_enables: u64,
    reads: u64,
    events: Vec<MotorEvent>,
    light: LightFn,
}

#[derive(Clone)]
pub struct Rig {
    state: Rc<RefCell<RigState>>,
}

impl Rig {
    /// A rig whose sensor never returns a valid reading.
    pub fn new() -> Self {
        Self::with_light(|_, _| None)
    }

    pub fn with_light(light: impl FnMut(i64, Duration) -> Option<f32> + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(RigState {
                now: Duration::ZERO,
                position: 0,
                enabled: false,
                direction: Direction::Clockwise,
                step_high: false,
                pulses: 0,
                steps_while_disabled: 0,
                overlapping_enables: 0,
                reads: 0,
                events: Vec::new(),
                light: Box::new(light),
            })),
        }
    }

    pub fn set_light(&self, light: impl FnMut(i64, Duration) -> Option<f32> + 'static) {
        self.state.borrow_mut().light = Box::new(light);
    }

    pub fn clock(&self) -> ManualClock {
        ManualClock { rig: self.clone() }
    }

    pub fn motor(&self) -> RigMotor {
        RigMotor { rig: self.clone() }
    }

    pub fn sensor(&self) -> RigSensor {
        RigSensor { rig: self.clone() }
    }

    pub fn position(&self) -> i64 {
        self.state.borrow().position
    }

    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn pulse_count(&self) -> u64 {
        self.state.borrow().pulses
    }

    pub fn steps_while_disabled(&self) -> u64 {
        self.state.borrow().steps_while_disabled
    }

    pub fn overlapping_enables(&self) -> u64 {
        self.state.borrow().overlapping_enables
    }

    pub fn read_count(&self) -> u64 {
        self.state.borrow().reads
    }

    pub fn events(&self) -> Vec<MotorEvent> {
        self.state.borrow().events.clone()
    }

    /// Directions set on the driver, in order.
    pub fn directions(&self) -> Vec<Direction> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                MotorEvent::Direction(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

pub struct ManualClock {
    rig: Rig,
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.rig.state.borrow().now
    }

    fn delay(&mut self, duration: Duration) {
        self.rig.state.borrow_mut().now += duration;
    }
}

pub struct RigMotor {
    rig: Rig,
}

impl MotorDriver for RigMotor {
    fn set_enabled(&mut self, enabled: bool) {
        let mut state = self.rig.state.borrow_mut();
        if enabled && state.enabled {
            state.overlapping_enables += 1;
        }
        state.enabled = enabled;
        state.events.push(MotorEvent::Enabled(enabled));
    }

    fn set_direction(&mut self, direction: Direction) {
        let mut state = self.rig.state.borrow_mut();
        state.direction = direction;
        state.events.push(MotorEvent::Direction(direction));
    }

    fn set_step(&mut self, high: bool) {
        let mut state = self.rig.state.borrow_mut();
        if high && !state.step_high {
            state.pulses += 1;
            if state.enabled {
                state.position += state.direction.sign();
            } else {
                state.steps_while_disabled += 1;
            }
        }
        state.step_high = high;
        state.events.push(MotorEvent::Step(high));
    }
}

pub struct RigSensor {
    rig: Rig,
}

impl IlluminanceSource for RigSensor {
    fn read(&mut self) -> Option<f32> {
        let mut state = self.rig.state.borrow_mut();
        state.reads += 1;
        let (position, now) = (state.position, state.now);
        (state.light)(position, now)
    }
}

/// Sensor that replays a fixed script of readings, then reports invalid.
pub struct ScriptedSensor {
    readings: std::vec::IntoIter<Option<f32>>,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<Option<f32>>) -> Self {
        Self {
            readings: readings.into_iter(),
        }
    }
}

impl IlluminanceSource for ScriptedSensor {
    fn read(&mut self) -> Option<f32> {
        self.readings.next().flatten()
    }
}
