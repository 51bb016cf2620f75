// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::HashMap;

use rppal::gpio::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    Low,
    High,
}

thread_local! {
    static MOCK_PINS: RefCell<HashMap<u8, Level>> = RefCell::new(HashMap::new());
    static MOCK_WRITES: RefCell<Vec<(u8, Level)>> = const { RefCell::new(Vec::new()) };
}

fn write(pin: u8, level: Level) {
    MOCK_PINS.with(|pins| {
        pins.borrow_mut().insert(pin, level);
    });
    MOCK_WRITES.with(|writes| writes.borrow_mut().push((pin, level)));
}

pub struct Gpio;

impl Gpio {
    pub fn new() -> Result<Self, Error> {
        Ok(Gpio)
    }

    pub fn get(&self, pin: u8) -> Result<Pin, Error> {
        Ok(Pin { pin })
    }
}

pub struct Pin {
    pin: u8,
}

impl Pin {
    pub fn into_output_low(self) -> OutputPin {
        write(self.pin, Level::Low);
        OutputPin { pin: self.pin }
    }

    pub fn into_output_high(self) -> OutputPin {
        write(self.pin, Level::High);
        OutputPin { pin: self.pin }
    }
}

pub struct OutputPin {
    pin: u8,
}

impl OutputPin {
    pub fn set_high(&mut self) {
        write(self.pin, Level::High);
    }

    pub fn set_low(&mut self) {
        write(self.pin, Level::Low);
    }
}

// test helper to read the last level driven on a pin
pub fn mock_pin_level(pin: u8) -> Option<Level> {
    MOCK_PINS.with(|pins| pins.borrow().get(&pin).copied())
}

// test helper returning every write on `pin`, in order
pub fn mock_pin_writes(pin: u8) -> Vec<Level> {
    MOCK_WRITES.with(|writes| {
        writes
            .borrow()
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    })
}

// test helper to reset all pins
pub fn reset_mock_pins() {
    MOCK_PINS.with(|pins| pins.borrow_mut().clear());
    MOCK_WRITES.with(|writes| writes.borrow_mut().clear());
}
