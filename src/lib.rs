pub mod bh1750;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod light;
pub mod motor;
pub mod revert;
pub mod sampler;
pub mod scan;
pub mod stepper;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use controller::{Controller, CycleOutcome};
pub use light::IlluminanceSource;
pub use motor::{Direction, MotorDriver};

#[cfg(test)]
pub(crate) mod mocks;
