// Test doubles, only compiled during tests.

pub mod mock_gpio;
pub mod rig;
