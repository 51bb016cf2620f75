/// A source of ambient illuminance readings.
///
/// `None` means the sensor produced no valid reading this time. It is distinct
/// from a legitimate reading of 0 lux.
pub trait IlluminanceSource {
    fn read(&mut self) -> Option<f32>;
}
