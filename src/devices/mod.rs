// devices/mod.rs
mod light;
mod sensor;

pub use self::light::KakuLight;
pub use self::sensor::{KakuSensor, SensorKind};

/// One half of an awning modeled as two paired on/off entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwningDirection {
    Up,
    Down,
}

impl AwningDirection {
    pub fn label(&self) -> &'static str {
        match self {
            AwningDirection::Up => "up",
            AwningDirection::Down => "down",
        }
    }
}

/// What a device can do. A single descriptor instead of one entity class per
/// capability combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub dimmable: bool,
    /// Set when this entity is one half of a paired awning actuator. Both
    /// halves drive the same physical device and share its tracking slot.
    pub awning_direction: Option<AwningDirection>,
}
