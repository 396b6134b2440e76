use serde::{Deserialize, Serialize};

/// Cached light state. Optimistic: reflects dispatched intent, not confirmed
/// physical state, because the RF protocol has no acknowledgement. `None`
/// means unknown (nothing dispatched yet this session).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LightState {
    pub is_on: Option<bool>,
    /// Platform-facing 1..=255 scale, not the hub's 1..=15 dimmer levels.
    pub brightness: Option<u8>,
}

/// Cached sensor state, maintained from live reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorState {
    pub native_value: Option<f64>,
    pub available: bool,
}

impl Default for SensorState {
    fn default() -> Self {
        // Entities start available until a read proves otherwise.
        Self {
            native_value: None,
            available: true,
        }
    }
}
