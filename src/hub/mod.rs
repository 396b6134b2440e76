// hub/mod.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier the hub assigns to a physical device.
pub type DeviceId = u32;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("hub transport failure: {0}")]
    Transport(String),
    #[error("hub rejected credentials: {0}")]
    Auth(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Switch,
    Dimmer,
    TemperatureHumiditySensor,
}

/// A device as reported by the hub's discovery call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubDevice {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
}

/// Client for the ICS2000 hub.
///
/// The hub retransmits commands over the one-way KlikAanKlikUit RF protocol,
/// so none of the write calls confirm any physical effect; a returned `Ok`
/// only means the hub accepted the request. The implementation is expected to
/// tolerate concurrent calls for different devices.
#[async_trait]
pub trait IcsHub: Send + Sync {
    async fn devices(&self) -> Result<Vec<HubDevice>, HubError>;
    async fn turn_on(&self, device: DeviceId) -> Result<(), HubError>;
    async fn turn_off(&self, device: DeviceId) -> Result<(), HubError>;
    /// `level` uses the hub's native 1..=15 dimmer scale.
    async fn dim(&self, device: DeviceId, level: u8) -> Result<(), HubError>;
    async fn get_temperature(&self, device: DeviceId) -> Result<f64, HubError>;
    async fn get_humidity(&self, device: DeviceId) -> Result<f64, HubError>;
}
