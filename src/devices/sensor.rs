// devices/sensor.rs
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::commands::read::SensorReader;
use crate::hub::{DeviceId, HubDevice, HubError};
use crate::models::SensorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Humidity,
}

impl SensorKind {
    pub fn label(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
        }
    }
}

/// One measurement channel of a KlikAanKlikUit temperature/humidity sensor.
pub struct KakuSensor {
    name: String,
    device_id: DeviceId,
    kind: SensorKind,
    reader: Arc<SensorReader>,
    state: RwLock<SensorState>,
}

impl KakuSensor {
    pub fn new(device: &HubDevice, kind: SensorKind, reader: Arc<SensorReader>) -> Self {
        let name = format!("{} {}", device.name, kind.label());
        info!(name = %name, device = device.id, "adding sensor entity");
        Self {
            name,
            device_id: device.id,
            kind,
            reader,
            state: RwLock::new(SensorState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn unique_id(&self) -> String {
        format!("kaku-{}-{}", self.device_id, self.kind.label())
    }

    pub async fn native_value(&self) -> Option<f64> {
        self.state.read().await.native_value
    }

    pub async fn available(&self) -> bool {
        self.state.read().await.available
    }

    /// One blocking read per update cycle. A failed read marks the entity
    /// unavailable and keeps the last known value; a later successful read
    /// recovers it.
    pub async fn update(&self) -> Result<(), HubError> {
        let result = match self.kind {
            SensorKind::Temperature => self.reader.read_temperature(self.device_id).await,
            SensorKind::Humidity => self.reader.read_humidity(self.device_id).await,
        };
        let mut state = self.state.write().await;
        match result {
            Ok(value) => {
                state.native_value = Some(value);
                state.available = true;
                Ok(())
            }
            Err(err) => {
                if state.available {
                    warn!(name = %self.name, %err, "sensor update failed");
                }
                state.available = false;
                Err(err)
            }
        }
    }
}
