// bridge.rs
use std::sync::Arc;

use tracing::info;

use crate::commands::CommandDispatcher;
use crate::commands::read::SensorReader;
use crate::config::Settings;
use crate::devices::{AwningDirection, DeviceCapabilities, KakuLight, KakuSensor, SensorKind};
use crate::error::BridgeError;
use crate::hub::{DeviceKind, IcsHub};

/// Entities produced from one hub discovery pass.
pub struct Bridge {
    pub lights: Vec<Arc<KakuLight>>,
    pub sensors: Vec<Arc<KakuSensor>>,
}

/// Discovers devices on the hub and builds entities for them.
///
/// A hub that cannot be reached or rejects credentials fails setup: the error
/// propagates and no entities are created. Device ids listed in
/// `settings.awning_devices` become two paired on/off entities; a
/// temperature/humidity device becomes one sensor entity per channel.
pub async fn setup(hub: Arc<dyn IcsHub>, settings: &Settings) -> Result<Bridge, BridgeError> {
    if settings.metrics.enabled {
        crate::metrics::setup_metrics(settings.metrics.port)?;
    }

    let devices = hub.devices().await?;
    info!(count = devices.len(), "discovered ICS2000 devices");

    let dispatcher = Arc::new(CommandDispatcher::new(
        Arc::clone(&hub),
        settings.retry_config(),
    ));
    let reader = Arc::new(SensorReader::new(Arc::clone(&hub)));

    let mut lights = Vec::new();
    let mut sensors = Vec::new();
    for device in &devices {
        info!(id = device.id, name = %device.name, kind = ?device.kind, "found device");
        match device.kind {
            DeviceKind::TemperatureHumiditySensor => {
                for kind in [SensorKind::Temperature, SensorKind::Humidity] {
                    sensors.push(Arc::new(KakuSensor::new(device, kind, Arc::clone(&reader))));
                }
            }
            _ if settings.awning_devices.contains(&device.id) => {
                for direction in [AwningDirection::Up, AwningDirection::Down] {
                    lights.push(Arc::new(KakuLight::new(
                        device,
                        DeviceCapabilities {
                            dimmable: false,
                            awning_direction: Some(direction),
                        },
                        Arc::clone(&dispatcher),
                    )));
                }
            }
            kind => {
                lights.push(Arc::new(KakuLight::new(
                    device,
                    DeviceCapabilities {
                        dimmable: kind == DeviceKind::Dimmer,
                        awning_direction: None,
                    },
                    Arc::clone(&dispatcher),
                )));
            }
        }
    }

    Ok(Bridge { lights, sensors })
}
