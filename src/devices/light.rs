// devices/light.rs
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::commands::CommandDispatcher;
use crate::devices::DeviceCapabilities;
use crate::hub::{DeviceId, HubDevice};
use crate::models::LightState;

/// A KlikAanKlikUit light, dimmer or awning half.
///
/// State is optimistic: it is updated the moment a command launches, because
/// the RF protocol gives no confirmation to wait for. If a command is dropped
/// under contention or its transmission fails, cached state desyncs from
/// physical reality until a later command succeeds.
pub struct KakuLight {
    name: String,
    device_id: DeviceId,
    capabilities: DeviceCapabilities,
    dispatcher: Arc<CommandDispatcher>,
    state: RwLock<LightState>,
}

impl KakuLight {
    pub fn new(
        device: &HubDevice,
        capabilities: DeviceCapabilities,
        dispatcher: Arc<CommandDispatcher>,
    ) -> Self {
        let name = match capabilities.awning_direction {
            Some(direction) => format!("{} {}", device.name, direction.label()),
            None => device.name.clone(),
        };
        info!(name = %name, device = device.id, dimmable = capabilities.dimmable, "adding light entity");
        Self {
            name,
            device_id: device.id,
            capabilities,
            dispatcher,
            state: RwLock::new(LightState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    pub fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    pub fn unique_id(&self) -> String {
        match self.capabilities.awning_direction {
            Some(direction) => format!("kaku-{}-{}", self.device_id, direction.label()),
            None => format!("kaku-{}", self.device_id),
        }
    }

    pub async fn is_on(&self) -> Option<bool> {
        self.state.read().await.is_on
    }

    pub async fn brightness(&self) -> Option<u8> {
        self.state.read().await.brightness
    }

    /// Fire-and-forget. Does nothing when the device already has an
    /// operation in flight; the dropped call leaves cached state untouched.
    pub async fn turn_on(&self, brightness: Option<u8>) {
        if !self
            .dispatcher
            .turn_on(self.device_id, &self.capabilities, brightness)
            .launched()
        {
            return;
        }
        let mut state = self.state.write().await;
        state.is_on = Some(true);
        if self.capabilities.dimmable
            && self.capabilities.awning_direction.is_none()
            && brightness.is_some()
        {
            state.brightness = brightness;
        }
    }

    pub async fn turn_off(&self) {
        if self.capabilities.awning_direction.is_some() {
            // Turn-off on an awning half means "stop": there is nothing to
            // send over RF, only local state to clear.
            info!(name = %self.name, "stopping awning");
            self.state.write().await.is_on = Some(false);
            return;
        }
        if self.dispatcher.turn_off(self.device_id).launched() {
            self.state.write().await.is_on = Some(false);
        }
    }
}
