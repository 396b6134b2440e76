// commands/mod.rs
pub mod read;
pub mod retry;
pub mod tracker;

use std::sync::Arc;
use std::time::Duration;

use ::metrics::counter;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::devices::{AwningDirection, DeviceCapabilities};
use crate::hub::{DeviceId, HubError, IcsHub};
use crate::metrics::{COMMANDS_DISPATCHED, COMMANDS_DROPPED, HUB_ERRORS};
use self::tracker::OperationTracker;

/// Logical actions against a KlikAanKlikUit device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnOn,
    TurnOff,
    /// Hub-native dimmer level, 1..=15.
    Dim(u8),
    ReadTemperature,
    ReadHumidity,
}

impl Action {
    /// Short stable token, kept under five characters so the combined
    /// tracking key `kaku{token}{id}` stays short.
    pub fn token(&self) -> &'static str {
        match self {
            Action::TurnOn => "on",
            Action::TurnOff => "off",
            Action::Dim(_) => "dim",
            Action::ReadTemperature => "temp",
            Action::ReadHumidity => "humid",
        }
    }

    async fn invoke(self, hub: &dyn IcsHub, device: DeviceId) -> Result<(), HubError> {
        match self {
            Action::TurnOn => hub.turn_on(device).await,
            Action::TurnOff => hub.turn_off(device).await,
            Action::Dim(level) => hub.dim(device, level).await,
            Action::ReadTemperature => hub.get_temperature(device).await.map(drop),
            Action::ReadHumidity => hub.get_humidity(device).await.map(drop),
        }
    }
}

/// Retry policy for fire-and-forget commands, uniform across all write
/// actions of a device.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub tries: u32,
    pub sleep: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            tries: 3,
            sleep: Duration::from_secs(3),
        }
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug)]
pub enum Dispatch {
    /// A retry task was launched. The handle is only needed by callers that
    /// want to await completion; dropping it detaches the task.
    Launched(JoinHandle<()>),
    /// Another operation holds the device's slot; the command was dropped.
    Dropped,
}

impl Dispatch {
    pub fn launched(&self) -> bool {
        matches!(self, Dispatch::Launched(_))
    }
}

/// KAKU dimmers understand 15 discrete levels while the platform hands us
/// brightness on a 1..=255 scale, so divide by 17 rounding up.
pub fn dim_level(brightness: u8) -> u8 {
    ((u16::from(brightness) + 16) / 17).clamp(1, 15) as u8
}

/// Turns a logical intent into a hub action and launches it on a worker.
///
/// Commands are fire-and-forget: the caller gets a `Dispatch` describing
/// whether a task was launched, never the result of the RF transmission.
/// While a device has an operation in flight, any further command for it is
/// dropped silently rather than queued (last writer loses).
pub struct CommandDispatcher {
    hub: Arc<dyn IcsHub>,
    tracker: Arc<OperationTracker>,
    retry: RetryConfig,
}

impl CommandDispatcher {
    pub fn new(hub: Arc<dyn IcsHub>, retry: RetryConfig) -> Self {
        Self {
            hub,
            tracker: Arc::new(OperationTracker::new()),
            retry,
        }
    }

    pub fn tracker(&self) -> &Arc<OperationTracker> {
        &self.tracker
    }

    /// Dims when a brightness was requested and the device supports it,
    /// otherwise sends a plain turn-on. An awning half maps turn-on to the
    /// hub call for its direction: `up` rides the on codes, `down` the off
    /// codes.
    pub fn turn_on(
        &self,
        device: DeviceId,
        capabilities: &DeviceCapabilities,
        brightness: Option<u8>,
    ) -> Dispatch {
        let action = match capabilities.awning_direction {
            Some(AwningDirection::Up) => Action::TurnOn,
            Some(AwningDirection::Down) => Action::TurnOff,
            None => match brightness {
                Some(value) if capabilities.dimmable => Action::Dim(dim_level(value)),
                _ => Action::TurnOn,
            },
        };
        self.launch(device, action)
    }

    pub fn turn_off(&self, device: DeviceId) -> Dispatch {
        self.launch(device, Action::TurnOff)
    }

    fn launch(&self, device: DeviceId, action: Action) -> Dispatch {
        let Some(guard) = self.tracker.try_acquire(device, action) else {
            info!(device, action = action.token(), "command dropped, operation in flight");
            counter!(COMMANDS_DROPPED).increment(1);
            return Dispatch::Dropped;
        };

        info!(device, action = action.token(), tries = self.retry.tries, "dispatching command");
        counter!(COMMANDS_DISPATCHED).increment(1);

        let hub = Arc::clone(&self.hub);
        let RetryConfig { tries, sleep } = self.retry;
        let handle = tokio::spawn(async move {
            // Moving the guard in ties slot release to task exit.
            let _guard = guard;
            let result = retry::repeat(tries, sleep, || {
                let hub = Arc::clone(&hub);
                async move { action.invoke(hub.as_ref(), device).await }
            })
            .await;
            if let Err(err) = result {
                counter!(HUB_ERRORS).increment(1);
                warn!(device, action = action.token(), %err, "command abandoned");
            }
        });
        Dispatch::Launched(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_level_divides_brightness_by_seventeen() {
        assert_eq!(dim_level(85), 5);
        assert_eq!(dim_level(1), 1);
        assert_eq!(dim_level(17), 1);
        assert_eq!(dim_level(18), 2);
        assert_eq!(dim_level(255), 15);
    }

    #[test]
    fn action_tokens_are_short_and_distinct() {
        let actions = [
            Action::TurnOn,
            Action::TurnOff,
            Action::Dim(1),
            Action::ReadTemperature,
            Action::ReadHumidity,
        ];
        for action in &actions {
            assert!(action.token().len() <= 5);
        }
        for (i, a) in actions.iter().enumerate() {
            for b in &actions[i + 1..] {
                assert_ne!(a.token(), b.token());
            }
        }
    }
}
