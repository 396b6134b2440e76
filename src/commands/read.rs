// commands/read.rs
use std::future::Future;
use std::sync::Arc;

use ::metrics::counter;

use crate::hub::{DeviceId, HubError, IcsHub};
use crate::metrics::{SENSOR_READ_FAILURES, SENSOR_READS};

/// Runs a single hub read on its own task and waits for the one result.
///
/// Reads are never retried (a failed read is reported once) and do not take a
/// tracking slot: they never mutate physical state, so they are allowed to
/// overlap with in-flight write commands.
pub struct SensorReader {
    hub: Arc<dyn IcsHub>,
}

impl SensorReader {
    pub fn new(hub: Arc<dyn IcsHub>) -> Self {
        Self { hub }
    }

    pub async fn read_temperature(&self, device: DeviceId) -> Result<f64, HubError> {
        let hub = Arc::clone(&self.hub);
        single_result(async move { hub.get_temperature(device).await }).await
    }

    pub async fn read_humidity(&self, device: DeviceId) -> Result<f64, HubError> {
        let hub = Arc::clone(&self.hub);
        single_result(async move { hub.get_humidity(device).await }).await
    }
}

async fn single_result<F>(call: F) -> Result<f64, HubError>
where
    F: Future<Output = Result<f64, HubError>> + Send + 'static,
{
    counter!(SENSOR_READS).increment(1);
    let result = match tokio::spawn(call).await {
        Ok(result) => result,
        Err(err) => Err(HubError::Transport(format!("read worker failed: {err}"))),
    };
    if result.is_err() {
        counter!(SENSOR_READ_FAILURES).increment(1);
    }
    result
}
