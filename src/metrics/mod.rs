// metrics/mod.rs
use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::BridgeError;

pub const COMMANDS_DISPATCHED: &str = "ics2000_commands_dispatched_total";
pub const COMMANDS_DROPPED: &str = "ics2000_commands_dropped_total";
pub const HUB_ERRORS: &str = "ics2000_hub_errors_total";
pub const SENSOR_READS: &str = "ics2000_sensor_reads_total";
pub const SENSOR_READ_FAILURES: &str = "ics2000_sensor_read_failures_total";

/// Installs the Prometheus exporter with its scrape endpoint on `port`.
pub fn setup_metrics(port: u16) -> Result<(), BridgeError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| BridgeError::Internal(anyhow::anyhow!("failed to install metrics exporter: {e}")))
}
