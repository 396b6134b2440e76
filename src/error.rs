// error.rs
use thiserror::Error;

use crate::hub::HubError;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("hub call failed: {0}")]
    Hub(#[from] HubError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
