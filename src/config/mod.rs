// config/mod.rs
use std::time::Duration;

use config::Config;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::commands::RetryConfig;
use crate::error::BridgeError;
use crate::hub::DeviceId;

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub hub: HubSettings,
    #[validate(nested)]
    #[serde(default)]
    pub retry: RetrySettings,
    /// Device ids to expose as paired up/down awning entities.
    #[serde(default)]
    pub awning_devices: Vec<DeviceId>,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HubSettings {
    pub mac: String,
    pub email: String,
    pub password: String,
    /// Overrides cloud discovery of the hub's LAN address.
    #[validate(custom(function = validate_ip))]
    pub ip_address: Option<String>,
    #[validate(custom(function = validate_aes_key))]
    pub aes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RetrySettings {
    #[validate(range(min = 1))]
    #[serde(default = "default_tries")]
    pub tries: u32,
    #[serde(default = "default_sleep")]
    pub sleep_seconds: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            tries: default_tries(),
            sleep_seconds: default_sleep(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

fn default_tries() -> u32 {
    3
}

fn default_sleep() -> u64 {
    3
}

fn default_metrics_port() -> u16 {
    9184
}

fn validate_ip(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<std::net::Ipv4Addr>()
        .map(drop)
        .map_err(|_| ValidationError::new("not a valid IPv4 address"))
}

fn validate_aes_key(value: &str) -> Result<(), ValidationError> {
    if value.len() == 32 && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("AES key must be 32 alphanumeric characters"))
    }
}

impl Settings {
    pub fn new() -> Result<Self, BridgeError> {
        let settings = Config::builder()
            .add_source(config::File::with_name("config/config").required(false))
            .add_source(config::Environment::with_prefix("ICS2000").separator("__"))
            .build()?;
        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            tries: self.retry.tries,
            sleep: Duration::from_secs(self.retry.sleep_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Settings {
        Settings {
            hub: HubSettings {
                mac: "00:11:22:33:44:55".into(),
                email: "user@example.com".into(),
                password: "secret".into(),
                ip_address: None,
                aes: None,
            },
            retry: RetrySettings::default(),
            awning_devices: Vec::new(),
            metrics: MetricsSettings::default(),
        }
    }

    #[test]
    fn defaults_are_conservative() {
        let settings = minimal();
        assert_eq!(settings.retry.tries, 3);
        assert_eq!(settings.retry.sleep_seconds, 3);
        assert_eq!(settings.retry_config().sleep, Duration::from_secs(3));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_tries_is_rejected() {
        let mut settings = minimal();
        settings.retry.tries = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn aes_key_must_be_32_alphanumeric_chars() {
        let mut settings = minimal();
        settings.hub.aes = Some("abcdef0123456789abcdef0123456789".into());
        assert!(settings.validate().is_ok());
        settings.hub.aes = Some("too-short".into());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn ip_override_must_parse() {
        let mut settings = minimal();
        settings.hub.ip_address = Some("192.168.1.15".into());
        assert!(settings.validate().is_ok());
        settings.hub.ip_address = Some("not-an-ip".into());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn deserializes_with_serde_defaults() {
        let cfg = Config::builder()
            .set_override("hub.mac", "00:11:22:33:44:55")
            .unwrap()
            .set_override("hub.email", "user@example.com")
            .unwrap()
            .set_override("hub.password", "secret")
            .unwrap()
            .build()
            .unwrap();
        let settings: Settings = cfg.try_deserialize().unwrap();
        assert_eq!(settings.retry.tries, 3);
        assert!(settings.awning_devices.is_empty());
        assert!(!settings.metrics.enabled);
    }
}
