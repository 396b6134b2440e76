//! Bridge exposing KlikAanKlikUit devices behind an ICS2000 hub as
//! home-automation entities.
//!
//! The hub speaks a one-way RF protocol: commands are never acknowledged, so
//! the only mitigation for packet loss is blind repetition. The core of this
//! crate is the command-retry and serialization engine in [`commands`]: every
//! write becomes a background task that repeats the hub call a configured
//! number of times, while a per-device tracking slot drops any command issued
//! for a device that already has one in flight. Entity state is optimistic,
//! updated at dispatch rather than on confirmed effect.

pub mod bridge;
pub mod commands;
pub mod config;
pub mod devices;
pub mod error;
pub mod hub;
pub mod metrics;
pub mod models;

pub use bridge::{Bridge, setup};
pub use commands::{Action, CommandDispatcher, Dispatch, RetryConfig};
pub use error::BridgeError;
pub use hub::{DeviceId, DeviceKind, HubDevice, HubError, IcsHub};
