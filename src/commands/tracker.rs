// commands/tracker.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::commands::Action;
use crate::hub::DeviceId;

/// One in-flight command, owned by the tracker for its lifetime.
#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub device: DeviceId,
    pub action: Action,
    /// Diagnostics only; nothing times out on this.
    pub started_at: DateTime<Utc>,
}

impl OperationRecord {
    /// Short tracking key, e.g. `kakudim652341`. The original integration
    /// encoded this into worker names capped at 15 characters; the tokens
    /// stay short so the key remains readable in logs.
    pub fn key(&self) -> String {
        format!("kaku{}{}", self.action.token(), self.device)
    }
}

/// Registry of in-flight operations, one slot per device identity.
///
/// Exclusivity is device-level: any in-flight operation blocks every other
/// action for that device, not just the same action. Acquisition is an atomic
/// check-and-insert on the map entry.
#[derive(Debug, Default)]
pub struct OperationTracker {
    inflight: DashMap<DeviceId, OperationRecord>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an in-flight operation unless the device already has one.
    ///
    /// Returns a guard that releases the slot when dropped, so release runs
    /// on the worker's exit path whether the command succeeds or fails.
    pub fn try_acquire(
        self: &Arc<Self>,
        device: DeviceId,
        action: Action,
    ) -> Option<OperationGuard> {
        match self.inflight.entry(device) {
            Entry::Occupied(existing) => {
                info!(device, running = %existing.get().key(), "operation already in flight");
                None
            }
            Entry::Vacant(slot) => {
                let record = OperationRecord {
                    device,
                    action,
                    started_at: Utc::now(),
                };
                debug!(key = %record.key(), "tracking slot acquired");
                slot.insert(record);
                Some(OperationGuard {
                    tracker: Arc::clone(self),
                    device,
                })
            }
        }
    }

    /// Idempotent; releasing a device with no record is a no-op.
    pub fn release(&self, device: DeviceId) {
        if self.inflight.remove(&device).is_some() {
            debug!(device, "tracking slot released");
        }
    }

    pub fn is_busy(&self, device: DeviceId) -> bool {
        self.inflight.contains_key(&device)
    }
}

/// Releases the device's tracking slot on drop.
pub struct OperationGuard {
    tracker: Arc<OperationTracker>,
    device: DeviceId,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.tracker.release(self.device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let tracker = Arc::new(OperationTracker::new());

        let guard = tracker.try_acquire(7, Action::TurnOn);
        assert!(guard.is_some());
        assert!(tracker.is_busy(7));

        // Any action variant is blocked, not just the same one.
        assert!(tracker.try_acquire(7, Action::TurnOff).is_none());
        assert!(tracker.try_acquire(7, Action::Dim(5)).is_none());

        drop(guard);
        assert!(!tracker.is_busy(7));
        assert!(tracker.try_acquire(7, Action::TurnOff).is_some());
    }

    #[test]
    fn devices_do_not_contend_with_each_other() {
        let tracker = Arc::new(OperationTracker::new());
        let _first = tracker.try_acquire(1, Action::TurnOn).unwrap();
        assert!(tracker.try_acquire(2, Action::TurnOn).is_some());
    }

    #[test]
    fn release_is_idempotent() {
        let tracker = Arc::new(OperationTracker::new());
        tracker.release(42);
        let guard = tracker.try_acquire(42, Action::TurnOn).unwrap();
        drop(guard);
        tracker.release(42);
        assert!(!tracker.is_busy(42));
    }

    #[test]
    fn record_key_stays_short() {
        let record = OperationRecord {
            device: 652341,
            action: Action::Dim(9),
            started_at: Utc::now(),
        };
        assert_eq!(record.key(), "kakudim652341");
    }
}
