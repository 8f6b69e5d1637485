//! Per-device last-known-fix store
//!
//! The only shared mutable state in the pipeline. Keys are device ids; the
//! value is replaced (never merged) once per scored submission. The sharded
//! map serialises the read-modify-write per key while submissions from
//! different devices proceed without contention.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::haversine_m;

/// Last known GPS fix for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceFix {
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: DateTime<Utc>,
}

/// Device-keyed store of last fixes, shared across pipeline invocations.
#[derive(Debug, Default)]
pub struct DeviceFixStore {
    fixes: DashMap<String, DeviceFix>,
}

impl DeviceFixStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance in meters from the device's previous fix, replacing the
    /// stored fix with the current coordinates.
    ///
    /// First fix for a device → 0.0. The entry guard holds the shard lock
    /// across the read and the write, so two submissions for the same
    /// device can never interleave between "read previous" and "store
    /// current".
    pub fn advance(&self, device_id: &str, latitude: f64, longitude: f64) -> f64 {
        let fix = DeviceFix {
            latitude,
            longitude,
            updated_at: Utc::now(),
        };
        match self.fixes.entry(device_id.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let prev = occupied.get();
                let distance = haversine_m(prev.latitude, prev.longitude, latitude, longitude);
                occupied.insert(fix);
                distance
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fix);
                0.0
            }
        }
    }

    /// Current fix for a device, if any.
    pub fn get(&self, device_id: &str) -> Option<DeviceFix> {
        self.fixes.get(device_id).map(|f| f.value().clone())
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fix_has_zero_distance() {
        let store = DeviceFixStore::new();
        assert_eq!(store.advance("dev-1", 52.0, 5.0), 0.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_second_fix_measures_haversine() {
        let store = DeviceFixStore::new();
        store.advance("dev-1", 52.0, 5.0);
        let d = store.advance("dev-1", 52.0, 5.1);
        assert!((d - 6860.0).abs() / 6860.0 < 0.01, "distance was {d}");
    }

    #[test]
    fn test_fix_is_replaced_not_merged() {
        let store = DeviceFixStore::new();
        store.advance("dev-1", 52.0, 5.0);
        store.advance("dev-1", 53.0, 6.0);
        let fix = store.get("dev-1").unwrap();
        assert_eq!(fix.latitude, 53.0);
        assert_eq!(fix.longitude, 6.0);
    }

    #[test]
    fn test_devices_do_not_share_state() {
        let store = DeviceFixStore::new();
        store.advance("dev-1", 52.0, 5.0);
        assert_eq!(store.advance("dev-2", 10.0, 10.0), 0.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_advance_from_many_threads() {
        use std::sync::Arc;

        let store = Arc::new(DeviceFixStore::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let device = format!("dev-{}", t % 4);
                for i in 0..100 {
                    store.advance(&device, 52.0 + f64::from(i) * 1e-4, 5.0);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 4);
    }
}
