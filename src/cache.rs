//! Device list cache
//!
//! A single-entry snapshot of the last discovered device list with a TTL.
//! The entry holds identity data only (sku/device pairs and names) - live
//! on/off/online state is always re-fetched from upstream. Concurrent
//! discoveries may race to overwrite the entry; last writer wins, which is
//! acceptable because the entry is a convenience snapshot, not a source of
//! truth. Control actions do not invalidate it.

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::protocol::DeviceRecord;

pub struct DeviceCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

struct CacheEntry {
    devices: Vec<DeviceRecord>,
    expires_at: Instant,
}

impl DeviceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Overwrite the cached list and reset its expiry.
    pub fn put(&self, devices: Vec<DeviceRecord>) {
        *self.entry.write() = Some(CacheEntry {
            devices,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// The cached list, or `None` when absent or expired.
    pub fn get(&self) -> Option<Vec<DeviceRecord>> {
        let guard = self.entry.read();
        let entry = guard.as_ref()?;
        if Instant::now() >= entry.expires_at {
            return None;
        }
        Some(entry.devices.clone())
    }

    pub fn clear(&self) {
        *self.entry.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, device: &str) -> DeviceRecord {
        DeviceRecord {
            sku: sku.to_string(),
            device: device.to_string(),
            device_name: None,
        }
    }

    #[test]
    fn test_empty_cache_returns_none() {
        let cache = DeviceCache::new(Duration::from_secs(3600));
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let cache = DeviceCache::new(Duration::from_secs(3600));
        cache.put(vec![record("H6159", "AA:BB")]);

        let devices = cache.get().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].sku, "H6159");
    }

    #[test]
    fn test_entry_expires() {
        let cache = DeviceCache::new(Duration::from_millis(10));
        cache.put(vec![record("H6159", "AA:BB")]);
        assert!(cache.get().is_some());

        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_overwrites_previous_entry() {
        let cache = DeviceCache::new(Duration::from_secs(3600));
        cache.put(vec![record("H6159", "AA:BB")]);
        cache.put(vec![record("H6003", "CC:DD"), record("H6159", "AA:BB")]);

        assert_eq!(cache.get().unwrap().len(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = DeviceCache::new(Duration::from_secs(3600));
        cache.put(vec![record("H6159", "AA:BB")]);
        cache.clear();
        assert!(cache.get().is_none());
    }
}
