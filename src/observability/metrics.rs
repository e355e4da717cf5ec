//! Service counters
//!
//! - Counters only, backed by atomics
//! - Reset on process start; `fileserver_hits` can also be reset over HTTP
//! - Relaxed ordering: values are exact once all writers are done

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Requests served under `/app`
    fileserver_hits: AtomicU64,
    chirps_created: AtomicU64,
    /// Chirps refused by validation
    chirps_rejected: AtomicU64,
    users_created: AtomicU64,
    store_write_failures: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_fileserver_hits(&self) {
        self.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fileserver_hits(&self) -> u64 {
        self.fileserver_hits.load(Ordering::Relaxed)
    }

    pub fn reset_fileserver_hits(&self) {
        self.fileserver_hits.store(0, Ordering::Relaxed);
    }

    pub fn increment_chirps_created(&self) {
        self.chirps_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_chirps_rejected(&self) {
        self.chirps_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_write_failures(&self) {
        self.store_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fileserver_hits: self.fileserver_hits.load(Ordering::Relaxed),
            chirps_created: self.chirps_created.load(Ordering::Relaxed),
            chirps_rejected: self.chirps_rejected.load(Ordering::Relaxed),
            users_created: self.users_created.load(Ordering::Relaxed),
            store_write_failures: self.store_write_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub fileserver_hits: u64,
    pub chirps_created: u64,
    pub chirps_rejected: u64,
    pub users_created: u64,
    pub store_write_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();

        assert_eq!(snapshot.fileserver_hits, 0);
        assert_eq!(snapshot.chirps_created, 0);
        assert_eq!(snapshot.store_write_failures, 0);
    }

    #[test]
    fn test_reset_only_touches_hits() {
        let registry = MetricsRegistry::new();
        registry.increment_fileserver_hits();
        registry.increment_fileserver_hits();
        registry.increment_chirps_created();

        registry.reset_fileserver_hits();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.fileserver_hits, 0);
        assert_eq!(snapshot.chirps_created, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_chirps_rejected();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["chirps_rejected"], 1);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_fileserver_hits();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.fileserver_hits(), 1000);
    }
}
