//! Connectivity and sync status

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_online: bool,
    pub last_sync: Option<DateTime<Utc>>,
    /// Local changes not yet pushed upstream
    pub pending_changes: u32,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            is_online: true,
            last_sync: None,
            pending_changes: 0,
        }
    }
}

pub trait SyncStatusProvider: Send + Sync {
    fn status(&self) -> SyncStatus;
}

/// Status set by hand, for tests and fixed deployments.
#[derive(Debug, Default)]
pub struct StaticStatus {
    status: RwLock<SyncStatus>,
}

impl StaticStatus {
    pub fn online() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            status: RwLock::new(SyncStatus {
                is_online: false,
                ..SyncStatus::default()
            }),
        }
    }

    pub fn set_online(&self, is_online: bool) {
        self.status.write().is_online = is_online;
    }

    pub fn set_last_sync(&self, at: DateTime<Utc>) {
        self.status.write().last_sync = Some(at);
    }
}

impl SyncStatusProvider for StaticStatus {
    fn status(&self) -> SyncStatus {
        *self.status.read()
    }
}
