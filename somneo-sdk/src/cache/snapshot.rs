//! Snapshot of everything read during one refresh

use std::collections::HashMap;

use chrono::{DateTime, Local};
use somneo_api::{AlarmId, AlarmRecord, AlarmRegistry, Blob, Endpoint};

/// Device state as of one refresh
///
/// A refresh replaces the whole snapshot and bumps [`version`](Self::version).
/// Mutations made through the handle afterwards are written into the same
/// snapshot and flip [`is_locally_modified`](Self::is_locally_modified):
/// those changes were pushed to the device, but the rest of the snapshot
/// was not re-read, so it may be stale.
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    version: u64,
    fetched_at: Option<DateTime<Local>>,
    locally_modified: bool,
    blobs: HashMap<Endpoint, Blob>,
    alarms: AlarmRegistry,
    snooze_minutes: Option<u8>,
}

impl DeviceSnapshot {
    /// Create an empty snapshot (version 0, never refreshed)
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn refreshed(
        version: u64,
        blobs: HashMap<Endpoint, Blob>,
        alarms: AlarmRegistry,
        snooze_minutes: u8,
    ) -> Self {
        Self {
            version,
            fetched_at: Some(Local::now()),
            locally_modified: false,
            blobs,
            alarms,
            snooze_minutes: Some(snooze_minutes),
        }
    }

    /// Refresh counter; 0 until the first successful refresh
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn is_loaded(&self) -> bool {
        self.version > 0
    }

    /// Whether a mutation changed this snapshot since it was fetched
    pub fn is_locally_modified(&self) -> bool {
        self.locally_modified
    }

    pub fn blob(&self, endpoint: Endpoint) -> Option<&Blob> {
        self.blobs.get(&endpoint)
    }

    pub fn alarms(&self) -> &AlarmRegistry {
        &self.alarms
    }

    pub fn alarm(&self, id: AlarmId) -> Option<&AlarmRecord> {
        self.alarms.get(id)
    }

    pub fn snooze_minutes(&self) -> Option<u8> {
        self.snooze_minutes
    }

    pub(crate) fn store_blob(&mut self, endpoint: Endpoint, blob: Blob) {
        self.blobs.insert(endpoint, blob);
        self.locally_modified = true;
    }

    pub(crate) fn store_alarm(&mut self, record: AlarmRecord) {
        if let Some(existing) = self.alarms.get_mut(record.id) {
            *existing = record;
            self.locally_modified = true;
        }
    }

    pub(crate) fn store_snooze(&mut self, minutes: u8) {
        self.snooze_minutes = Some(minutes);
        self.locally_modified = true;
    }
}
