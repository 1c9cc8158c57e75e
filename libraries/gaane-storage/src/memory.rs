//! In-memory snapshot store

use gaane_core::{PersistedSnapshot, Result, SnapshotStore};

/// Keeps the snapshot in memory; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshot: Option<PersistedSnapshot>,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: PersistedSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<PersistedSnapshot> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaane_core::TrackId;

    #[test]
    fn empty_store_loads_defaults() {
        assert_eq!(
            MemorySnapshotStore::new().load().unwrap(),
            PersistedSnapshot::default()
        );
    }

    #[test]
    fn save_replaces_snapshot() {
        let mut store = MemorySnapshotStore::with_snapshot(PersistedSnapshot {
            was_playing: true,
            ..PersistedSnapshot::default()
        });

        let next = PersistedSnapshot {
            last_track_id: Some(TrackId::new("b")),
            ..PersistedSnapshot::default()
        };
        store.save(&next).unwrap();

        assert_eq!(store.load().unwrap(), next);
        assert_eq!(store.save_count(), 1);
    }
}
