//! JSON snapshot of a ring, so stored spells survive a restart.

use super::storage::Ring;
use crate::error::RingError;
use crate::types::Placement;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSnapshot {
    pub capacity: u32,
    pub next_placement_id: u64,
    pub placements: Vec<Placement>,
}

impl Ring {
    pub fn snapshot(&self) -> RingSnapshot {
        RingSnapshot {
            capacity: self.capacity,
            next_placement_id: self.next_placement_id,
            placements: self.placements.clone(),
        }
    }

    /// Rebuild a ring from a snapshot. Snapshots that break the capacity
    /// invariant or repeat a placement id are refused rather than repaired.
    pub fn from_snapshot(snapshot: RingSnapshot) -> Result<Ring, RingError> {
        let mut ring = Ring::with_capacity(snapshot.capacity);
        let mut seen = HashSet::new();
        for placement in snapshot.placements {
            if !seen.insert(placement.id) {
                return Err(RingError::DuplicatePlacement(placement.id));
            }
            let current = ring.current_total();
            let attempted = placement.effective_level();
            if current.saturating_add(attempted) > ring.capacity {
                return Err(RingError::CapacityExceeded {
                    current,
                    capacity: ring.capacity,
                    attempted,
                });
            }
            let after = placement
                .id
                .0
                .checked_add(1)
                .ok_or(RingError::PlacementIdsExhausted)?;
            ring.next_placement_id = ring.next_placement_id.max(after);
            ring.placements.push(placement);
        }
        ring.next_placement_id = ring.next_placement_id.max(snapshot.next_placement_id);
        Ok(ring)
    }
}

/// Load a saved ring. A missing file means there is nothing saved yet.
pub fn load_ring(path: &Path) -> Result<Option<Ring>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ring state from {:?}", path))?;
    let snapshot: RingSnapshot =
        serde_json::from_str(&contents).context("Failed to parse ring state")?;
    let ring = Ring::from_snapshot(snapshot).context("Saved ring state is invalid")?;

    info!(
        "Restored ring with {} spell(s) ({}/{}) from {:?}",
        ring.len(),
        ring.current_total(),
        ring.capacity(),
        path
    );
    Ok(Some(ring))
}

pub fn save_ring(path: &Path, ring: &Ring) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create ring state directory")?;
    }

    let json =
        serde_json::to_string_pretty(&ring.snapshot()).context("Failed to serialize ring")?;
    fs::write(path, json).with_context(|| format!("Failed to write ring state to {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::ring::RING_CAPACITY;
    use crate::types::{CandidateSpell, PlacementId, SpellId};

    fn filled_ring() -> Ring {
        let mut store = CatalogStore::new();
        store.replace_all(vec![
            CandidateSpell::new("Guidance", "Cleric", 0),
            CandidateSpell::new("Bless", "Cleric", 1),
        ]);
        let mut ring = Ring::new();
        ring.add(&store, SpellId(1), 0).unwrap();
        let bless = ring.add(&store, SpellId(2), 1).unwrap().id;
        ring.add(&store, SpellId(2), 0).unwrap();
        ring.remove(bless).unwrap();
        ring
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ring.json");
        let ring = filled_ring();

        save_ring(&path, &ring).unwrap();
        let loaded = load_ring(&path).unwrap().unwrap();

        assert_eq!(loaded, ring);
        assert_eq!(loaded.current_total(), 2);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_ring(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_restored_ring_does_not_reuse_placement_ids() {
        let ring = filled_ring();
        let mut snapshot = ring.snapshot();
        snapshot.next_placement_id = 0;

        let restored = Ring::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.next_placement_id, 4);
        assert!(restored.get(PlacementId(3)).is_some());
    }

    #[test]
    fn test_over_capacity_snapshot_is_refused() {
        let ring = filled_ring();
        let mut snapshot = ring.snapshot();
        snapshot.capacity = 1;

        assert_eq!(
            Ring::from_snapshot(snapshot).unwrap_err(),
            RingError::CapacityExceeded {
                current: 1,
                capacity: 1,
                attempted: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_placement_ids_are_refused() {
        let ring = filled_ring();
        let mut snapshot = ring.snapshot();
        snapshot.placements[1].id = snapshot.placements[0].id;
        let dup = snapshot.placements[0].id;

        assert_eq!(
            Ring::from_snapshot(snapshot).unwrap_err(),
            RingError::DuplicatePlacement(dup)
        );
    }

    #[test]
    fn test_last_placement_id_is_refused() {
        let ring = filled_ring();
        let mut snapshot = ring.snapshot();
        snapshot.placements[1].id = PlacementId(u64::MAX);

        assert_eq!(
            Ring::from_snapshot(snapshot).unwrap_err(),
            RingError::PlacementIdsExhausted
        );
    }

    #[test]
    fn test_oversized_capacity_is_clamped() {
        let ring = filled_ring();
        let mut snapshot = ring.snapshot();
        snapshot.capacity = u32::MAX;

        assert_eq!(Ring::from_snapshot(snapshot).unwrap().capacity(), RING_CAPACITY);
    }

    #[test]
    fn test_bad_snapshot_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.json");
        let mut snapshot = filled_ring().snapshot();
        snapshot.placements[1].id = snapshot.placements[0].id;
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let err = load_ring(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("used more than once"), "{:#}", err);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_ring(&path).is_err());
    }
}
