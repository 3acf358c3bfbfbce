//! Ring storage
//!
//! The capacity-constrained container. Each placement costs its effective
//! level, and the sum of all costs never exceeds the ring's capacity.

use crate::catalog::CatalogStore;
use crate::error::RingError;
use crate::types::{effective_level, Placement, PlacementId, SpellId};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Capacity of a Ring of Spell Storing, in spell levels.
pub const RING_CAPACITY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    pub(crate) capacity: u32,
    pub(crate) placements: Vec<Placement>,
    pub(crate) next_placement_id: u64,
}

impl Ring {
    /// Create an empty ring with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(RING_CAPACITY)
    }

    /// Create an empty ring holding at most `capacity` levels. Capacities
    /// above `RING_CAPACITY` are clamped to it.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity: capacity.min(RING_CAPACITY),
            placements: Vec::new(),
            next_placement_id: 1,
        }
    }

    /// Store a catalog spell, optionally upcast.
    ///
    /// Rejected in full when the spell is unknown or would push the total
    /// over capacity; the ring is unchanged in that case.
    pub fn add(
        &mut self,
        catalog: &CatalogStore,
        spell_id: SpellId,
        upcast: u8,
    ) -> Result<&Placement, RingError> {
        let spell = catalog
            .find(spell_id)
            .map_err(|_| RingError::ItemNotFound(spell_id))?;

        let attempted = effective_level(spell.level, upcast);
        let current = self.current_total();
        if current.saturating_add(attempted) > self.capacity {
            warn!(
                "Rejected {} (effective level {}): ring at {}/{}",
                spell.name, attempted, current, self.capacity
            );
            return Err(RingError::CapacityExceeded {
                current,
                capacity: self.capacity,
                attempted,
            });
        }

        let id = PlacementId(self.next_placement_id);
        self.next_placement_id = self
            .next_placement_id
            .checked_add(1)
            .ok_or(RingError::PlacementIdsExhausted)?;
        self.placements.push(Placement {
            id,
            spell_id,
            upcast,
            added_at: Utc::now(),
            spell: spell.clone(),
        });

        info!(
            "Stored {} as placement {} (effective level {}, total {}/{})",
            spell.name,
            id,
            attempted,
            current + attempted,
            self.capacity
        );
        Ok(&self.placements[self.placements.len() - 1])
    }

    /// Remove one placement; the rest keep their order and ids.
    pub fn remove(&mut self, placement_id: PlacementId) -> Result<Placement, RingError> {
        let pos = self
            .placements
            .iter()
            .position(|p| p.id == placement_id)
            .ok_or(RingError::NotFound(placement_id))?;

        let removed = self.placements.remove(pos);
        info!(
            "Cast {} from placement {} (total {}/{})",
            removed.spell.name,
            placement_id,
            self.current_total(),
            self.capacity
        );
        Ok(removed)
    }

    pub fn clear(&mut self) {
        let count = self.placements.len();
        self.placements.clear();
        debug!("Cleared {} placement(s) from ring", count);
    }

    /// Sum of effective levels of everything stored
    pub fn current_total(&self) -> u32 {
        self.placements
            .iter()
            .map(Placement::effective_level)
            .fold(0u32, u32::saturating_add)
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.current_total())
    }

    /// True when nothing more can be stored, not even a cantrip.
    pub fn is_full(&self) -> bool {
        self.current_total() >= self.capacity
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, placement_id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == placement_id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}
