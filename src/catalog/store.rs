//! Catalog store
//!
//! Holds the spell library. The whole catalog is replaced on import; entries
//! are never edited in place.

use crate::error::CatalogError;
use crate::types::{CandidateSpell, Spell, SpellId};
use tracing::{info, warn};

pub struct CatalogStore {
    spells: Vec<Spell>,
    /// Next id to hand out. Keeps counting across imports so ids are never reused.
    next_id: u32,
}

impl CandidateSpell {
    /// Check the invariants a catalog entry must satisfy.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("name is empty".to_string()));
        }
        Ok(())
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            spells: Vec::new(),
            next_id: 1,
        }
    }

    /// Discard the current catalog and store `candidates` under fresh ids.
    ///
    /// Candidates failing validation are skipped, not fatal to the batch.
    pub fn replace_all<I>(&mut self, candidates: I) -> Vec<Spell>
    where
        I: IntoIterator<Item = CandidateSpell>,
    {
        let mut spells = Vec::new();
        let mut skipped = 0usize;

        for candidate in candidates {
            if let Err(e) = candidate.validate() {
                warn!("Skipping catalog row: {}", e);
                skipped += 1;
                continue;
            }
            let id = SpellId(self.next_id);
            self.next_id += 1;
            spells.push(Spell::from_candidate(id, candidate));
        }

        info!(
            "Catalog replaced: {} spells stored ({} skipped, {} discarded)",
            spells.len(),
            skipped,
            self.spells.len()
        );
        self.spells = spells;
        self.spells.clone()
    }

    /// Full catalog in import order
    pub fn all(&self) -> &[Spell] {
        &self.spells
    }

    pub fn find(&self, id: SpellId) -> Result<&Spell, CatalogError> {
        self.spells
            .iter()
            .find(|spell| spell.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
