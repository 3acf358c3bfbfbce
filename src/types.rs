use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a spell. Assigned by the catalog store on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of one placement inside a ring. Distinct from `SpellId`:
/// the same spell can be stored several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A spell row proposed for import, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpell {
    pub name: String,
    pub class: String,
    pub level: u8,
    pub description: String,
    pub detail: String,
    pub kind: String,
    pub concentration: String,
    pub upcast: String,
    pub range: String,
}

impl CandidateSpell {
    /// Minimal candidate with the defaults the importer would fill in.
    pub fn new(name: impl Into<String>, class: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            level,
            description: String::new(),
            detail: String::new(),
            kind: "Spell".to_string(),
            concentration: "No".to_string(),
            upcast: "No".to_string(),
            range: "Unknown".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub class: String,
    pub level: u8,
    pub description: String,
    pub detail: String,
    pub kind: String,
    pub concentration: String,
    pub upcast: String,
    pub range: String,
}

impl Spell {
    pub(crate) fn from_candidate(id: SpellId, candidate: CandidateSpell) -> Self {
        Self {
            id,
            name: candidate.name.trim().to_string(),
            class: candidate.class,
            level: candidate.level,
            description: candidate.description,
            detail: candidate.detail,
            kind: candidate.kind,
            concentration: candidate.concentration,
            upcast: candidate.upcast,
            range: candidate.range,
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn requires_concentration(&self) -> bool {
        self.concentration.trim().eq_ignore_ascii_case("yes")
    }

    /// Anything other than an empty cell or "no" counts as upcastable.
    pub fn is_upcastable(&self) -> bool {
        let upcast = self.upcast.trim();
        !upcast.is_empty() && !upcast.eq_ignore_ascii_case("no")
    }
}

/// Capacity cost of storing a spell of `level` with `upcast` extra levels.
///
/// Level 0 is floored to 1 before the modifier is added, so every
/// placement costs at least 1.
pub fn effective_level(level: u8, upcast: u8) -> u32 {
    u32::from(level.max(1)) + u32::from(upcast)
}

/// A spell stored in a ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: PlacementId,
    pub spell_id: SpellId,
    pub upcast: u8,
    pub added_at: DateTime<Utc>,
    /// Copy of the catalog entry at the time it was stored; the catalog may
    /// be replaced by a later import.
    pub spell: Spell,
}

impl Placement {
    pub fn effective_level(&self) -> u32 {
        effective_level(self.spell.level, self.upcast)
    }
}
