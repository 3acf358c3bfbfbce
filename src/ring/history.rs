//! Ring operation log. A ring's state is a fold over the operations applied
//! to it, so replaying the same log against the same catalog rebuilds it.

use super::storage::Ring;
use crate::catalog::CatalogStore;
use crate::error::RingError;
use crate::types::{PlacementId, SpellId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RingOp {
    Add { spell_id: SpellId, upcast: u8 },
    Remove { placement: PlacementId },
    Clear,
}

impl Ring {
    pub fn apply(&mut self, catalog: &CatalogStore, op: &RingOp) -> Result<(), RingError> {
        match op {
            RingOp::Add { spell_id, upcast } => self.add(catalog, *spell_id, *upcast).map(|_| ()),
            RingOp::Remove { placement } => self.remove(*placement).map(|_| ()),
            RingOp::Clear => {
                self.clear();
                Ok(())
            }
        }
    }
}

/// Rebuild a ring from its history. Stops at the first failing operation.
pub fn replay<'a, I>(capacity: u32, catalog: &CatalogStore, ops: I) -> Result<Ring, RingError>
where
    I: IntoIterator<Item = &'a RingOp>,
{
    let mut ring = Ring::with_capacity(capacity);
    for op in ops {
        ring.apply(catalog, op)?;
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::RING_CAPACITY;
    use crate::types::CandidateSpell;

    fn catalog() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_all(vec![
            CandidateSpell::new("Mage Hand", "Wizard", 0),
            CandidateSpell::new("Sleep", "Wizard", 1),
            CandidateSpell::new("Web", "Wizard", 2),
            CandidateSpell::new("Fly", "Wizard", 3),
        ]);
        store
    }

    /// Small deterministic generator so the property runs over many histories.
    fn histories() -> Vec<Vec<RingOp>> {
        let mut seed: u64 = 0x5eed;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as u32
        };

        (0..200)
            .map(|_| {
                (0..12)
                    .map(|_| match next() % 6 {
                        0 => RingOp::Remove {
                            placement: PlacementId(u64::from(next() % 8)),
                        },
                        1 if next() % 4 == 0 => RingOp::Clear,
                        _ => RingOp::Add {
                            spell_id: SpellId(next() % 5 + 1),
                            upcast: (next() % 3) as u8,
                        },
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_total_never_exceeds_capacity() {
        let store = catalog();
        for ops in histories() {
            let mut ring = Ring::new();
            for op in &ops {
                let before = ring.clone();
                if ring.apply(&store, op).is_err() {
                    assert_eq!(ring, before);
                }
                assert!(ring.current_total() <= RING_CAPACITY);
            }
        }
    }

    #[test]
    fn test_replay_is_deterministic() {
        let store = catalog();
        let ops = vec![
            RingOp::Add { spell_id: SpellId(4), upcast: 0 },
            RingOp::Add { spell_id: SpellId(1), upcast: 0 },
            RingOp::Remove { placement: PlacementId(1) },
            RingOp::Add { spell_id: SpellId(3), upcast: 1 },
        ];

        let first = replay(RING_CAPACITY, &store, &ops).unwrap();
        let second = replay(RING_CAPACITY, &store, &ops).unwrap();

        assert_eq!(first.current_total(), 4);
        let ids = |ring: &Ring| ring.placements().iter().map(|p| (p.id, p.spell_id, p.upcast)).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(
            ids(&first),
            vec![(PlacementId(2), SpellId(1), 0), (PlacementId(3), SpellId(3), 1)]
        );
    }

    #[test]
    fn test_replay_stops_at_first_failure() {
        let store = catalog();
        let ops = vec![
            RingOp::Add { spell_id: SpellId(4), upcast: 0 },
            RingOp::Add { spell_id: SpellId(4), upcast: 0 },
            RingOp::Clear,
        ];
        assert!(matches!(
            replay(RING_CAPACITY, &store, &ops),
            Err(RingError::CapacityExceeded { current: 3, capacity: 5, attempted: 3 })
        ));
    }

    #[test]
    fn test_ops_serialize_tagged() {
        let op = RingOp::Add { spell_id: SpellId(2), upcast: 1 };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"add","spell_id":2,"upcast":1}"#);
        assert_eq!(serde_json::from_str::<RingOp>(r#"{"op":"clear"}"#).unwrap(), RingOp::Clear);
    }
}
