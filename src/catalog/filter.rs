//! Spell library filtering.
//!
//! Everything here is pure: the same catalog and filter always produce the
//! same view, in catalog order.

use crate::types::Spell;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A filter choice: either everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

/// `"all"` (any case) and blank parse to `Selector::All`.
impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        trimmed.parse().map(Selector::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "all"),
            Selector::Only(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpellFilter {
    pub class: Selector<String>,
    pub level: Selector<u8>,
    pub search: String,
}

impl SpellFilter {
    /// Filter that matches the whole catalog.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, spell: &Spell) -> bool {
        self.class.accepts(&spell.class)
            && self.level.accepts(&spell.level)
            && self.matches_search(spell)
    }

    fn matches_search(&self, spell: &Spell) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        spell.name.to_lowercase().contains(&needle)
            || spell.description.to_lowercase().contains(&needle)
    }

    /// Back to matching everything ("Clear Filters").
    pub fn reset(&mut self) {
        *self = Self::all();
    }
}

pub fn filter_spells<'a>(spells: &'a [Spell], filter: &SpellFilter) -> Vec<&'a Spell> {
    spells.iter().filter(|spell| filter.matches(spell)).collect()
}

/// Sorted, de-duplicated class names, used to populate class choices.
pub fn distinct_classes(spells: &[Spell]) -> Vec<String> {
    spells
        .iter()
        .map(|spell| spell.class.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated spell levels.
pub fn distinct_levels(spells: &[Spell]) -> Vec<u8> {
    spells
        .iter()
        .map(|spell| spell.level)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::types::CandidateSpell;

    fn library() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_all(vec![
            CandidateSpell::new("Fire Bolt", "Wizard", 0)
                .with_description("Hurl a mote of fire"),
            CandidateSpell::new("Shield", "Wizard", 1)
                .with_description("An invisible barrier of magical force"),
            CandidateSpell::new("Cure Wounds", "Cleric", 1)
                .with_description("A creature you touch regains hit points"),
            CandidateSpell::new("Fireball", "Sorcerer", 3)
                .with_description("A bright streak flashes"),
            CandidateSpell::new("Sacred Flame", "Cleric", 0)
                .with_description("Flame-like radiance descends"),
        ]);
        store
    }

    fn names(spells: &[&Spell]) -> Vec<String> {
        spells.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_match_everything_preserves_order() {
        let store = library();
        let view = filter_spells(store.all(), &SpellFilter::all());
        let expected: Vec<&Spell> = store.all().iter().collect();
        assert_eq!(view, expected);
    }

    #[test]
    fn test_single_predicates() {
        let store = library();

        let filter = SpellFilter {
            class: Selector::Only("Cleric".to_string()),
            ..SpellFilter::all()
        };
        assert_eq!(
            names(&filter_spells(store.all(), &filter)),
            vec!["Cure Wounds", "Sacred Flame"]
        );

        let filter = SpellFilter {
            level: Selector::Only(0),
            ..SpellFilter::all()
        };
        assert_eq!(
            names(&filter_spells(store.all(), &filter)),
            vec!["Fire Bolt", "Sacred Flame"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let store = library();
        let filter = SpellFilter {
            search: "FIRE".to_string(),
            ..SpellFilter::all()
        };
        assert_eq!(
            names(&filter_spells(store.all(), &filter)),
            vec!["Fire Bolt", "Fireball"]
        );

        let filter = SpellFilter {
            search: "radiance".to_string(),
            ..SpellFilter::all()
        };
        assert_eq!(names(&filter_spells(store.all(), &filter)), vec!["Sacred Flame"]);
    }

    #[test]
    fn test_combined_predicates_intersect() {
        let store = library();
        let class = SpellFilter {
            class: Selector::Only("Wizard".to_string()),
            ..SpellFilter::all()
        };
        let level = SpellFilter {
            level: Selector::Only(1),
            ..SpellFilter::all()
        };
        let both = SpellFilter {
            class: class.class.clone(),
            level: level.level.clone(),
            ..SpellFilter::all()
        };

        let by_class = filter_spells(store.all(), &class);
        let by_level = filter_spells(store.all(), &level);
        let intersection: Vec<&Spell> = by_class
            .iter()
            .copied()
            .filter(|s| by_level.contains(s))
            .collect();

        assert_eq!(filter_spells(store.all(), &both), intersection);
        assert_eq!(names(&intersection), vec!["Shield"]);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("all".parse::<Selector<u8>>(), Ok(Selector::All));
        assert_eq!(" ALL ".parse::<Selector<u8>>(), Ok(Selector::All));
        assert_eq!("".parse::<Selector<u8>>(), Ok(Selector::All));
        assert_eq!("3".parse::<Selector<u8>>(), Ok(Selector::Only(3)));
        assert!("three".parse::<Selector<u8>>().is_err());
        assert_eq!(
            "Wizard".parse::<Selector<String>>(),
            Ok(Selector::Only("Wizard".to_string()))
        );
        assert_eq!(Selector::<u8>::All.to_string(), "all");
    }

    #[test]
    fn test_reset() {
        let mut filter = SpellFilter {
            class: Selector::Only("Bard".to_string()),
            level: Selector::Only(2),
            search: "charm".to_string(),
        };
        filter.reset();
        assert_eq!(filter, SpellFilter::all());
    }

    #[test]
    fn test_distinct_views() {
        let store = library();
        assert_eq!(distinct_classes(store.all()), vec!["Cleric", "Sorcerer", "Wizard"]);
        assert_eq!(distinct_levels(store.all()), vec![0, 1, 3]);
    }
}
