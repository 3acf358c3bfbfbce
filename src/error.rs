use crate::types::{PlacementId, SpellId};
use thiserror::Error;

/// Errors raised by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Invalid spell: {0}")]
    Validation(String),
    #[error("Spell {0} not found")]
    NotFound(SpellId),
}

/// Errors raised by ring mutations. A failed mutation never changes the ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("Spell {0} not found")]
    ItemNotFound(SpellId),
    #[error(
        "Ring capacity exceeded. Current: {current}/{capacity}, Effective spell level: {attempted}"
    )]
    CapacityExceeded {
        current: u32,
        capacity: u32,
        attempted: u32,
    },
    #[error("No stored spell with id {0}")]
    NotFound(PlacementId),
    #[error("Placement id {0} is used more than once")]
    DuplicatePlacement(PlacementId),
    #[error("Ring has run out of placement ids")]
    PlacementIdsExhausted,
}

/// Failure to normalize a single CSV row. `row` is 1-based, excluding the header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Row {row}: invalid level '{value}'")]
    InvalidLevel { row: usize, value: String },
}

/// Errors raised while importing a CSV catalog. Any of these leaves the
/// existing catalog untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read CSV file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing a '{0}' column")]
    MissingColumn(&'static str),
    #[error("CSV contains no spells")]
    Empty,
    #[error("Some spells failed validation: {}", format_rows(.0))]
    Rows(Vec<RowError>),
}

fn format_rows(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
