//! Ring of Spell Storing
//!
//! Browse a spell library, filter it, and store spells in a ring that holds
//! at most five spell levels. The library is imported from CSV.

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod import;
pub mod logging;
pub mod ring;
pub mod state;
pub mod types;
pub mod utils;

pub use catalog::{CatalogStore, Selector, SharedCatalog, SpellFilter};
pub use error::{CatalogError, ImportError, RingError, RowError};
pub use ring::{Ring, RingOp, RING_CAPACITY};
pub use state::{SessionId, SessionManager};
pub use types::{effective_level, CandidateSpell, Placement, PlacementId, Spell, SpellId};
