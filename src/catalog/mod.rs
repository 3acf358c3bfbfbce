pub mod filter;
pub mod store;

pub use filter::{distinct_classes, distinct_levels, filter_spells, Selector, SpellFilter};
pub use store::CatalogStore;

use parking_lot::RwLock;
use std::sync::Arc;

/// Catalog shared between sessions. Imports take the write lock.
pub type SharedCatalog = Arc<RwLock<CatalogStore>>;

pub fn shared(store: CatalogStore) -> SharedCatalog {
    Arc::new(RwLock::new(store))
}
