use crate::ring::Ring;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub type SessionId = Uuid;

/// Owns one ring per session. Each ring sits behind its own lock, so writes
/// to a ring are serialised while different sessions never contend.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<Ring>>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start a session with an empty ring
    pub fn open(&self) -> SessionId {
        self.open_with(Ring::new())
    }

    /// Start a session with an existing ring, e.g. one restored from disk
    pub fn open_with(&self, ring: Ring) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.write().insert(id, Arc::new(Mutex::new(ring)));
        info!("Session {} opened", id);
        id
    }

    pub fn ring(&self, id: &SessionId) -> Option<Arc<Mutex<Ring>>> {
        self.sessions.read().get(id).cloned()
    }

    /// Run `f` with exclusive access to the session's ring.
    pub fn with_ring<R>(&self, id: &SessionId, f: impl FnOnce(&mut Ring) -> R) -> Option<R> {
        let ring = self.ring(id)?;
        let mut guard = ring.lock();
        Some(f(&mut guard))
    }

    pub fn close(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            info!("Session {} closed", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
