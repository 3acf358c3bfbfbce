pub mod manager;

pub use manager::{SessionId, SessionManager};
