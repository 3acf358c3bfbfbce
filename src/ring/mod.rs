pub mod history;
pub mod persist;
pub mod storage;

pub use history::{replay, RingOp};
pub use persist::{load_ring, save_ring, RingSnapshot};
pub use storage::{Ring, RING_CAPACITY};
