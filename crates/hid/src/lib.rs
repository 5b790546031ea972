mod latch;
mod snapshot;

pub use latch::InputLatch;
pub use snapshot::{Button, ButtonSet, InputSnapshot, TouchPos};
