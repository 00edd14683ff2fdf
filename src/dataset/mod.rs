//! Comparison dataset records and file I/O

mod store;
mod types;

pub use store::{load, save};
pub use types::{Slot, Task};
