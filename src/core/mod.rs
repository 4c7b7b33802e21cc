// src/core/mod.rs

pub mod clock;
pub mod sanitize;

pub use clock::{Clock, ManualClock, SystemClock};
