//! Platform abstraction layer
//!
//! Host-side collaborators the simulation depends on but does not own:
//! - Time: frame timestamps (wall clock or simulated)

pub mod time;

pub use time::{FixedRateClock, FrameClock, MonotonicClock};
