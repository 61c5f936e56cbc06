//! Emberblade Core - shared foundation for the simulation crates
//!
//! Provides math helpers, frame timing, and id types.

pub mod math;
pub mod time;
pub mod types;

pub use math::{flatten_to_ground, yaw_facing};
pub use time::{FrameClock, FrameClockConfig};
pub use types::ActorId;
