//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the scheduling core and an
//! external system (time, milestone tracker). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod tracker;

pub use clock::Clock;
pub use tracker::{MilestoneState, MilestoneTracker, RemoteMilestone, TrackerFuture};
