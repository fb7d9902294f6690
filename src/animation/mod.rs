//! Disk animation engine
//!
//! - [`record`]: one disk's lift / translate / descend motion
//! - [`scheduler`]: the per-frame loop over every record in flight
//!
//! The scheduler is driven by the frame clock, independently of the replay
//! pacing that feeds it moves.

pub mod record;
pub mod scheduler;

pub use record::{AnimationRecord, Phase, Point};
pub use scheduler::{RecordId, Scheduler, DEFAULT_SPEED};
