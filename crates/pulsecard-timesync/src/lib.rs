//! # pulsecard-timesync
//!
//! Derives live elapsed time, remaining duration, and progress percentage
//! from the wall-clock timestamps embedded in an activity, independent of
//! when the next presence push arrives.
//!
//! Pure computations live in [`format`] and take explicit `now` instants;
//! the ticking streams in [`ticker`] re-evaluate them once per second and
//! release their timer as soon as they are dropped.

pub mod format;
pub mod ticker;

pub use format::{elapsed_seconds, format_duration, progress_percent, total_duration};
pub use ticker::{elapsed_stream, progress_stream};
