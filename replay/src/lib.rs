//! Recorded action logs and deterministic playback.
//!
//! A [`RecordedActionLog`] holds, per battler slot and per [`ActionKind`],
//! the decisions captured from a real battle. A [`Playback`] walks the log
//! with one private cursor per (slot, kind) and is the [`ActionSource`] the
//! recorded-opponent controller reads from.

mod log;
mod source;

use thiserror::Error;

pub use log::{ActionKind, RecordedActionLog, SlotRecord};
pub use source::{ActionSource, END_OF_RECORD, Playback};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Recorded log has {0} slots, at most {max} are supported", max = rewind_battle::MAX_BATTLERS)]
    TooManySlots(usize),

    #[error("Invalid recorded log: {0}")]
    InvalidLog(#[from] serde_json::Error),
}
