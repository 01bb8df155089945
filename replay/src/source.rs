//! Playback cursors over a recorded log

use rewind_battle::{BattlerSlot, MAX_BATTLERS};
use tracing::warn;

use crate::log::{ActionKind, RecordedActionLog};

/// Returned when a stream has no more recorded values
pub const END_OF_RECORD: u8 = 0xFF;

/// Source of replayed decisions
///
/// Each call consumes exactly one value from the (slot, kind) stream.
pub trait ActionSource {
    fn next(&mut self, slot: BattlerSlot, kind: ActionKind) -> u8;
}

/// Deterministic reader over a [`RecordedActionLog`]
#[derive(Debug, Clone)]
pub struct Playback {
    log: RecordedActionLog,
    cursors: [[usize; ActionKind::COUNT]; MAX_BATTLERS],
    exhausted: bool,
}

impl Playback {
    pub fn new(log: RecordedActionLog) -> Self {
        Self {
            log,
            cursors: [[0; ActionKind::COUNT]; MAX_BATTLERS],
            exhausted: false,
        }
    }

    pub fn log(&self) -> &RecordedActionLog {
        &self.log
    }

    /// Values already consumed from a stream
    pub fn position(&self, slot: BattlerSlot, kind: ActionKind) -> usize {
        self.cursors
            .get(slot.index())
            .map(|row| row[kind.index()])
            .unwrap_or(0)
    }

    pub fn remaining(&self, slot: BattlerSlot, kind: ActionKind) -> usize {
        self.log
            .stream(slot, kind)
            .len()
            .saturating_sub(self.position(slot, kind))
    }

    /// A read ran past the end of some stream
    ///
    /// The surrounding engine should end the replay once this is set.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl ActionSource for Playback {
    fn next(&mut self, slot: BattlerSlot, kind: ActionKind) -> u8 {
        let Some(row) = self.cursors.get_mut(slot.index()) else {
            warn!(%slot, ?kind, "recorded log read for a slot outside the battle");
            self.exhausted = true;
            return END_OF_RECORD;
        };

        let cursor = &mut row[kind.index()];
        match self.log.stream(slot, kind).get(*cursor) {
            Some(&value) => {
                *cursor += 1;
                value
            }
            None => {
                warn!(%slot, ?kind, read = *cursor, "recorded log exhausted");
                self.exhausted = true;
                END_OF_RECORD
            }
        }
    }
}
