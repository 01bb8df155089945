//! RecordedActionLog - captured decisions, per slot and per decision type

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rewind_battle::{BattlerSlot, MAX_BATTLERS};
use serde::{Deserialize, Serialize};

use crate::ReplayError;

/// Decision types the engine asks a recorded opponent for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Fight / bag / switch / run
    Action,
    MoveSlot,
    MoveTarget,
    ItemId,
    ItemTarget,
    /// Move an item is used on (PP restoring items)
    ItemMove,
    PartyIndex,
}

impl ActionKind {
    pub const COUNT: usize = 7;

    pub const ALL: [ActionKind; ActionKind::COUNT] = [
        ActionKind::Action,
        ActionKind::MoveSlot,
        ActionKind::MoveTarget,
        ActionKind::ItemId,
        ActionKind::ItemTarget,
        ActionKind::ItemMove,
        ActionKind::PartyIndex,
    ];

    pub fn index(self) -> usize {
        match self {
            ActionKind::Action => 0,
            ActionKind::MoveSlot => 1,
            ActionKind::MoveTarget => 2,
            ActionKind::ItemId => 3,
            ActionKind::ItemTarget => 4,
            ActionKind::ItemMove => 5,
            ActionKind::PartyIndex => 6,
        }
    }
}

/// Everything recorded for one slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotRecord {
    #[serde(default)]
    pub streams: BTreeMap<ActionKind, Vec<u8>>,
}

impl SlotRecord {
    pub fn stream(&self, kind: ActionKind) -> &[u8] {
        self.streams.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A complete recording, loadable from JSON
///
/// ```json
/// { "slots": [ {}, { "streams": { "move_slot": [0, 2], "move_target": [1, 1] } } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedActionLog {
    slots: Vec<SlotRecord>,
}

impl RecordedActionLog {
    pub fn new() -> Self {
        Self {
            slots: vec![SlotRecord::default(); MAX_BATTLERS],
        }
    }

    /// Append a decision to a slot's stream for `kind`
    pub fn record(&mut self, slot: BattlerSlot, kind: ActionKind, value: u8) {
        if self.slots.len() <= slot.index() {
            self.slots.resize(slot.index() + 1, SlotRecord::default());
        }
        self.slots[slot.index()]
            .streams
            .entry(kind)
            .or_default()
            .push(value);
    }

    /// Builder form of [`record`](Self::record) for many values
    pub fn with(mut self, slot: BattlerSlot, kind: ActionKind, values: &[u8]) -> Self {
        for &value in values {
            self.record(slot, kind, value);
        }
        self
    }

    /// The recorded values for one slot and kind
    pub fn stream(&self, slot: BattlerSlot, kind: ActionKind) -> &[u8] {
        self.slots
            .get(slot.index())
            .map(|record| record.stream(kind))
            .unwrap_or(&[])
    }

    /// Total number of recorded decisions
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|record| record.streams.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut log: RecordedActionLog = serde_json::from_str(json).map_err(ReplayError::from)?;
        if log.slots.len() > MAX_BATTLERS {
            return Err(ReplayError::TooManySlots(log.slots.len()).into());
        }
        log.slots.resize(MAX_BATTLERS, SlotRecord::default());
        Ok(log)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a recording saved with [`save`](Self::save)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading recorded log {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing recorded log {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing recorded log {}", path.display()))
    }
}

impl Default for RecordedActionLog {
    fn default() -> Self {
        Self::new()
    }
}
