//! Pending-command flags

use super::slot::BattlerSlot;

/// One bit per slot; set while the slot has an outstanding command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecFlags(u8);

impl ExecFlags {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn is_set(&self, slot: BattlerSlot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn set(&mut self, slot: BattlerSlot) {
        self.0 |= slot.bit();
    }

    pub fn clear(&mut self, slot: BattlerSlot) {
        self.0 &= !slot.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}
