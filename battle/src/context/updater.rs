//! Party data requests carried by get/set mon data commands

use super::battle::BattleContext;
use crate::types::{BattlerSlot, MonField, PARTY_SIZE};

impl BattleContext {
    /// Party indices a request applies to
    ///
    /// A zero selector means the slot's active member; otherwise each set bit
    /// selects one party index.
    pub fn selected_members(&self, slot: BattlerSlot, selector: u8) -> Vec<usize> {
        if selector == 0 {
            return vec![self.slot(slot).party_index as usize];
        }

        (0..PARTY_SIZE)
            .filter(|&i| selector & (1u8 << i) != 0)
            .collect()
    }

    /// Serialize the requested field of every selected member, in party order
    pub fn mon_data(&self, slot: BattlerSlot, request: u8, selector: u8) -> Vec<u8> {
        let Some(field) = MonField::from_request(request) else {
            return Vec::new();
        };

        self.selected_members(slot, selector)
            .into_iter()
            .filter_map(|i| self.party.get(i))
            .flat_map(|mon| mon.field_bytes(field))
            .collect()
    }

    /// Apply one field write to every selected member
    pub fn set_mon_data(&mut self, slot: BattlerSlot, request: u8, selector: u8, data: &[u8]) {
        let Some(field) = MonField::from_request(request) else {
            return;
        };

        for i in self.selected_members(slot, selector) {
            if let Some(mon) = self.party.get_mut(i) {
                mon.set_field(field, data);
            }
        }
    }

    /// Raw write into the active member's serialized form
    pub fn set_raw_mon_data(&mut self, slot: BattlerSlot, offset: u8, data: &[u8]) {
        if let Some(mon) = self.active_mon_mut(slot) {
            mon.write_raw(offset as usize, data);
        }
    }
}
