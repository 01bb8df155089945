//! Party member data
//!
//! Just enough of a party member for presentation and the engine's
//! get/set data requests. Everything else belongs to the rule simulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of a party member's raw serialized form
pub const PARTY_MON_RAW_LEN: usize = 12;

/// Party size
pub const PARTY_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyMon {
    pub species: u16,
    pub hp: u16,
    pub max_hp: u16,
    /// Primary status word (sleep turns, poison, burn, ...)
    pub status: u32,
    pub level: u8,
    pub shiny: bool,
}

/// Field selector carried by get/set mon data commands
///
/// This is a reduced request table covering only the fields [`PartyMon`]
/// keeps. The ids are local to this crate and are not the engine's full
/// request numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonField {
    All,
    Species,
    Hp,
    MaxHp,
    Status,
    Level,
    Shiny,
}

impl MonField {
    pub fn from_request(request: u8) -> Option<Self> {
        match request {
            0 => Some(MonField::All),
            1 => Some(MonField::Species),
            2 => Some(MonField::Hp),
            3 => Some(MonField::MaxHp),
            4 => Some(MonField::Status),
            5 => Some(MonField::Level),
            6 => Some(MonField::Shiny),
            _ => None,
        }
    }
}

impl PartyMon {
    pub fn new(species: u16, level: u8, max_hp: u16) -> Self {
        Self {
            species,
            hp: max_hp,
            max_hp,
            status: 0,
            level,
            shiny: false,
        }
    }

    /// Raw layout: species, hp, max hp (LE u16), status (LE u32), level, shiny
    pub fn to_raw(&self) -> [u8; PARTY_MON_RAW_LEN] {
        let mut raw = [0u8; PARTY_MON_RAW_LEN];
        raw[0..2].copy_from_slice(&self.species.to_le_bytes());
        raw[2..4].copy_from_slice(&self.hp.to_le_bytes());
        raw[4..6].copy_from_slice(&self.max_hp.to_le_bytes());
        raw[6..10].copy_from_slice(&self.status.to_le_bytes());
        raw[10] = self.level;
        raw[11] = self.shiny as u8;
        raw
    }

    pub fn from_raw(raw: &[u8; PARTY_MON_RAW_LEN]) -> Self {
        Self {
            species: u16::from_le_bytes([raw[0], raw[1]]),
            hp: u16::from_le_bytes([raw[2], raw[3]]),
            max_hp: u16::from_le_bytes([raw[4], raw[5]]),
            status: u32::from_le_bytes([raw[6], raw[7], raw[8], raw[9]]),
            level: raw[10],
            shiny: raw[11] != 0,
        }
    }

    /// Bytes for one field, in the same encoding as the raw layout
    pub fn field_bytes(&self, field: MonField) -> Vec<u8> {
        match field {
            MonField::All => self.to_raw().to_vec(),
            MonField::Species => self.species.to_le_bytes().to_vec(),
            MonField::Hp => self.hp.to_le_bytes().to_vec(),
            MonField::MaxHp => self.max_hp.to_le_bytes().to_vec(),
            MonField::Status => self.status.to_le_bytes().to_vec(),
            MonField::Level => vec![self.level],
            MonField::Shiny => vec![self.shiny as u8],
        }
    }

    /// Overwrite one field from `data`; short data leaves the field untouched
    pub fn set_field(&mut self, field: MonField, data: &[u8]) {
        match field {
            MonField::All => {
                if let Some(raw) = data.get(..PARTY_MON_RAW_LEN) {
                    let mut bytes = [0u8; PARTY_MON_RAW_LEN];
                    bytes.copy_from_slice(raw);
                    *self = PartyMon::from_raw(&bytes);
                }
            }
            MonField::Species => {
                if let Some(v) = read_u16(data) {
                    self.species = v;
                }
            }
            MonField::Hp => {
                if let Some(v) = read_u16(data) {
                    self.hp = v;
                }
            }
            MonField::MaxHp => {
                if let Some(v) = read_u16(data) {
                    self.max_hp = v;
                }
            }
            MonField::Status => {
                if let Some(bytes) = data.get(..4) {
                    self.status = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                }
            }
            MonField::Level => {
                if let Some(&v) = data.first() {
                    self.level = v;
                }
            }
            MonField::Shiny => {
                if let Some(&v) = data.first() {
                    self.shiny = v != 0;
                }
            }
        }
    }

    /// Overwrite raw bytes starting at `offset`; bytes past the layout are dropped
    pub fn write_raw(&mut self, offset: usize, data: &[u8]) {
        let mut raw = self.to_raw();
        for (i, byte) in data.iter().enumerate() {
            if let Some(slot) = raw.get_mut(offset + i) {
                *slot = *byte;
            }
        }
        *self = PartyMon::from_raw(&raw);
    }
}

fn read_u16(data: &[u8]) -> Option<u16> {
    let bytes = data.get(..2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}
