//! Controller-to-engine responses
//!
//! Responses are written to the slot's outbound buffer (or forwarded over the
//! link in networked battles). Each shape starts with the opcode the engine
//! uses to recognize it.

use serde::{Deserialize, Serialize};

use crate::command::Opcode;

/// Tag the engine expects on a move choice
pub const MOVE_CHOICE_TAG: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// An 8-bit tag plus a 16-bit value
    TwoReturnValues { tag: u8, value: u16 },

    /// A single 16-bit value
    OneReturnValue(u16),

    /// Party index to switch to, with the battle party order
    ChosenMon { party_index: u8, order: [u8; 3] },

    /// Arbitrary bytes (party data requested by the engine)
    ///
    /// Header is the opcode twice, then the LE u16 payload size.
    DataTransfer(Vec<u8>),
}

impl Response {
    /// Move choice response: slot in the low byte, target in the high byte
    pub fn move_choice(move_slot: u8, target: u8) -> Self {
        Response::TwoReturnValues {
            tag: MOVE_CHOICE_TAG,
            value: u16::from(move_slot) | (u16::from(target) << 8),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Response::TwoReturnValues { .. } => Opcode::TwoReturnValues,
            Response::OneReturnValue(_) => Opcode::OneReturnValue,
            Response::ChosenMon { .. } => Opcode::ChosenMonReturnValue,
            Response::DataTransfer(_) => Opcode::DataTransfer,
        }
    }

    /// Serialize to the buffer format the engine reads
    pub fn to_bytes(&self) -> Vec<u8> {
        let op = self.opcode().as_u8();
        match self {
            Response::TwoReturnValues { tag, value } => {
                let [lo, hi] = value.to_le_bytes();
                vec![op, *tag, lo, hi]
            }
            Response::OneReturnValue(value) => {
                let [lo, hi] = value.to_le_bytes();
                vec![op, lo, hi, 0]
            }
            Response::ChosenMon { party_index, order } => {
                vec![op, *party_index, order[0], order[1], order[2]]
            }
            Response::DataTransfer(data) => {
                let [lo, hi] = (data.len() as u16).to_le_bytes();
                let mut bytes = Vec::with_capacity(data.len() + 4);
                bytes.extend_from_slice(&[op, op, lo, hi]);
                bytes.extend_from_slice(data);
                bytes
            }
        }
    }
}
