//! Link (networked battle) frames
//!
//! In a link battle nothing is written to the local buffers directly. Each
//! transfer is wrapped in a frame and broadcast to every participant:
//!
//! ```text
//! [kind, slot, size lo, size hi, payload...]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ParseError;

pub const OUTCOME_WON: u8 = 1;
pub const OUTCOME_LOST: u8 = 2;
pub const OUTCOME_DREW: u8 = 3;

/// Size of the completion payload
pub const COMPLETION_PAYLOAD_LEN: usize = 4;

const HEADER_LEN: usize = 4;

/// Which buffer a link frame targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkTransferKind {
    /// Engine command for a slot
    Command,
    /// Controller response for a slot
    Response,
    /// A slot finished its command
    ControllerDone,
}

impl LinkTransferKind {
    pub fn as_u8(self) -> u8 {
        match self {
            LinkTransferKind::Command => 0,
            LinkTransferKind::Response => 1,
            LinkTransferKind::ControllerDone => 2,
        }
    }

    pub fn parse(value: u8) -> Option<Self> {
        match value {
            0 => Some(LinkTransferKind::Command),
            1 => Some(LinkTransferKind::Response),
            2 => Some(LinkTransferKind::ControllerDone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFrame {
    pub kind: LinkTransferKind,
    pub slot: u8,
    pub payload: Vec<u8>,
}

impl LinkFrame {
    /// Completion token for `slot`, stamped with the sender's multiplayer id
    pub fn controller_done(slot: u8, multiplayer_id: u8) -> Self {
        let mut payload = vec![0; COMPLETION_PAYLOAD_LEN];
        payload[0] = multiplayer_id;
        Self {
            kind: LinkTransferKind::ControllerDone,
            slot,
            payload,
        }
    }

    pub fn response(slot: u8, bytes: Vec<u8>) -> Self {
        Self {
            kind: LinkTransferKind::Response,
            slot,
            payload: bytes,
        }
    }

    /// Multiplayer id of a completion token
    pub fn sender_id(&self) -> Option<u8> {
        match self.kind {
            LinkTransferKind::ControllerDone => self.payload.first().copied(),
            _ => None,
        }
    }

    /// Serialize to wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let [lo, hi] = (self.payload.len() as u16).to_le_bytes();
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.payload.len());
        bytes.extend_from_slice(&[self.kind.as_u8(), self.slot, lo, hi]);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parse a frame received from a peer
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ParseError::EmptyBuffer.into());
        }
        if bytes.len() < HEADER_LEN {
            return Err(ParseError::InvalidFormat(format!(
                "link frame header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            ))
            .into());
        }

        let kind =
            LinkTransferKind::parse(bytes[0]).ok_or(ParseError::UnknownTransferKind(bytes[0]))?;
        let size = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
        let payload = bytes
            .get(HEADER_LEN..HEADER_LEN + size)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!("link frame payload truncated (want {})", size))
            })?
            .to_vec();

        Ok(LinkFrame {
            kind,
            slot: bytes[1],
            payload,
        })
    }
}

/// Encode a raw battle outcome for the end-of-link-battle handshake
///
/// A draw passes through unchanged; anything else is XORed with the draw
/// value, which swaps won/lost between the two perspectives.
pub fn encode_link_outcome(raw: u8, draw: u8) -> u8 {
    if raw == draw { raw } else { raw ^ draw }
}
