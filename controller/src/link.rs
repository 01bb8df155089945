//! Link battle plumbing
//!
//! The transport itself is external. Controllers hand frames to a
//! [`LinkSender`]; whatever owns the receiving end broadcasts them. Exec flags
//! for a slot are only cleared once every participant has reported the slot
//! done, which is what [`LinkAgreement`] tracks.

use anyhow::{Result, anyhow};
use rewind_battle::{BattleContext, BattlerSlot, MAX_BATTLERS};
use rewind_protocol::{LinkFrame, LinkTransferKind};
use tokio::sync::mpsc;
use tracing::debug;

/// Cloneable handle for sending frames to link peers.
#[derive(Clone)]
pub struct LinkSender {
    outgoing: mpsc::UnboundedSender<LinkFrame>,
}

impl LinkSender {
    pub fn new(outgoing: mpsc::UnboundedSender<LinkFrame>) -> Self {
        Self { outgoing }
    }

    /// Create a sender together with the receiving end for the transport
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LinkFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Queue a frame; never blocks
    pub fn send(&self, frame: LinkFrame) -> Result<()> {
        self.outgoing
            .send(frame)
            .map_err(|_| anyhow!("Link closed"))
    }
}

/// Most participants one acknowledgement byte can track
pub const MAX_PARTICIPANTS: u8 = 8;

/// Collects completion tokens until every participant agrees a slot is done
#[derive(Debug, Clone)]
pub struct LinkAgreement {
    participants: u8,
    acks: [u8; MAX_BATTLERS],
}

impl LinkAgreement {
    /// `participants` is capped at [`MAX_PARTICIPANTS`]
    pub fn new(participants: u8) -> Self {
        Self {
            participants: participants.min(MAX_PARTICIPANTS),
            acks: [0; MAX_BATTLERS],
        }
    }

    /// Feed one received frame
    ///
    /// Returns true when this frame completed agreement for its slot, in
    /// which case the slot's exec flag has been cleared.
    pub fn receive(&mut self, frame: &LinkFrame, battle: &mut BattleContext) -> bool {
        if frame.kind != LinkTransferKind::ControllerDone {
            return false;
        }
        let Some(sender) = frame.sender_id() else {
            return false;
        };
        let Some(acks) = self.acks.get_mut(frame.slot as usize) else {
            return false;
        };
        if sender >= self.participants {
            return false;
        }

        *acks |= 1 << sender;
        let everyone = ((1u16 << self.participants) - 1) as u8;
        if *acks & everyone != everyone {
            return false;
        }

        *acks = 0;
        let slot = BattlerSlot(frame.slot);
        battle.exec_flags.clear(slot);
        debug!(%slot, "link peers agree command is done");
        true
    }

    /// Participants that have acknowledged `slot` so far (bitmask by multiplayer id)
    pub fn pending_acks(&self, slot: BattlerSlot) -> u8 {
        self.acks.get(slot.index()).copied().unwrap_or(0)
    }
}
