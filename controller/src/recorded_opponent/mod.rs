//! The recorded-opponent controller
//!
//! One [`RecordedOpponent`] drives one battler slot. Each tick it either
//! dispatches the slot's pending command or advances the installed
//! continuation [`Step`].

mod chains;
mod handlers;
mod step;

pub use step::Step;

use anyhow::Result;
use rewind_battle::BattlerSlot;
use rewind_protocol::{LinkFrame, Opcode, Response};
use tracing::{debug, trace};

use crate::{ControllerError, Tick};

/// Controller that replays a recorded opponent's decisions
#[derive(Debug, Clone)]
pub struct RecordedOpponent {
    slot: BattlerSlot,
    step: Step,
}

impl RecordedOpponent {
    pub fn new(slot: BattlerSlot) -> Self {
        Self {
            slot,
            step: Step::RunCommand,
        }
    }

    pub fn slot(&self) -> BattlerSlot {
        self.slot
    }

    /// The currently installed continuation
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_idle(&self) -> bool {
        self.step.is_idle()
    }

    /// Abandon whatever chain is running and wait for the battle to close
    pub fn force_end(&mut self) {
        self.transition(Step::AwaitBattleEnd { notified: false });
    }

    /// Advance by one frame
    pub fn tick(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        match self.step {
            Step::RunCommand => self.run_command(tick),
            _ => self.resume(tick),
        }
    }

    fn run_command(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        if !tick.battle.is_pending(self.slot) {
            return Ok(());
        }

        // Copy out so handlers can write to the context while reading the payload
        let buffer = tick.battle.slot(self.slot).command.clone();
        match buffer.decode() {
            Ok(command) => {
                let opcode = command.opcode();
                debug!(slot = %self.slot, ?opcode, "dispatch");
                tick.observer.on_dispatch(self.slot, opcode);
                self.handle(command, tick)
            }
            Err(_) => self.complete(tick),
        }
    }

    fn transition(&mut self, next: Step) {
        trace!(slot = %self.slot, from = ?self.step, to = ?next, "step");
        self.step = next;
    }

    /// Mark the current command serviced
    ///
    /// Local battles clear the exec flag directly. Link battles broadcast a
    /// completion token and park the buffer on the terminator; the link layer
    /// clears the flag once every client agrees.
    fn complete(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        self.transition(Step::RunCommand);

        if tick.battle.kind.link {
            let link = tick
                .link
                .ok_or(ControllerError::LinkUnavailable(self.slot))?;
            link.send(LinkFrame::controller_done(
                self.slot.0,
                tick.options.multiplayer_id,
            ))?;
            tick.battle
                .slot_mut(self.slot)
                .command
                .set_opcode(Opcode::TerminatorNop);
        } else {
            tick.battle.exec_flags.clear(self.slot);
        }

        debug!(slot = %self.slot, link = tick.battle.kind.link, "command complete");
        Ok(())
    }

    /// Hand a response to the engine
    fn emit(&mut self, tick: &mut Tick<'_>, response: Response) -> Result<()> {
        let bytes = response.to_bytes();
        if tick.battle.kind.link {
            let link = tick
                .link
                .ok_or(ControllerError::LinkUnavailable(self.slot))?;
            link.send(LinkFrame::response(self.slot.0, bytes))
        } else {
            tick.battle.write_response(self.slot, bytes);
            Ok(())
        }
    }
}
