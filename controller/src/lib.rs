//! Recorded-opponent battle controller.
//!
//! A replayed battle runs the engine against controllers that answer its
//! commands from a recorded log instead of from a player or an AI. Each
//! opponent slot gets a [`RecordedOpponent`], and a [`Runner`] ticks them once
//! per frame in slot order.
//!
//! ```text
//! engine ──command──> BattleContext ──> RecordedOpponent ──> Presentation
//!    ^                                        │
//!    └───────────── response / flag ──────────┘ (or LinkSender in link battles)
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! use rewind_battle::{BattleContext, BattleKind, BattlerSlot};
//! use rewind_controller::Runner;
//! use rewind_protocol::Opcode;
//! use rewind_replay::{Playback, RecordedActionLog};
//!
//! let log = RecordedActionLog::load("battle.json")?;
//! let mut runner = Runner::new(BattleContext::new(BattleKind::single()), screen, Playback::new(log));
//!
//! runner.battle_mut().issue_command(BattlerSlot(1), &[Opcode::ChooseAction.as_u8()]);
//! runner.run_frame()?;
//! ```

pub mod bridge;
pub mod link;
pub mod observer;
pub mod recorded_opponent;

#[cfg(test)]
mod testing;

use anyhow::Result;
use rewind_battle::{BattleContext, BattlerSlot, Side};
use rewind_replay::ActionSource;
use thiserror::Error;
use tracing::debug;

pub use bridge::{Presentation, SpecialAnim};
pub use link::{LinkAgreement, LinkSender};
pub use observer::{NullObserver, Observer};
pub use recorded_opponent::{RecordedOpponent, Step};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("{0} is in a link battle but no link sender was provided")]
    LinkUnavailable(BattlerSlot),
}

/// In-process controller options
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Complete message commands without drawing text (test runs)
    pub headless: bool,

    /// This client's id in a link battle, stamped on completion tokens
    pub multiplayer_id: u8,
}

/// Everything a controller may touch during one tick
pub struct Tick<'a> {
    pub battle: &'a mut BattleContext,
    pub presentation: &'a mut dyn Presentation,
    pub actions: &'a mut dyn ActionSource,
    pub observer: &'a mut dyn Observer,
    pub link: Option<&'a LinkSender>,
    pub options: &'a ControllerOptions,
}

/// Owns the battle and ticks one controller per opponent slot
pub struct Runner<P, A, O = NullObserver> {
    battle: BattleContext,
    presentation: P,
    actions: A,
    observer: O,
    options: ControllerOptions,
    link: Option<LinkSender>,
    controllers: Vec<RecordedOpponent>,
    frame: u64,
}

impl<P, A> Runner<P, A>
where
    P: Presentation,
    A: ActionSource,
{
    pub fn new(battle: BattleContext, presentation: P, actions: A) -> Self {
        let controllers = BattlerSlot::all(battle.battler_count())
            .filter(|&slot| battle.position(slot).side() == Side::Opponent)
            .map(RecordedOpponent::new)
            .collect();

        Self {
            battle,
            presentation,
            actions,
            observer: NullObserver,
            options: ControllerOptions::default(),
            link: None,
            controllers,
            frame: 0,
        }
    }
}

impl<P, A, O> Runner<P, A, O>
where
    P: Presentation,
    A: ActionSource,
    O: Observer,
{
    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_link(mut self, link: LinkSender) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_observer<O2: Observer>(self, observer: O2) -> Runner<P, A, O2> {
        Runner {
            battle: self.battle,
            presentation: self.presentation,
            actions: self.actions,
            observer,
            options: self.options,
            link: self.link,
            controllers: self.controllers,
            frame: self.frame,
        }
    }

    /// Advance every controller by one tick, in slot order
    pub fn run_frame(&mut self) -> Result<()> {
        for controller in &mut self.controllers {
            let mut tick = Tick {
                battle: &mut self.battle,
                presentation: &mut self.presentation,
                actions: &mut self.actions,
                observer: &mut self.observer,
                link: self.link.as_ref(),
                options: &self.options,
            };
            controller.tick(&mut tick)?;
        }

        self.frame += 1;
        Ok(())
    }

    pub fn run_frames(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.run_frame()?;
        }
        Ok(())
    }

    /// End the battle: every controller drops its chain and waits for the fade
    pub fn force_end(&mut self) {
        debug!(frame = self.frame, "forcing battle end");
        for controller in &mut self.controllers {
            controller.force_end();
        }
    }

    pub fn controller(&self, slot: BattlerSlot) -> Option<&RecordedOpponent> {
        self.controllers.iter().find(|c| c.slot() == slot)
    }

    pub fn controllers(&self) -> &[RecordedOpponent] {
        &self.controllers
    }

    pub fn battle(&self) -> &BattleContext {
        &self.battle
    }

    pub fn battle_mut(&mut self) -> &mut BattleContext {
        &mut self.battle
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
