//! Shared battle context for recorded-battle controllers.
//!
//! # Overview
//!
//! `rewind-battle` sits between `rewind-protocol` (wire format) and the
//! controllers that service the engine's commands:
//!
//! ```text
//! rewind-protocol (wire format)
//!        │
//!        ▼
//! rewind-battle (slots + shared context) ← THIS CRATE
//!        │
//!        ├─> rewind-replay (recorded action logs)
//!        └─> rewind-controller (per-slot state machines)
//! ```
//!
//! # Main Types
//!
//! - [`BattlerSlot`], [`Position`], [`Side`] - who stands where
//! - [`BattleKind`] - singles/doubles/multi/link
//! - [`ExecFlags`] - which slots have a pending command
//! - [`AnimationWaitState`] - intro and switch-in wait flags per slot
//! - [`PartyMon`] - the party data presentation needs
//! - [`BattleContext`] - all of the above, passed by reference to every component
//!
//! # Example Usage
//!
//! ```ignore
//! use rewind_battle::{BattleContext, BattleKind, BattlerSlot};
//! use rewind_protocol::Opcode;
//!
//! let mut battle = BattleContext::new(BattleKind::double());
//! battle.issue_command(BattlerSlot(1), &[Opcode::ChooseAction.as_u8()]);
//! assert!(battle.is_pending(BattlerSlot(1)));
//! ```

pub mod context;
pub mod types;

pub use context::{BattleContext, OpponentTrainers, SlotState};
pub use types::{
    AnimationWaitState, BattleKind, BattlerSlot, ExecFlags, Flank, MAX_BATTLERS, MonField,
    PARTY_MON_RAW_LEN, PARTY_SIZE, PartyMon, Position, Side, SpriteState,
};

pub use rewind_protocol::{CommandBuffer, Opcode};
