//! Domain types for the shared battle context

mod flags;
mod kind;
mod mon;
mod slot;
mod wait;

pub use flags::ExecFlags;
pub use kind::BattleKind;
pub use mon::{MonField, PARTY_MON_RAW_LEN, PARTY_SIZE, PartyMon};
pub use slot::{BattlerSlot, Flank, MAX_BATTLERS, Position, Side};
pub use wait::{AnimationWaitState, SpriteState};
