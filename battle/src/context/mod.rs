//! The shared battle context every controller reads and writes

mod battle;
mod updater;

pub use battle::{BattleContext, OpponentTrainers, SlotState};
