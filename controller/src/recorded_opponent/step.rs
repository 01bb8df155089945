//! Continuation steps
//!
//! Exactly one step is installed per slot. `RunCommand` is the idle state;
//! every other step belongs to one command's chain and eventually leads back
//! to `RunCommand` through completion (or parks in `AwaitBattleEnd`).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Waiting for the engine to flag a new command
    #[default]
    RunCommand,

    // === Single waits ===
    /// Battler sprite callback back to idle
    WaitForBattlerSprite,
    /// Trainer slid away; free it once idle
    FreeTrainerAfterSlide,
    WaitForMessage,
    WaitForHealthBar,
    WaitForStatusAnimation,
    WaitForBattleAnimation,
    /// Party summary on screen; counts ticks
    PartyStatusSummaryDelay,
    /// Hit blink, `elapsed` ticks in
    HitBlink { elapsed: u8 },

    // === Move animation ===
    MoveAnimUnmask { move_id: u16, turn: u8 },
    MoveAnimRun,
    MoveAnimRemask,

    // === Recall / faint ===
    SwitchOutUnmask,
    SwitchOutFreeSprite,
    FaintUnmask,
    FaintHideHealthbox,

    // === Sprite load ===
    LoadTryShiny,

    // === Switch-in chain ===
    SwitchInTryShiny,
    SwitchInShowHealthbox,
    SwitchInShowSubstitute,
    SwitchInSoundAndEnd,

    // === Intro chain ===
    IntroSendOutDelay { remaining: u8 },
    IntroTryShinyShowHealthbox,
    IntroWaitForShinyAndHealthbox,
    IntroDelayAndEnd,

    /// Terminal: battle is over, hand control back once the screen has faded
    AwaitBattleEnd { notified: bool },
}

impl Step {
    pub fn is_idle(&self) -> bool {
        matches!(self, Step::RunCommand)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::AwaitBattleEnd { .. })
    }
}
