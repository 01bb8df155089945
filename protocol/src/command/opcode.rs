//! Controller opcodes
//!
//! Byte 0 of every command buffer. The numbering is fixed by the engine and
//! must not be reordered.

use serde::{Deserialize, Serialize};

use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    GetMonData = 0,
    GetRawMonData,
    SetMonData,
    SetRawMonData,
    LoadMonSprite,
    SwitchInAnim,
    ReturnMonToBall,
    DrawTrainerPic,
    TrainerSlide,
    TrainerSlideBack,
    FaintAnimation,
    PaletteFade,
    SuccessBallThrowAnim,
    BallThrowAnim,
    Pause,
    MoveAnimation,
    PrintString,
    PrintStringPlayerOnly,
    ChooseAction,
    YesNoBox,
    ChooseMove,
    OpenBag,
    ChoosePokemon,
    Unused23,
    HealthBarUpdate,
    ExpUpdate,
    StatusIconUpdate,
    StatusAnimation,
    StatusXor,
    DataTransfer,
    Dma3Transfer,
    PlayBgm,
    Unused32,
    TwoReturnValues,
    ChosenMonReturnValue,
    OneReturnValue,
    OneReturnValueDuplicate,
    ClearScratchVar,
    SetScratchVar,
    ClearScratchFlag,
    ToggleScratchFlag,
    HitAnimation,
    CantSwitch,
    PlaySe,
    PlayFanfareOrBgm,
    FaintingCry,
    IntroSlide,
    IntroTrainerBallThrow,
    DrawPartyStatusSummary,
    HidePartyStatusSummary,
    EndBounce,
    SpriteInvisibility,
    BattleAnimation,
    LinkStandbyMsg,
    ResetActionMoveSelection,
    EndLinkBattle,
    DebugMenu,
    TerminatorNop,
}

impl Opcode {
    /// Number of entries in the command table
    pub const COUNT: usize = 58;

    /// Every opcode in table order
    pub const ALL: [Opcode; Opcode::COUNT] = [
        Opcode::GetMonData,
        Opcode::GetRawMonData,
        Opcode::SetMonData,
        Opcode::SetRawMonData,
        Opcode::LoadMonSprite,
        Opcode::SwitchInAnim,
        Opcode::ReturnMonToBall,
        Opcode::DrawTrainerPic,
        Opcode::TrainerSlide,
        Opcode::TrainerSlideBack,
        Opcode::FaintAnimation,
        Opcode::PaletteFade,
        Opcode::SuccessBallThrowAnim,
        Opcode::BallThrowAnim,
        Opcode::Pause,
        Opcode::MoveAnimation,
        Opcode::PrintString,
        Opcode::PrintStringPlayerOnly,
        Opcode::ChooseAction,
        Opcode::YesNoBox,
        Opcode::ChooseMove,
        Opcode::OpenBag,
        Opcode::ChoosePokemon,
        Opcode::Unused23,
        Opcode::HealthBarUpdate,
        Opcode::ExpUpdate,
        Opcode::StatusIconUpdate,
        Opcode::StatusAnimation,
        Opcode::StatusXor,
        Opcode::DataTransfer,
        Opcode::Dma3Transfer,
        Opcode::PlayBgm,
        Opcode::Unused32,
        Opcode::TwoReturnValues,
        Opcode::ChosenMonReturnValue,
        Opcode::OneReturnValue,
        Opcode::OneReturnValueDuplicate,
        Opcode::ClearScratchVar,
        Opcode::SetScratchVar,
        Opcode::ClearScratchFlag,
        Opcode::ToggleScratchFlag,
        Opcode::HitAnimation,
        Opcode::CantSwitch,
        Opcode::PlaySe,
        Opcode::PlayFanfareOrBgm,
        Opcode::FaintingCry,
        Opcode::IntroSlide,
        Opcode::IntroTrainerBallThrow,
        Opcode::DrawPartyStatusSummary,
        Opcode::HidePartyStatusSummary,
        Opcode::EndBounce,
        Opcode::SpriteInvisibility,
        Opcode::BattleAnimation,
        Opcode::LinkStandbyMsg,
        Opcode::ResetActionMoveSelection,
        Opcode::EndLinkBattle,
        Opcode::DebugMenu,
        Opcode::TerminatorNop,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Opcodes the recorded opponent acknowledges without doing anything
    pub fn is_passive(self) -> bool {
        matches!(
            self,
            Opcode::GetRawMonData
                | Opcode::TrainerSlide
                | Opcode::PaletteFade
                | Opcode::SuccessBallThrowAnim
                | Opcode::BallThrowAnim
                | Opcode::Pause
                | Opcode::PrintStringPlayerOnly
                | Opcode::YesNoBox
                | Opcode::Unused23
                | Opcode::ExpUpdate
                | Opcode::StatusXor
                | Opcode::DataTransfer
                | Opcode::Dma3Transfer
                | Opcode::PlayBgm
                | Opcode::Unused32
                | Opcode::TwoReturnValues
                | Opcode::ChosenMonReturnValue
                | Opcode::OneReturnValue
                | Opcode::OneReturnValueDuplicate
                | Opcode::CantSwitch
                | Opcode::EndBounce
                | Opcode::LinkStandbyMsg
                | Opcode::ResetActionMoveSelection
                | Opcode::DebugMenu
        )
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .get(value as usize)
            .copied()
            .ok_or(ParseError::UnknownOpcode(value))
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}
