//! Engine-to-controller commands
//!
//! The engine writes one command per slot into a fixed-size buffer. Byte 0
//! is the [`Opcode`]; the payload layout depends on the opcode. Multi-byte
//! fields are little-endian.

mod opcode;

pub use opcode::Opcode;

use crate::ParseError;

/// Size of a per-slot command buffer
pub const COMMAND_BUFFER_LEN: usize = 512;

/// Entries in a party status summary
pub const PARTY_SUMMARY_LEN: usize = 6;

/// Per-slot command buffer owned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: [u8; COMMAND_BUFFER_LEN],
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; COMMAND_BUFFER_LEN],
        }
    }

    /// Build a buffer holding `bytes` at the front, zero padded
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.write(bytes);
        buffer
    }

    /// Overwrite the front of the buffer; the tail keeps its old contents
    pub fn write(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(COMMAND_BUFFER_LEN);
        self.bytes[..len].copy_from_slice(&bytes[..len]);
    }

    pub fn opcode_byte(&self) -> u8 {
        self.bytes[0]
    }

    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.bytes[0] = opcode.as_u8();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the command currently held in the buffer
    pub fn decode(&self) -> Result<Command<'_>, ParseError> {
        Command::decode(&self.bytes)
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// HP and status of one party member as sent with a party summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartySummaryEntry {
    pub hp: u16,
    pub status: u32,
}

/// A decoded command
///
/// Opcodes the controller only acknowledges decode to [`Command::Passive`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    GetMonData {
        request: u8,
        /// Bitmask of party indices; 0 selects the slot's active member
        selector: u8,
    },
    SetMonData {
        request: u8,
        selector: u8,
        data: &'a [u8],
    },
    SetRawMonData {
        offset: u8,
        data: &'a [u8],
    },
    LoadMonSprite,
    SwitchInAnim {
        party_index: u8,
        keep_substitute: bool,
    },
    ReturnMonToBall {
        instant: bool,
    },
    DrawTrainerPic,
    TrainerSlideBack,
    FaintAnimation,
    MoveAnimation {
        move_id: u16,
        turn: u8,
    },
    PrintString {
        string_id: u16,
    },
    ChooseAction,
    ChooseMove,
    OpenBag,
    ChoosePokemon,
    HealthBarUpdate {
        delta: i16,
    },
    StatusIconUpdate,
    StatusAnimation {
        secondary: bool,
        status: u32,
    },
    ClearScratchVar,
    SetScratchVar {
        value: u8,
    },
    ClearScratchFlag,
    ToggleScratchFlag,
    HitAnimation,
    PlaySe {
        song: u16,
    },
    PlayFanfareOrBgm {
        song: u16,
        as_bgm: bool,
    },
    FaintingCry,
    IntroSlide {
        terrain: u8,
    },
    IntroTrainerBallThrow,
    DrawPartyStatusSummary {
        skip_for_player: bool,
        switching: bool,
        party: [PartySummaryEntry; PARTY_SUMMARY_LEN],
    },
    HidePartyStatusSummary,
    SpriteInvisibility {
        invisible: bool,
    },
    BattleAnimation {
        anim_id: u8,
        argument: u16,
    },
    EndLinkBattle {
        outcome: u8,
    },
    TerminatorNop,
    Passive(Opcode),
}

impl<'a> Command<'a> {
    /// Decode a command from raw buffer bytes
    ///
    /// Only the opcode can be invalid. Payload bytes past the end of `buf`
    /// read as zero, matching a zero-initialized fixed buffer.
    pub fn decode(buf: &'a [u8]) -> Result<Self, ParseError> {
        let first = *buf.first().ok_or(ParseError::EmptyBuffer)?;
        let opcode = Opcode::try_from(first)?;

        if opcode.is_passive() {
            return Ok(Command::Passive(opcode));
        }

        let command = match opcode {
            Opcode::GetMonData => Command::GetMonData {
                request: byte(buf, 1),
                selector: byte(buf, 2),
            },
            Opcode::SetMonData => Command::SetMonData {
                request: byte(buf, 1),
                selector: byte(buf, 2),
                data: tail(buf, 3),
            },
            Opcode::SetRawMonData => {
                let size = byte(buf, 2) as usize;
                let data = tail(buf, 3);
                Command::SetRawMonData {
                    offset: byte(buf, 1),
                    data: &data[..size.min(data.len())],
                }
            }
            Opcode::LoadMonSprite => Command::LoadMonSprite,
            Opcode::SwitchInAnim => Command::SwitchInAnim {
                party_index: byte(buf, 1),
                keep_substitute: byte(buf, 2) != 0,
            },
            Opcode::ReturnMonToBall => Command::ReturnMonToBall {
                instant: byte(buf, 1) != 0,
            },
            Opcode::DrawTrainerPic => Command::DrawTrainerPic,
            Opcode::TrainerSlideBack => Command::TrainerSlideBack,
            Opcode::FaintAnimation => Command::FaintAnimation,
            Opcode::MoveAnimation => Command::MoveAnimation {
                move_id: le_u16(buf, 1),
                turn: byte(buf, 3),
            },
            Opcode::PrintString => Command::PrintString {
                string_id: le_u16(buf, 2),
            },
            Opcode::ChooseAction => Command::ChooseAction,
            Opcode::ChooseMove => Command::ChooseMove,
            Opcode::OpenBag => Command::OpenBag,
            Opcode::ChoosePokemon => Command::ChoosePokemon,
            Opcode::HealthBarUpdate => Command::HealthBarUpdate {
                delta: le_u16(buf, 2) as i16,
            },
            Opcode::StatusIconUpdate => Command::StatusIconUpdate,
            Opcode::StatusAnimation => Command::StatusAnimation {
                secondary: byte(buf, 1) != 0,
                status: le_u32(buf, 2),
            },
            Opcode::ClearScratchVar => Command::ClearScratchVar,
            Opcode::SetScratchVar => Command::SetScratchVar {
                value: byte(buf, 1),
            },
            Opcode::ClearScratchFlag => Command::ClearScratchFlag,
            Opcode::ToggleScratchFlag => Command::ToggleScratchFlag,
            Opcode::HitAnimation => Command::HitAnimation,
            Opcode::PlaySe => Command::PlaySe {
                song: le_u16(buf, 1),
            },
            Opcode::PlayFanfareOrBgm => Command::PlayFanfareOrBgm {
                song: le_u16(buf, 1),
                as_bgm: byte(buf, 3) != 0,
            },
            Opcode::FaintingCry => Command::FaintingCry,
            Opcode::IntroSlide => Command::IntroSlide {
                terrain: byte(buf, 1),
            },
            Opcode::IntroTrainerBallThrow => Command::IntroTrainerBallThrow,
            Opcode::DrawPartyStatusSummary => {
                let mut party = [PartySummaryEntry::default(); PARTY_SUMMARY_LEN];
                for (i, entry) in party.iter_mut().enumerate() {
                    // 2 bytes hp + 4 bytes status per entry, starting at byte 4
                    let at = 4 + i * 6;
                    entry.hp = le_u16(buf, at);
                    entry.status = le_u32(buf, at + 2);
                }
                Command::DrawPartyStatusSummary {
                    skip_for_player: byte(buf, 1) != 0,
                    switching: byte(buf, 2) != 0,
                    party,
                }
            }
            Opcode::HidePartyStatusSummary => Command::HidePartyStatusSummary,
            Opcode::SpriteInvisibility => Command::SpriteInvisibility {
                invisible: byte(buf, 1) != 0,
            },
            Opcode::BattleAnimation => Command::BattleAnimation {
                anim_id: byte(buf, 1),
                argument: le_u16(buf, 2),
            },
            Opcode::EndLinkBattle => Command::EndLinkBattle {
                outcome: byte(buf, 1),
            },
            Opcode::TerminatorNop => Command::TerminatorNop,
            other => Command::Passive(other),
        };

        Ok(command)
    }

    /// The opcode this command was decoded from
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::GetMonData { .. } => Opcode::GetMonData,
            Command::SetMonData { .. } => Opcode::SetMonData,
            Command::SetRawMonData { .. } => Opcode::SetRawMonData,
            Command::LoadMonSprite => Opcode::LoadMonSprite,
            Command::SwitchInAnim { .. } => Opcode::SwitchInAnim,
            Command::ReturnMonToBall { .. } => Opcode::ReturnMonToBall,
            Command::DrawTrainerPic => Opcode::DrawTrainerPic,
            Command::TrainerSlideBack => Opcode::TrainerSlideBack,
            Command::FaintAnimation => Opcode::FaintAnimation,
            Command::MoveAnimation { .. } => Opcode::MoveAnimation,
            Command::PrintString { .. } => Opcode::PrintString,
            Command::ChooseAction => Opcode::ChooseAction,
            Command::ChooseMove => Opcode::ChooseMove,
            Command::OpenBag => Opcode::OpenBag,
            Command::ChoosePokemon => Opcode::ChoosePokemon,
            Command::HealthBarUpdate { .. } => Opcode::HealthBarUpdate,
            Command::StatusIconUpdate => Opcode::StatusIconUpdate,
            Command::StatusAnimation { .. } => Opcode::StatusAnimation,
            Command::ClearScratchVar => Opcode::ClearScratchVar,
            Command::SetScratchVar { .. } => Opcode::SetScratchVar,
            Command::ClearScratchFlag => Opcode::ClearScratchFlag,
            Command::ToggleScratchFlag => Opcode::ToggleScratchFlag,
            Command::HitAnimation => Opcode::HitAnimation,
            Command::PlaySe { .. } => Opcode::PlaySe,
            Command::PlayFanfareOrBgm { .. } => Opcode::PlayFanfareOrBgm,
            Command::FaintingCry => Opcode::FaintingCry,
            Command::IntroSlide { .. } => Opcode::IntroSlide,
            Command::IntroTrainerBallThrow => Opcode::IntroTrainerBallThrow,
            Command::DrawPartyStatusSummary { .. } => Opcode::DrawPartyStatusSummary,
            Command::HidePartyStatusSummary => Opcode::HidePartyStatusSummary,
            Command::SpriteInvisibility { .. } => Opcode::SpriteInvisibility,
            Command::BattleAnimation { .. } => Opcode::BattleAnimation,
            Command::EndLinkBattle { .. } => Opcode::EndLinkBattle,
            Command::TerminatorNop => Opcode::TerminatorNop,
            Command::Passive(op) => *op,
        }
    }
}

fn byte(buf: &[u8], at: usize) -> u8 {
    buf.get(at).copied().unwrap_or(0)
}

fn tail(buf: &[u8], from: usize) -> &[u8] {
    buf.get(from..).unwrap_or(&[])
}

fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([byte(buf, at), byte(buf, at + 1)])
}

fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([
        byte(buf, at),
        byte(buf, at + 1),
        byte(buf, at + 2),
        byte(buf, at + 3),
    ])
}
