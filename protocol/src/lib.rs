use thiserror::Error;

pub mod command;
pub mod link;
pub mod response;

pub use command::{COMMAND_BUFFER_LEN, Command, CommandBuffer, Opcode, PartySummaryEntry};
pub use link::{
    LinkFrame, LinkTransferKind, OUTCOME_DREW, OUTCOME_LOST, OUTCOME_WON, encode_link_outcome,
};
pub use response::{MOVE_CHOICE_TAG, Response};

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Opcode {0} is outside the command table")]
    UnknownOpcode(u8),

    #[error("Unknown link transfer kind: {0}")]
    UnknownTransferKind(u8),

    #[error("Invalid frame format: {0}")]
    InvalidFormat(String),

    #[error("Empty buffer")]
    EmptyBuffer,
}
