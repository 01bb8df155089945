//! Battle type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The battle-type bits a controller consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleKind {
    /// Two battlers per side
    pub double: bool,

    /// Each battler on a side belongs to a different trainer
    pub multi: bool,

    /// Networked; completion needs agreement from every client
    pub link: bool,

    /// Frontier facility battle (opponent pics come from the facility roster)
    pub frontier: bool,
}

impl BattleKind {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn double() -> Self {
        Self {
            double: true,
            ..Self::default()
        }
    }

    pub fn multi() -> Self {
        Self {
            double: true,
            multi: true,
            ..Self::default()
        }
    }

    pub fn with_link(mut self) -> Self {
        self.link = true;
        self
    }

    /// Doubles where one trainer owns both battlers on a side
    pub fn is_shared_double(&self) -> bool {
        self.double && !self.multi
    }

    pub fn battler_count(&self) -> u8 {
        if self.double { 4 } else { 2 }
    }
}
