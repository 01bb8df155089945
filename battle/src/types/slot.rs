//! Battler slots and field positions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of battler slots (multi battles)
pub const MAX_BATTLERS: usize = 4;

const BIT_SIDE: u8 = 1;
const BIT_FLANK: u8 = 2;

/// A combatant slot, 0..N-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattlerSlot(pub u8);

impl BattlerSlot {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn bit(self) -> u8 {
        1 << self.0
    }

    /// The slot on the same side, other flank
    ///
    /// Only meaningful in double battles; in singles it names an empty slot.
    pub fn partner(self) -> Self {
        Self(self.0 ^ BIT_FLANK)
    }

    /// Every slot in tick order for a battle with `count` battlers
    pub fn all(count: u8) -> impl Iterator<Item = BattlerSlot> {
        (0..count).map(BattlerSlot)
    }
}

impl std::fmt::Display for BattlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "battler {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Flank {
    Left,
    Right,
}

/// Where a battler stands on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Position {
    PlayerLeft,
    OpponentLeft,
    PlayerRight,
    OpponentRight,
}

impl Position {
    pub fn from_bits(bits: u8) -> Self {
        match bits & (BIT_SIDE | BIT_FLANK) {
            0 => Position::PlayerLeft,
            1 => Position::OpponentLeft,
            2 => Position::PlayerRight,
            _ => Position::OpponentRight,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Position::PlayerLeft => 0,
            Position::OpponentLeft => 1,
            Position::PlayerRight => 2,
            Position::OpponentRight => 3,
        }
    }

    pub fn side(self) -> Side {
        if self.bits() & BIT_SIDE == 0 {
            Side::Player
        } else {
            Side::Opponent
        }
    }

    pub fn flank(self) -> Flank {
        if self.bits() & BIT_FLANK == 0 {
            Flank::Left
        } else {
            Flank::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner() {
        assert_eq!(BattlerSlot(0).partner(), BattlerSlot(2));
        assert_eq!(BattlerSlot(1).partner(), BattlerSlot(3));
        assert_eq!(BattlerSlot(3).partner(), BattlerSlot(1));
    }

    #[test]
    fn test_position_side_and_flank() {
        assert_eq!(Position::OpponentLeft.side(), Side::Opponent);
        assert_eq!(Position::OpponentLeft.flank(), Flank::Left);
        assert_eq!(Position::PlayerRight.side(), Side::Player);
        assert_eq!(Position::PlayerRight.flank(), Flank::Right);
        assert_eq!(Position::from_bits(3), Position::OpponentRight);
    }

    #[test]
    fn test_all_slots_in_order() {
        let slots: Vec<_> = BattlerSlot::all(4).collect();
        assert_eq!(
            slots,
            vec![BattlerSlot(0), BattlerSlot(1), BattlerSlot(2), BattlerSlot(3)]
        );
    }
}
