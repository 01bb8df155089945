//! Per-slot presentation wait state
//!
//! These fields are shared between the controller and the presentation
//! runtime. The runtime raises `finished_shiny_anim` and `wait_for_cry`, and lowers
//! `ball_anim_active`, `special_anim_active` and `status_anim_active`, as its
//! animations progress. The controller reads them and clears the ones it set.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Health box / intro bookkeeping for one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationWaitState {
    /// The shiny check ran for the current sequence
    pub tried_shiny_anim: bool,

    /// The shiny sparkle (or the decision to skip it) is done
    pub finished_shiny_anim: bool,

    /// A capture-ball throw/open animation is in flight
    pub ball_anim_active: bool,

    /// Health box slide-in was started for the intro
    pub healthbox_slide_in_started: bool,

    /// Background music was restored for the intro
    pub bgm_restored: bool,

    /// A cry for this slot has been queued and not yet started
    pub wait_for_cry: bool,

    /// A special animation (decoy reveal, etc.) is in flight
    pub special_anim_active: bool,

    /// A status condition animation is in flight
    pub status_anim_active: bool,

    /// Ticks counted while the party status summary is on screen
    pub party_status_delay: u8,

    /// Remaining ticks of the intro end delay
    pub intro_end_delay: u8,
}

impl AnimationWaitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the shiny check for this sequence
    pub fn reset_shiny(&mut self) {
        self.tried_shiny_anim = false;
        self.finished_shiny_anim = false;
    }

    /// Whether any flag from a previous sequence is still raised
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// Sprite attributes the controller tracks per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpriteState {
    /// The battler is hidden behind a decoy (substitute)
    pub behind_substitute: bool,

    /// The battler sprite is invisible (semi-invulnerable turn, etc.)
    pub invisible: bool,

    /// The party status summary is drawn for this slot
    pub party_summary_shown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_shiny() {
        let mut wait = AnimationWaitState {
            tried_shiny_anim: true,
            finished_shiny_anim: true,
            ..AnimationWaitState::new()
        };
        assert!(!wait.is_clear());

        wait.reset_shiny();
        assert!(wait.is_clear());
    }
}
