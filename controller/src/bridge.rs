//! Presentation bridge
//!
//! The sprite, animation, sound and text runtimes live outside this crate.
//! [`Presentation`] is the narrow surface the controller drives them through:
//! fire-and-forget requests (default no-ops) plus the completion predicates
//! the wait steps poll once per tick.
//!
//! The free functions at the bottom are the glue that touches both the
//! runtime and the shared [`AnimationWaitState`] flags in one step.
//!
//! [`AnimationWaitState`]: rewind_battle::AnimationWaitState

use rewind_battle::{BattleContext, BattlerSlot, PartyMon, Side};
use rewind_protocol::PartySummaryEntry;

/// Special (non-move) animations the controller launches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialAnim {
    /// Decoy dissolves, revealing the battler
    SubstituteToMon,
    /// Battler hides behind its decoy again
    MonToSubstitute,
    /// Opponent battler is recalled into its ball
    SwitchOutOpponentMon,
}

/// The external presentation runtime, as seen by a controller
pub trait Presentation {
    // === Sprite predicates ===

    /// Battler sprite has no animation callback running
    fn battler_sprite_idle(&self, slot: BattlerSlot) -> bool;

    /// Battler sprite parked in its alternate idle callback
    fn battler_sprite_settled(&self, slot: BattlerSlot) -> bool;

    /// Battler sprite has no horizontal offset left from its slide-in
    fn battler_sprite_at_rest(&self, slot: BattlerSlot) -> bool;

    /// Battler sprite's frame animation reached its last frame
    fn battler_anim_ended(&self, slot: BattlerSlot) -> bool;

    /// A battler sprite exists and is on screen
    fn battler_sprite_visible(&self, slot: BattlerSlot) -> bool;

    fn healthbox_idle(&self, slot: BattlerSlot) -> bool;

    /// The send-out ball (or trainer) sprite held for this slot is idle
    fn placeholder_sprite_idle(&self, slot: BattlerSlot) -> bool;

    // === Audio / text / animation predicates ===

    /// A cry is still playing. Finished cry songs are cleared as a side effect.
    fn cry_playing(&mut self) -> bool;

    fn battle_se_playing(&self, slot: BattlerSlot) -> bool;

    fn text_printer_active(&self) -> bool;

    fn palette_fade_active(&self) -> bool;

    fn move_anim_active(&self) -> bool;

    fn battle_anim_active(&self, slot: BattlerSlot) -> bool;

    /// Whether `move_id` has an animation for this turn
    fn move_has_animation(&self, move_id: u16, turn: u8) -> bool;

    /// Advance the health bar one frame: `Some(hp)` while moving, `None` once done
    fn advance_health_bar(&mut self, slot: BattlerSlot) -> Option<i16>;

    /// Size class (0..8) of a trainer front pic, used for its y offset
    fn trainer_pic_size(&self, pic: u16) -> u8;

    // === Battler sprites ===

    fn load_mon_sprite(&mut self, slot: BattlerSlot, mon: &PartyMon) {
        let _ = (slot, mon);
    }

    /// Create the ball sprite and hidden battler sprite for a send-out
    fn start_send_out(&mut self, slot: BattlerSlot, mon: &PartyMon) {
        let _ = (slot, mon);
    }

    fn destroy_placeholder_sprite(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn set_shadow_sprite(&mut self, slot: BattlerSlot, species: u16) {
        let _ = (slot, species);
    }

    fn hide_shadow_sprite(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn start_battler_anim(&mut self, slot: BattlerSlot, anim: u8) {
        let _ = (slot, anim);
    }

    fn set_battler_invisible(&mut self, slot: BattlerSlot, invisible: bool) {
        let _ = (slot, invisible);
    }

    fn toggle_battler_visibility(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn destroy_battler_sprite(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn start_faint(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn launch_shiny_animation(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    /// Release the sparkle tiles and palette shared by all shiny animations
    fn free_shiny_graphics(&mut self) {}

    // === Health boxes ===

    fn update_healthbox(&mut self, slot: BattlerSlot, mon: &PartyMon) {
        let _ = (slot, mon);
    }

    fn start_healthbox_slide_in(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn set_healthbox_visible(&mut self, slot: BattlerSlot, visible: bool) {
        let _ = (slot, visible);
    }

    fn load_battle_bar_graphics(&mut self) {}

    fn set_battle_bar(&mut self, slot: BattlerSlot, max_hp: u16, current_hp: u16, delta: i16) {
        let _ = (slot, max_hp, current_hp, delta);
    }

    fn update_hp_text(&mut self, slot: BattlerSlot, hp: i16) {
        let _ = (slot, hp);
    }

    fn update_status_icon(&mut self, slot: BattlerSlot, mon: &PartyMon) {
        let _ = (slot, mon);
    }

    fn show_party_summary(
        &mut self,
        slot: BattlerSlot,
        party: &[PartySummaryEntry],
        switching: bool,
    ) {
        let _ = (slot, party, switching);
    }

    fn hide_party_summary(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    // === Trainers ===

    fn draw_trainer_pic(&mut self, slot: BattlerSlot, pic: u16, x: i16, y: i16) {
        let _ = (slot, pic, x, y);
    }

    fn slide_trainer_back(&mut self, slot: BattlerSlot, speed: u8) {
        let _ = (slot, speed);
    }

    fn slide_trainer_out(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn free_trainer_sprite(&mut self, slot: BattlerSlot) {
        let _ = slot;
    }

    fn start_intro_slide(&mut self, terrain: u8) {
        let _ = terrain;
    }

    // === Animations ===

    fn launch_special_animation(&mut self, slot: BattlerSlot, anim: SpecialAnim) {
        let _ = (slot, anim);
    }

    fn launch_move_animation(&mut self, slot: BattlerSlot, move_id: u16, turn: u8) {
        let _ = (slot, move_id, turn);
    }

    /// Returns false when the animation was skipped and nothing will play
    fn launch_battle_animation(&mut self, slot: BattlerSlot, anim_id: u8, argument: u16) -> bool {
        let _ = (slot, anim_id, argument);
        false
    }

    fn launch_status_animation(&mut self, slot: BattlerSlot, secondary: bool, status: u32) {
        let _ = (slot, secondary, status);
    }

    // === Audio ===

    fn restore_bgm_volume(&mut self) {}

    fn continue_bgm(&mut self) {}

    fn play_se(&mut self, song: u16, side: Side) {
        let _ = (song, side);
    }

    fn play_bgm(&mut self, song: u16) {
        let _ = song;
    }

    fn play_fanfare(&mut self, song: u16) {
        let _ = song;
    }

    fn play_fainting_cry(&mut self, slot: BattlerSlot, species: u16) {
        let _ = (slot, species);
    }

    fn fade_out_music(&mut self, speed: u8) {
        let _ = speed;
    }

    // === Text / screen ===

    /// Expand a battle string id into display text
    fn buffer_string(&mut self, string_id: u16) -> String {
        format!("#{}", string_id)
    }

    fn print_message(&mut self, text: &str) {
        let _ = text;
    }

    fn begin_fast_palette_fade(&mut self, mode: u8) {
        let _ = mode;
    }

    /// Hand control back to the overworld once the battle is over
    fn leave_battle(&mut self) {}
}

/// Run the shiny check for `slot`
///
/// Marks the check as tried. A visible shiny battler gets its sparkle
/// animation and the runtime raises `finished_shiny_anim` when it ends;
/// anything else finishes immediately.
pub fn try_shiny_animation(
    battle: &mut BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
) {
    let shiny = battle.active_mon(slot).is_some_and(|mon| mon.shiny);
    let wait = battle.wait_mut(slot);
    wait.tried_shiny_anim = true;

    if shiny && presentation.battler_sprite_visible(slot) {
        presentation.launch_shiny_animation(slot);
    } else {
        wait.finished_shiny_anim = true;
    }
}

/// Start a send-out; the ball animation stays active until the runtime clears it
pub fn start_send_out(
    battle: &mut BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
) {
    battle.wait_mut(slot).ball_anim_active = true;
    let mon = battle.active_mon(slot).copied().unwrap_or_default();
    presentation.start_send_out(slot, &mon);
}

/// Launch a special animation; the runtime clears `special_anim_active` when done
pub fn launch_special_animation(
    battle: &mut BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
    anim: SpecialAnim,
) {
    battle.wait_mut(slot).special_anim_active = true;
    presentation.launch_special_animation(slot, anim);
}

/// Launch a status animation; the runtime clears `status_anim_active` when done
pub fn launch_status_animation(
    battle: &mut BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
    secondary: bool,
    status: u32,
) {
    battle.wait_mut(slot).status_anim_active = true;
    presentation.launch_status_animation(slot, secondary, status);
}

/// Refresh the health box from party data, slide it in and show it
pub fn slide_in_healthbox(
    battle: &BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
) {
    let mon = battle.active_mon(slot).copied().unwrap_or_default();
    presentation.update_healthbox(slot, &mon);
    presentation.start_healthbox_slide_in(slot);
    presentation.set_healthbox_visible(slot, true);
}

/// Replace the send-out placeholder with the battler's shadow
pub fn replace_placeholder_with_shadow(
    battle: &BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
) {
    let species = battle.active_mon(slot).map(|mon| mon.species).unwrap_or(0);
    presentation.destroy_placeholder_sprite(slot);
    presentation.set_shadow_sprite(slot, species);
}

/// Push the tracked invisibility bit to the battler sprite
pub fn copy_sprite_invisibility(
    battle: &BattleContext,
    presentation: &mut dyn Presentation,
    slot: BattlerSlot,
) {
    presentation.set_battler_invisible(slot, battle.slot(slot).sprite.invisible);
}
