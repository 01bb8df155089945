//! Continuation chains
//!
//! Each step re-checks its predicates once per tick and either stays put,
//! advances to the next step or completes the command. Predicates read
//! level-triggered flags only, so a step may be polled any number of times.

use anyhow::Result;
use rewind_battle::{BattlerSlot, Position};

use super::{RecordedOpponent, Step};
use crate::Tick;
use crate::bridge::{self, SpecialAnim};

/// Summary timer value after which the party summary wait ends
const PARTY_STATUS_SUMMARY_SETTLE: u8 = 92;

/// Total ticks of the hit blink
const HIT_BLINK_TICKS: u8 = 32;

/// Ticks between visibility toggles while blinking
const HIT_BLINK_PERIOD: u8 = 4;

const INTRO_END_DELAY: u8 = 3;

impl RecordedOpponent {
    pub(super) fn resume(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;

        match self.step {
            Step::RunCommand => Ok(()),

            Step::WaitForBattlerSprite => {
                if tick.presentation.battler_sprite_idle(slot) {
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::FreeTrainerAfterSlide => {
                if tick.presentation.battler_sprite_idle(slot) {
                    tick.presentation.free_trainer_sprite(slot);
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::WaitForMessage => {
                if !tick.presentation.text_printer_active() {
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::WaitForHealthBar => {
                tick.presentation.set_healthbox_visible(slot, true);
                match tick.presentation.advance_health_bar(slot) {
                    Some(hp) => {
                        tick.presentation.update_hp_text(slot, hp);
                        Ok(())
                    }
                    None => self.complete(tick),
                }
            }
            Step::WaitForStatusAnimation => {
                if !tick.battle.wait(slot).status_anim_active {
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::WaitForBattleAnimation => {
                if !tick.presentation.battle_anim_active(slot) {
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::PartyStatusSummaryDelay => {
                let wait = tick.battle.wait_mut(slot);
                let elapsed = wait.party_status_delay;
                wait.party_status_delay = elapsed.wrapping_add(1);
                if elapsed > PARTY_STATUS_SUMMARY_SETTLE {
                    wait.party_status_delay = 0;
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::HitBlink { elapsed } => {
                if elapsed == HIT_BLINK_TICKS {
                    tick.presentation.set_battler_invisible(slot, false);
                    return self.complete(tick);
                }
                if elapsed % HIT_BLINK_PERIOD == 0 {
                    tick.presentation.toggle_battler_visibility(slot);
                }
                self.step = Step::HitBlink {
                    elapsed: elapsed + 1,
                };
                Ok(())
            }

            Step::MoveAnimUnmask { move_id, turn } => {
                if !tick.battle.wait(slot).special_anim_active {
                    tick.presentation.launch_move_animation(slot, move_id, turn);
                    self.transition(Step::MoveAnimRun);
                }
                Ok(())
            }
            Step::MoveAnimRun => {
                if !tick.presentation.move_anim_active() {
                    if tick.battle.slot(slot).sprite.behind_substitute {
                        bridge::launch_special_animation(
                            tick.battle,
                            tick.presentation,
                            slot,
                            SpecialAnim::MonToSubstitute,
                        );
                    }
                    self.transition(Step::MoveAnimRemask);
                }
                Ok(())
            }
            Step::MoveAnimRemask => {
                if !tick.battle.wait(slot).special_anim_active {
                    bridge::copy_sprite_invisibility(tick.battle, tick.presentation, slot);
                    return self.complete(tick);
                }
                Ok(())
            }

            Step::SwitchOutUnmask => {
                if !tick.battle.wait(slot).special_anim_active {
                    bridge::launch_special_animation(
                        tick.battle,
                        tick.presentation,
                        slot,
                        SpecialAnim::SwitchOutOpponentMon,
                    );
                    self.transition(Step::SwitchOutFreeSprite);
                }
                Ok(())
            }
            Step::SwitchOutFreeSprite => {
                if !tick.battle.wait(slot).special_anim_active {
                    tick.presentation.destroy_battler_sprite(slot);
                    tick.presentation.hide_shadow_sprite(slot);
                    tick.presentation.set_healthbox_visible(slot, false);
                    return self.complete(tick);
                }
                Ok(())
            }
            Step::FaintUnmask => {
                if !tick.battle.wait(slot).special_anim_active {
                    tick.presentation.start_faint(slot);
                    self.transition(Step::FaintHideHealthbox);
                }
                Ok(())
            }
            Step::FaintHideHealthbox => {
                if tick.presentation.battler_sprite_idle(slot) {
                    tick.presentation.hide_shadow_sprite(slot);
                    tick.presentation.set_healthbox_visible(slot, false);
                    tick.presentation.destroy_battler_sprite(slot);
                    return self.complete(tick);
                }
                Ok(())
            }

            Step::LoadTryShiny => self.load_try_shiny(tick),

            Step::SwitchInTryShiny => self.switch_in_try_shiny(tick),
            Step::SwitchInShowHealthbox => self.switch_in_show_healthbox(tick),
            Step::SwitchInShowSubstitute => self.switch_in_show_substitute(tick),
            Step::SwitchInSoundAndEnd => self.switch_in_sound_and_end(tick),

            Step::IntroSendOutDelay { remaining } => self.intro_send_out_delay(tick, remaining),
            Step::IntroTryShinyShowHealthbox => self.intro_try_shiny_show_healthbox(tick),
            Step::IntroWaitForShinyAndHealthbox => self.intro_wait_for_shiny_and_healthbox(tick),
            Step::IntroDelayAndEnd => self.intro_delay_and_end(tick),

            Step::AwaitBattleEnd { notified } => {
                if !notified && !tick.presentation.palette_fade_active() {
                    tick.presentation.leave_battle();
                    self.step = Step::AwaitBattleEnd { notified: true };
                }
                Ok(())
            }
        }
    }

    // === Sprite load ===

    fn load_try_shiny(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        if !tick.presentation.battler_sprite_idle(slot)
            || !tick.presentation.battler_sprite_at_rest(slot)
        {
            return Ok(());
        }

        let wait = *tick.battle.wait(slot);
        if !wait.tried_shiny_anim {
            bridge::try_shiny_animation(tick.battle, tick.presentation, slot);
        } else if wait.finished_shiny_anim {
            tick.battle.wait_mut(slot).reset_shiny();
            tick.presentation.free_shiny_graphics();
            return self.complete(tick);
        }
        Ok(())
    }

    // === Switch-in ===

    fn switch_in_try_shiny(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        let wait = *tick.battle.wait(slot);
        if !wait.ball_anim_active && !wait.tried_shiny_anim {
            bridge::try_shiny_animation(tick.battle, tick.presentation, slot);
        }

        if tick.presentation.placeholder_sprite_idle(slot)
            && !tick.battle.wait(slot).ball_anim_active
        {
            bridge::replace_placeholder_with_shadow(tick.battle, tick.presentation, slot);
            self.transition(Step::SwitchInShowHealthbox);
        }
        Ok(())
    }

    fn switch_in_show_healthbox(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        if !tick.battle.wait(slot).finished_shiny_anim
            || !tick.presentation.battler_sprite_idle(slot)
        {
            return Ok(());
        }

        tick.battle.wait_mut(slot).reset_shiny();
        tick.presentation.free_shiny_graphics();
        tick.presentation.start_battler_anim(slot, 0);
        bridge::slide_in_healthbox(tick.battle, tick.presentation, slot);
        bridge::copy_sprite_invisibility(tick.battle, tick.presentation, slot);
        self.transition(Step::SwitchInShowSubstitute);
        Ok(())
    }

    fn switch_in_show_substitute(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        if !tick.presentation.healthbox_idle(slot) {
            return Ok(());
        }

        if tick.battle.slot(slot).sprite.behind_substitute {
            bridge::launch_special_animation(
                tick.battle,
                tick.presentation,
                slot,
                SpecialAnim::MonToSubstitute,
            );
        }
        self.transition(Step::SwitchInSoundAndEnd);
        Ok(())
    }

    fn switch_in_sound_and_end(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        if tick.battle.wait(slot).special_anim_active || tick.presentation.cry_playing() {
            return Ok(());
        }

        if tick.presentation.battler_sprite_idle(slot)
            || tick.presentation.battler_sprite_settled(slot)
        {
            tick.presentation.restore_bgm_volume();
            return self.complete(tick);
        }
        Ok(())
    }

    // === Intro ===

    fn intro_send_out_delay(&mut self, tick: &mut Tick<'_>, remaining: u8) -> Result<()> {
        if remaining > 0 {
            self.step = Step::IntroSendOutDelay {
                remaining: remaining - 1,
            };
            return Ok(());
        }

        let slot = self.slot;
        if tick.battle.kind.is_shared_double() {
            bridge::start_send_out(tick.battle, tick.presentation, slot.partner());
        }
        bridge::start_send_out(tick.battle, tick.presentation, slot);
        self.transition(Step::IntroTryShinyShowHealthbox);
        Ok(())
    }

    fn intro_try_shiny_show_healthbox(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        let partner = slot.partner();
        let shared_double = tick.battle.kind.is_shared_double();

        for battler in [slot, partner] {
            let wait = *tick.battle.wait(battler);
            if !wait.tried_shiny_anim && !wait.ball_anim_active {
                bridge::try_shiny_animation(tick.battle, tick.presentation, battler);
            }
        }

        if !tick.battle.wait(slot).ball_anim_active && !tick.battle.wait(partner).ball_anim_active
        {
            if !tick.battle.wait(slot).healthbox_slide_in_started {
                if shared_double {
                    bridge::slide_in_healthbox(tick.battle, tick.presentation, partner);
                }
                bridge::slide_in_healthbox(tick.battle, tick.presentation, slot);
            }
            tick.battle.wait_mut(slot).healthbox_slide_in_started = true;
        }

        let mut bgm_restored = false;
        let wait = *tick.battle.wait(slot);
        if !wait.wait_for_cry
            && wait.healthbox_slide_in_started
            && !tick.battle.wait(partner).wait_for_cry
            && !tick.presentation.cry_playing()
        {
            if !tick.battle.wait(slot).bgm_restored {
                let kind = tick.battle.kind;
                if kind.multi && kind.link {
                    if is_primary_opponent(tick.battle.position(slot)) {
                        tick.presentation.continue_bgm();
                    }
                } else {
                    tick.presentation.restore_bgm_volume();
                }
            }
            tick.battle.wait_mut(slot).bgm_restored = true;
            bgm_restored = true;
        }

        let battler_anims_done = if tick.battle.kind.double {
            sprites_idle(tick, slot) && sprites_idle(tick, partner)
        } else {
            sprites_idle(tick, slot)
        };

        if bgm_restored && battler_anims_done {
            if shared_double {
                bridge::replace_placeholder_with_shadow(tick.battle, tick.presentation, partner);
            }
            bridge::replace_placeholder_with_shadow(tick.battle, tick.presentation, slot);

            tick.battle.intro_anim_active = false;
            let wait = tick.battle.wait_mut(slot);
            wait.bgm_restored = false;
            wait.healthbox_slide_in_started = false;

            self.transition(Step::IntroWaitForShinyAndHealthbox);
        }
        Ok(())
    }

    fn intro_wait_for_shiny_and_healthbox(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let slot = self.slot;
        let partner = slot.partner();

        let healthbox_anim_done = if tick.battle.kind.is_shared_double() {
            healthbox_settled(tick, slot) && healthbox_settled(tick, partner)
        } else {
            healthbox_settled(tick, slot)
        };
        if !healthbox_anim_done {
            return Ok(());
        }

        if is_primary_opponent(tick.battle.position(slot)) {
            if !tick.battle.wait(slot).finished_shiny_anim
                || !tick.battle.wait(partner).finished_shiny_anim
            {
                return Ok(());
            }

            tick.battle.wait_mut(slot).reset_shiny();
            tick.battle.wait_mut(partner).reset_shiny();
            tick.presentation.free_shiny_graphics();
        }

        tick.battle.wait_mut(slot).intro_end_delay = INTRO_END_DELAY;
        self.transition(Step::IntroDelayAndEnd);
        Ok(())
    }

    fn intro_delay_and_end(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let wait = tick.battle.wait_mut(self.slot);
        wait.intro_end_delay = wait.intro_end_delay.wrapping_sub(1);
        if wait.intro_end_delay == u8::MAX {
            wait.intro_end_delay = 0;
            return self.complete(tick);
        }
        Ok(())
    }
}

/// The opponent battler that owns the shared intro resources
fn is_primary_opponent(position: Position) -> bool {
    position == Position::OpponentLeft
}

/// Send-out placeholder and battler sprite both idle
fn sprites_idle(tick: &Tick<'_>, slot: BattlerSlot) -> bool {
    tick.presentation.placeholder_sprite_idle(slot) && tick.presentation.battler_sprite_idle(slot)
}

/// Health box stopped sliding and the battler's entry animation ended
fn healthbox_settled(tick: &Tick<'_>, slot: BattlerSlot) -> bool {
    tick.presentation.healthbox_idle(slot) && tick.presentation.battler_anim_ended(slot)
}
