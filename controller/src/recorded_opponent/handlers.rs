//! Command handlers
//!
//! Every handler runs once per dispatch. Immediate handlers complete before
//! returning; presentation handlers do their one-shot setup and install the
//! first step of their chain. A handler that returns without doing either
//! leaves the slot on `RunCommand`, so the same command is dispatched again
//! next tick.

use anyhow::Result;
use rewind_battle::{Flank, MAX_BATTLERS, Side};
use rewind_protocol::{Command, OUTCOME_DREW, PartySummaryEntry, Response, encode_link_outcome};
use rewind_replay::ActionKind;

use super::{RecordedOpponent, Step};
use crate::Tick;
use crate::bridge::{self, SpecialAnim};

/// Health bar delta meaning "drop straight to zero"
const INSTANT_HP_BAR_DROP: i16 = 0x7FFF;

/// Frames before the intro ball is thrown
const INTRO_SEND_OUT_DELAY: u8 = 31;

const TRAINER_SLIDE_BACK_SPEED: u8 = 35;

/// Ticks held on the switching summary before it is drawn
const PARTY_STATUS_SWITCH_DELAY: u8 = 2;

/// Preloaded summary timer when switching; the wait then ends on its first tick
const PARTY_STATUS_SUMMARY_TICKS: u8 = 93;

const END_BATTLE_MUSIC_FADE: u8 = 5;
const END_BATTLE_PALETTE_FADE: u8 = 3;

impl RecordedOpponent {
    pub(super) fn handle(&mut self, command: Command<'_>, tick: &mut Tick<'_>) -> Result<()> {
        match command {
            // === Party data ===
            Command::GetMonData { request, selector } => {
                let data = tick.battle.mon_data(self.slot, request, selector);
                self.emit(tick, Response::DataTransfer(data))?;
                self.complete(tick)
            }
            Command::SetMonData {
                request,
                selector,
                data,
            } => {
                tick.battle.set_mon_data(self.slot, request, selector, data);
                self.complete(tick)
            }
            Command::SetRawMonData { offset, data } => {
                tick.battle.set_raw_mon_data(self.slot, offset, data);
                self.complete(tick)
            }

            // === Decisions from the recording ===
            Command::ChooseAction => self.choose_action(tick),
            Command::ChooseMove => self.choose_move(tick),
            Command::OpenBag => self.choose_item(tick),
            Command::ChoosePokemon => self.choose_pokemon(tick),

            // === Sprites ===
            Command::LoadMonSprite => self.load_mon_sprite(tick),
            Command::SwitchInAnim {
                party_index,
                keep_substitute,
            } => self.switch_in_anim(tick, party_index, keep_substitute),
            Command::ReturnMonToBall { instant } => self.return_mon_to_ball(tick, instant),
            Command::DrawTrainerPic => self.draw_trainer_pic(tick),
            Command::TrainerSlideBack => {
                tick.presentation
                    .slide_trainer_back(self.slot, TRAINER_SLIDE_BACK_SPEED);
                self.transition(Step::FreeTrainerAfterSlide);
                Ok(())
            }
            Command::FaintAnimation => self.faint_animation(tick),
            Command::SpriteInvisibility { invisible } => {
                if tick.presentation.battler_sprite_visible(self.slot)
                    || tick.battle.slot(self.slot).sprite.invisible
                {
                    tick.battle.slot_mut(self.slot).sprite.invisible = invisible;
                    bridge::copy_sprite_invisibility(tick.battle, tick.presentation, self.slot);
                }
                self.complete(tick)
            }
            Command::HitAnimation => {
                if tick.battle.slot(self.slot).sprite.invisible {
                    return self.complete(tick);
                }
                self.transition(Step::HitBlink { elapsed: 0 });
                Ok(())
            }

            // === Animations ===
            Command::MoveAnimation { move_id, turn } => {
                if tick.presentation.battle_se_playing(self.slot) {
                    return Ok(());
                }
                if !tick.presentation.move_has_animation(move_id, turn) {
                    return self.complete(tick);
                }
                if tick.battle.slot(self.slot).sprite.behind_substitute {
                    bridge::launch_special_animation(
                        tick.battle,
                        tick.presentation,
                        self.slot,
                        SpecialAnim::SubstituteToMon,
                    );
                }
                self.transition(Step::MoveAnimUnmask { move_id, turn });
                Ok(())
            }
            Command::BattleAnimation { anim_id, argument } => {
                if tick.presentation.battle_se_playing(self.slot) {
                    return Ok(());
                }
                if !tick
                    .presentation
                    .launch_battle_animation(self.slot, anim_id, argument)
                {
                    return self.complete(tick);
                }
                self.transition(Step::WaitForBattleAnimation);
                Ok(())
            }
            Command::StatusAnimation { secondary, status } => {
                if tick.presentation.battle_se_playing(self.slot) {
                    return Ok(());
                }
                bridge::launch_status_animation(
                    tick.battle,
                    tick.presentation,
                    self.slot,
                    secondary,
                    status,
                );
                self.transition(Step::WaitForStatusAnimation);
                Ok(())
            }

            // === Health box ===
            Command::HealthBarUpdate { delta } => self.health_bar_update(tick, delta),
            Command::StatusIconUpdate => self.status_icon_update(tick),
            Command::DrawPartyStatusSummary {
                skip_for_player,
                switching,
                party,
            } => self.draw_party_status_summary(tick, skip_for_player, switching, &party),
            Command::HidePartyStatusSummary => {
                if tick.battle.slot(self.slot).sprite.party_summary_shown {
                    tick.presentation.hide_party_summary(self.slot);
                    tick.battle.slot_mut(self.slot).sprite.party_summary_shown = false;
                }
                self.complete(tick)
            }

            // === Text ===
            Command::PrintString { string_id } => self.print_string(tick, string_id),

            // === Sound ===
            Command::PlaySe { song } => {
                let side = tick.battle.position(self.slot).side();
                tick.presentation.play_se(song, side);
                self.complete(tick)
            }
            Command::PlayFanfareOrBgm { song, as_bgm } => {
                if as_bgm {
                    tick.presentation.play_bgm(song);
                } else {
                    tick.presentation.play_fanfare(song);
                }
                self.complete(tick)
            }
            Command::FaintingCry => {
                let species = tick
                    .battle
                    .active_mon(self.slot)
                    .map(|mon| mon.species)
                    .unwrap_or(0);
                tick.presentation.play_fainting_cry(self.slot, species);
                self.complete(tick)
            }

            // === Intro ===
            Command::IntroSlide { terrain } => {
                tick.presentation.start_intro_slide(terrain);
                tick.battle.intro_slide_active = true;
                self.complete(tick)
            }
            Command::IntroTrainerBallThrow => self.intro_trainer_ball_throw(tick),

            // === Bookkeeping ===
            Command::ClearScratchVar => {
                tick.battle.scratch_var = 0;
                self.complete(tick)
            }
            Command::SetScratchVar { value } => {
                tick.battle.scratch_var = value;
                self.complete(tick)
            }
            Command::ClearScratchFlag => {
                tick.battle.scratch_flag = false;
                self.complete(tick)
            }
            Command::ToggleScratchFlag => {
                tick.battle.scratch_flag = !tick.battle.scratch_flag;
                self.complete(tick)
            }

            // === End of battle ===
            Command::EndLinkBattle { outcome } => {
                tick.battle.outcome = encode_link_outcome(outcome, OUTCOME_DREW);
                tick.presentation.fade_out_music(END_BATTLE_MUSIC_FADE);
                tick.presentation
                    .begin_fast_palette_fade(END_BATTLE_PALETTE_FADE);
                self.complete(tick)?;
                self.transition(Step::AwaitBattleEnd { notified: false });
                Ok(())
            }

            // Link layer clears the flag; nothing to do here
            Command::TerminatorNop => Ok(()),

            Command::Passive(_) => self.complete(tick),
        }
    }

    fn choose_action(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let action = tick.actions.next(self.slot, ActionKind::Action);
        self.emit(
            tick,
            Response::TwoReturnValues {
                tag: action,
                value: 0,
            },
        )?;
        self.complete(tick)
    }

    fn choose_move(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let move_slot = tick.actions.next(self.slot, ActionKind::MoveSlot);
        let target = tick.actions.next(self.slot, ActionKind::MoveTarget);
        self.emit(tick, Response::move_choice(move_slot, target))?;
        self.complete(tick)
    }

    fn choose_item(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        // Item ids are recorded high byte first
        let high = tick.actions.next(self.slot, ActionKind::ItemId);
        let low = tick.actions.next(self.slot, ActionKind::ItemId);
        let item = (u16::from(high) << 8) | u16::from(low);
        let item_party_index = tick.actions.next(self.slot, ActionKind::ItemTarget);
        let item_move_index = tick.actions.next(self.slot, ActionKind::ItemMove);

        let state = tick.battle.slot_mut(self.slot);
        state.chosen_item = item;
        state.item_party_index = item_party_index;
        state.item_move_index = item_move_index;

        self.emit(tick, Response::OneReturnValue(item))?;
        self.complete(tick)
    }

    fn choose_pokemon(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let party_index = tick.actions.next(self.slot, ActionKind::PartyIndex);
        tick.battle.slot_mut(self.slot).mon_to_switch_into = party_index;
        tick.battle.selected_mon_party_id = party_index;

        self.emit(
            tick,
            Response::ChosenMon {
                party_index,
                order: [0; 3],
            },
        )?;
        self.complete(tick)
    }

    fn load_mon_sprite(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let mon = tick
            .battle
            .active_mon(self.slot)
            .copied()
            .unwrap_or_default();
        tick.presentation.load_mon_sprite(self.slot, &mon);
        tick.presentation.set_shadow_sprite(self.slot, mon.species);
        self.transition(Step::LoadTryShiny);
        Ok(())
    }

    fn switch_in_anim(
        &mut self,
        tick: &mut Tick<'_>,
        party_index: u8,
        keep_substitute: bool,
    ) -> Result<()> {
        let state = tick.battle.slot_mut(self.slot);
        if !keep_substitute {
            state.sprite.behind_substitute = false;
        }
        state.party_index = party_index;

        bridge::start_send_out(tick.battle, tick.presentation, self.slot);
        self.transition(Step::SwitchInTryShiny);
        Ok(())
    }

    fn return_mon_to_ball(&mut self, tick: &mut Tick<'_>, instant: bool) -> Result<()> {
        if instant {
            tick.presentation.destroy_battler_sprite(self.slot);
            tick.presentation.hide_shadow_sprite(self.slot);
            tick.presentation.set_healthbox_visible(self.slot, false);
            return self.complete(tick);
        }

        if tick.battle.slot(self.slot).sprite.behind_substitute {
            bridge::launch_special_animation(
                tick.battle,
                tick.presentation,
                self.slot,
                SpecialAnim::SubstituteToMon,
            );
        }
        self.transition(Step::SwitchOutUnmask);
        Ok(())
    }

    fn faint_animation(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        if tick.battle.slot(self.slot).sprite.behind_substitute {
            bridge::launch_special_animation(
                tick.battle,
                tick.presentation,
                self.slot,
                SpecialAnim::SubstituteToMon,
            );
        }
        self.transition(Step::FaintUnmask);
        Ok(())
    }

    fn draw_trainer_pic(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        let battle = &*tick.battle;
        let trainers = &battle.trainers;

        let (pic, x) = if battle.kind.multi {
            let x = match battle.position(self.slot).flank() {
                Flank::Right => 152,
                Flank::Left => 200,
            };
            let pic = if battle.kind.frontier {
                if self.slot.0 == 1 {
                    trainers.frontier_a
                } else {
                    trainers.frontier_b
                }
            } else {
                trainers.link_player_pics[self.slot.index() % MAX_BATTLERS]
            };
            (pic, x)
        } else {
            let pic = trainers.union_room.unwrap_or_else(|| {
                let opponent = (trainers.recorded_multiplayer_id ^ 1) as usize;
                trainers.link_player_pics[opponent % MAX_BATTLERS]
            });
            (pic, 176)
        };

        let size = tick.presentation.trainer_pic_size(pic).min(8);
        let y = 40 + 4 * (8 - i16::from(size));
        tick.presentation.draw_trainer_pic(self.slot, pic, x, y);
        self.transition(Step::WaitForBattlerSprite);
        Ok(())
    }

    fn health_bar_update(&mut self, tick: &mut Tick<'_>, delta: i16) -> Result<()> {
        tick.presentation.load_battle_bar_graphics();

        let mon = tick
            .battle
            .active_mon(self.slot)
            .copied()
            .unwrap_or_default();
        let (max_hp, current_hp) = (mon.max_hp, mon.hp);

        if delta != INSTANT_HP_BAR_DROP {
            tick.presentation
                .set_battle_bar(self.slot, max_hp, current_hp, delta);
            let after = (i32::from(current_hp) - i32::from(delta)).clamp(0, i32::from(max_hp));
            tick.observer
                .on_hp_change(self.slot, current_hp, after as u16);
        } else {
            tick.presentation.set_battle_bar(self.slot, max_hp, 0, delta);
            tick.observer.on_hp_change(self.slot, current_hp, 0);
        }

        self.transition(Step::WaitForHealthBar);
        Ok(())
    }

    fn status_icon_update(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        // Re-dispatched next tick while a battle sound effect is playing
        if tick.presentation.battle_se_playing(self.slot) {
            return Ok(());
        }

        let mon = tick
            .battle
            .active_mon(self.slot)
            .copied()
            .unwrap_or_default();
        tick.presentation.update_status_icon(self.slot, &mon);
        tick.battle.wait_mut(self.slot).status_anim_active = false;
        tick.observer.on_status(self.slot, mon.status);

        self.transition(Step::WaitForStatusAnimation);
        Ok(())
    }

    fn draw_party_status_summary(
        &mut self,
        tick: &mut Tick<'_>,
        skip_for_player: bool,
        switching: bool,
        party: &[PartySummaryEntry],
    ) -> Result<()> {
        if skip_for_player && tick.battle.position(self.slot).side() == Side::Player {
            return self.complete(tick);
        }

        tick.battle.slot_mut(self.slot).sprite.party_summary_shown = true;

        if switching {
            let wait = tick.battle.wait_mut(self.slot);
            if wait.party_status_delay < PARTY_STATUS_SWITCH_DELAY {
                // Re-dispatched until the pre-delay runs out
                wait.party_status_delay += 1;
                return Ok(());
            }
            wait.party_status_delay = PARTY_STATUS_SUMMARY_TICKS;
        } else {
            tick.battle.wait_mut(self.slot).party_status_delay = 0;
        }

        tick.presentation
            .show_party_summary(self.slot, party, switching);
        self.transition(Step::PartyStatusSummaryDelay);
        Ok(())
    }

    fn print_string(&mut self, tick: &mut Tick<'_>, string_id: u16) -> Result<()> {
        let text = tick.presentation.buffer_string(string_id);
        tick.observer.on_message(self.slot, string_id, &text);

        if tick.options.headless {
            return self.complete(tick);
        }

        tick.presentation.print_message(&text);
        self.transition(Step::WaitForMessage);
        Ok(())
    }

    fn intro_trainer_ball_throw(&mut self, tick: &mut Tick<'_>) -> Result<()> {
        tick.presentation.slide_trainer_out(self.slot);

        if tick.battle.slot(self.slot).sprite.party_summary_shown {
            tick.presentation.hide_party_summary(self.slot);
            tick.battle.slot_mut(self.slot).sprite.party_summary_shown = false;
        }

        tick.battle.wait_mut(self.slot).ball_anim_active = true;
        if tick.battle.kind.is_shared_double() {
            tick.battle.wait_mut(self.slot.partner()).ball_anim_active = true;
        }

        tick.battle.intro_anim_active = true;
        self.transition(Step::IntroSendOutDelay {
            remaining: INTRO_SEND_OUT_DELAY,
        });
        Ok(())
    }
}

