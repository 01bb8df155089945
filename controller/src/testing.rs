//! Test doubles for the presentation runtime and observer

use std::collections::VecDeque;

use rewind_battle::{BattlerSlot, MAX_BATTLERS, PartyMon, Side};
use rewind_protocol::{Opcode, PartySummaryEntry};

use crate::bridge::{Presentation, SpecialAnim};
use crate::observer::Observer;

/// A presentation request the controller made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LoadMonSprite(BattlerSlot, u16),
    StartSendOut(BattlerSlot),
    DestroyPlaceholder(BattlerSlot),
    SetShadow(BattlerSlot, u16),
    HideShadow(BattlerSlot),
    StartBattlerAnim(BattlerSlot, u8),
    SetInvisible(BattlerSlot, bool),
    ToggleVisibility(BattlerSlot),
    DestroyBattler(BattlerSlot),
    StartFaint(BattlerSlot),
    LaunchShiny(BattlerSlot),
    FreeShinyGraphics,
    UpdateHealthbox(BattlerSlot),
    HealthboxSlideIn(BattlerSlot),
    SetHealthboxVisible(BattlerSlot, bool),
    LoadBattleBarGraphics,
    SetBattleBar {
        slot: BattlerSlot,
        max_hp: u16,
        current_hp: u16,
        delta: i16,
    },
    UpdateHpText(BattlerSlot, i16),
    UpdateStatusIcon(BattlerSlot),
    ShowPartySummary(BattlerSlot, bool),
    HidePartySummary(BattlerSlot),
    DrawTrainerPic {
        slot: BattlerSlot,
        pic: u16,
        x: i16,
        y: i16,
    },
    SlideTrainerBack(BattlerSlot, u8),
    SlideTrainerOut(BattlerSlot),
    FreeTrainer(BattlerSlot),
    IntroSlide(u8),
    SpecialAnimation(BattlerSlot, SpecialAnim),
    MoveAnimation(BattlerSlot, u16),
    BattleAnimation(BattlerSlot, u8),
    StatusAnimation(BattlerSlot),
    RestoreBgmVolume,
    ContinueBgm,
    PlaySe(u16, Side),
    PlayBgm(u16),
    PlayFanfare(u16),
    FaintingCry(BattlerSlot, u16),
    FadeOutMusic(u8),
    PrintMessage(String),
    PaletteFade(u8),
    LeaveBattle,
}

/// Presentation double with settable predicates that records every request
#[derive(Debug, Clone)]
pub struct ScriptedPresentation {
    pub sprite_idle: [bool; MAX_BATTLERS],
    pub sprite_settled: bool,
    pub sprite_at_rest: bool,
    pub anim_ended: [bool; MAX_BATTLERS],
    pub sprite_visible: bool,
    pub healthbox_idle: [bool; MAX_BATTLERS],
    pub placeholder_idle: [bool; MAX_BATTLERS],
    pub cry_playing: bool,
    pub se_playing: bool,
    pub text_active: bool,
    pub palette_fade: bool,
    pub move_anim_active: bool,
    pub battle_anim_active: bool,
    pub move_has_animation: bool,
    /// Whether a launched battle animation actually plays
    pub battle_anim_plays: bool,
    /// HP values the health bar steps through before finishing
    pub health_bar_frames: VecDeque<i16>,
    pub pic_size: u8,
    pub calls: Vec<Call>,
}

impl Default for ScriptedPresentation {
    fn default() -> Self {
        Self {
            sprite_idle: [true; MAX_BATTLERS],
            sprite_settled: false,
            sprite_at_rest: true,
            anim_ended: [true; MAX_BATTLERS],
            sprite_visible: true,
            healthbox_idle: [true; MAX_BATTLERS],
            placeholder_idle: [true; MAX_BATTLERS],
            cry_playing: false,
            se_playing: false,
            text_active: false,
            palette_fade: false,
            move_anim_active: false,
            battle_anim_active: false,
            move_has_animation: true,
            battle_anim_plays: true,
            health_bar_frames: VecDeque::new(),
            pic_size: 8,
            calls: Vec::new(),
        }
    }
}

impl ScriptedPresentation {
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }
}

impl Presentation for ScriptedPresentation {
    fn battler_sprite_idle(&self, slot: BattlerSlot) -> bool {
        self.sprite_idle[slot.index()]
    }

    fn battler_sprite_settled(&self, _slot: BattlerSlot) -> bool {
        self.sprite_settled
    }

    fn battler_sprite_at_rest(&self, _slot: BattlerSlot) -> bool {
        self.sprite_at_rest
    }

    fn battler_anim_ended(&self, slot: BattlerSlot) -> bool {
        self.anim_ended[slot.index()]
    }

    fn battler_sprite_visible(&self, _slot: BattlerSlot) -> bool {
        self.sprite_visible
    }

    fn healthbox_idle(&self, slot: BattlerSlot) -> bool {
        self.healthbox_idle[slot.index()]
    }

    fn placeholder_sprite_idle(&self, slot: BattlerSlot) -> bool {
        self.placeholder_idle[slot.index()]
    }

    fn cry_playing(&mut self) -> bool {
        self.cry_playing
    }

    fn battle_se_playing(&self, _slot: BattlerSlot) -> bool {
        self.se_playing
    }

    fn text_printer_active(&self) -> bool {
        self.text_active
    }

    fn palette_fade_active(&self) -> bool {
        self.palette_fade
    }

    fn move_anim_active(&self) -> bool {
        self.move_anim_active
    }

    fn battle_anim_active(&self, _slot: BattlerSlot) -> bool {
        self.battle_anim_active
    }

    fn move_has_animation(&self, _move_id: u16, _turn: u8) -> bool {
        self.move_has_animation
    }

    fn advance_health_bar(&mut self, _slot: BattlerSlot) -> Option<i16> {
        self.health_bar_frames.pop_front()
    }

    fn trainer_pic_size(&self, _pic: u16) -> u8 {
        self.pic_size
    }

    fn load_mon_sprite(&mut self, slot: BattlerSlot, mon: &PartyMon) {
        self.calls.push(Call::LoadMonSprite(slot, mon.species));
    }

    fn start_send_out(&mut self, slot: BattlerSlot, _mon: &PartyMon) {
        self.calls.push(Call::StartSendOut(slot));
    }

    fn destroy_placeholder_sprite(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::DestroyPlaceholder(slot));
    }

    fn set_shadow_sprite(&mut self, slot: BattlerSlot, species: u16) {
        self.calls.push(Call::SetShadow(slot, species));
    }

    fn hide_shadow_sprite(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::HideShadow(slot));
    }

    fn start_battler_anim(&mut self, slot: BattlerSlot, anim: u8) {
        self.calls.push(Call::StartBattlerAnim(slot, anim));
    }

    fn set_battler_invisible(&mut self, slot: BattlerSlot, invisible: bool) {
        self.calls.push(Call::SetInvisible(slot, invisible));
    }

    fn toggle_battler_visibility(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::ToggleVisibility(slot));
    }

    fn destroy_battler_sprite(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::DestroyBattler(slot));
    }

    fn start_faint(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::StartFaint(slot));
    }

    fn launch_shiny_animation(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::LaunchShiny(slot));
    }

    fn free_shiny_graphics(&mut self) {
        self.calls.push(Call::FreeShinyGraphics);
    }

    fn update_healthbox(&mut self, slot: BattlerSlot, _mon: &PartyMon) {
        self.calls.push(Call::UpdateHealthbox(slot));
    }

    fn start_healthbox_slide_in(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::HealthboxSlideIn(slot));
    }

    fn set_healthbox_visible(&mut self, slot: BattlerSlot, visible: bool) {
        self.calls.push(Call::SetHealthboxVisible(slot, visible));
    }

    fn load_battle_bar_graphics(&mut self) {
        self.calls.push(Call::LoadBattleBarGraphics);
    }

    fn set_battle_bar(&mut self, slot: BattlerSlot, max_hp: u16, current_hp: u16, delta: i16) {
        self.calls.push(Call::SetBattleBar {
            slot,
            max_hp,
            current_hp,
            delta,
        });
    }

    fn update_hp_text(&mut self, slot: BattlerSlot, hp: i16) {
        self.calls.push(Call::UpdateHpText(slot, hp));
    }

    fn update_status_icon(&mut self, slot: BattlerSlot, _mon: &PartyMon) {
        self.calls.push(Call::UpdateStatusIcon(slot));
    }

    fn show_party_summary(
        &mut self,
        slot: BattlerSlot,
        _party: &[PartySummaryEntry],
        switching: bool,
    ) {
        self.calls.push(Call::ShowPartySummary(slot, switching));
    }

    fn hide_party_summary(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::HidePartySummary(slot));
    }

    fn draw_trainer_pic(&mut self, slot: BattlerSlot, pic: u16, x: i16, y: i16) {
        self.calls.push(Call::DrawTrainerPic { slot, pic, x, y });
    }

    fn slide_trainer_back(&mut self, slot: BattlerSlot, speed: u8) {
        self.calls.push(Call::SlideTrainerBack(slot, speed));
    }

    fn slide_trainer_out(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::SlideTrainerOut(slot));
    }

    fn free_trainer_sprite(&mut self, slot: BattlerSlot) {
        self.calls.push(Call::FreeTrainer(slot));
    }

    fn start_intro_slide(&mut self, terrain: u8) {
        self.calls.push(Call::IntroSlide(terrain));
    }

    fn launch_special_animation(&mut self, slot: BattlerSlot, anim: SpecialAnim) {
        self.calls.push(Call::SpecialAnimation(slot, anim));
    }

    fn launch_move_animation(&mut self, slot: BattlerSlot, move_id: u16, _turn: u8) {
        self.calls.push(Call::MoveAnimation(slot, move_id));
    }

    fn launch_battle_animation(&mut self, slot: BattlerSlot, anim_id: u8, _argument: u16) -> bool {
        self.calls.push(Call::BattleAnimation(slot, anim_id));
        self.battle_anim_plays
    }

    fn launch_status_animation(&mut self, slot: BattlerSlot, _secondary: bool, _status: u32) {
        self.calls.push(Call::StatusAnimation(slot));
    }

    fn restore_bgm_volume(&mut self) {
        self.calls.push(Call::RestoreBgmVolume);
    }

    fn continue_bgm(&mut self) {
        self.calls.push(Call::ContinueBgm);
    }

    fn play_se(&mut self, song: u16, side: Side) {
        self.calls.push(Call::PlaySe(song, side));
    }

    fn play_bgm(&mut self, song: u16) {
        self.calls.push(Call::PlayBgm(song));
    }

    fn play_fanfare(&mut self, song: u16) {
        self.calls.push(Call::PlayFanfare(song));
    }

    fn play_fainting_cry(&mut self, slot: BattlerSlot, species: u16) {
        self.calls.push(Call::FaintingCry(slot, species));
    }

    fn fade_out_music(&mut self, speed: u8) {
        self.calls.push(Call::FadeOutMusic(speed));
    }

    fn print_message(&mut self, text: &str) {
        self.calls.push(Call::PrintMessage(text.to_string()));
    }

    fn begin_fast_palette_fade(&mut self, mode: u8) {
        self.calls.push(Call::PaletteFade(mode));
    }

    fn leave_battle(&mut self) {
        self.calls.push(Call::LeaveBattle);
    }
}

/// Observer that keeps everything it is told
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub dispatched: Vec<(BattlerSlot, Opcode)>,
    pub messages: Vec<(BattlerSlot, u16, String)>,
    pub hp_changes: Vec<(BattlerSlot, u16, u16)>,
    pub statuses: Vec<(BattlerSlot, u32)>,
}

impl Observer for RecordingObserver {
    fn on_dispatch(&mut self, slot: BattlerSlot, opcode: Opcode) {
        self.dispatched.push((slot, opcode));
    }

    fn on_message(&mut self, slot: BattlerSlot, string_id: u16, text: &str) {
        self.messages.push((slot, string_id, text.to_string()));
    }

    fn on_hp_change(&mut self, slot: BattlerSlot, before: u16, after: u16) {
        self.hp_changes.push((slot, before, after));
    }

    fn on_status(&mut self, slot: BattlerSlot, status: u32) {
        self.statuses.push((slot, status));
    }
}
