//! BattleContext - state shared between the engine, controllers and presentation

use rewind_protocol::CommandBuffer;

use crate::types::{
    AnimationWaitState, BattleKind, BattlerSlot, ExecFlags, MAX_BATTLERS, PARTY_SIZE, PartyMon,
    Position, SpriteState,
};

/// Everything the engine keeps per battler slot
#[derive(Debug, Clone)]
pub struct SlotState {
    /// Field position (fixed for the battle)
    pub position: Position,

    /// Inbound command, written by the engine
    pub command: CommandBuffer,

    /// Last response emitted by the controller
    pub response: Vec<u8>,

    /// Intro / switch-in wait flags
    pub wait: AnimationWaitState,

    pub sprite: SpriteState,

    /// Party index of the battler currently in this slot
    pub party_index: u8,

    // === Decision registers ===
    pub chosen_item: u16,
    pub item_party_index: u8,
    pub item_move_index: u8,
    pub mon_to_switch_into: u8,
}

impl SlotState {
    fn new(position: Position) -> Self {
        Self {
            position,
            command: CommandBuffer::new(),
            response: Vec::new(),
            wait: AnimationWaitState::new(),
            sprite: SpriteState::default(),
            party_index: 0,
            chosen_item: 0,
            item_party_index: 0,
            item_move_index: 0,
            mon_to_switch_into: 0,
        }
    }
}

/// Front pic sources for the opposing trainer(s)
#[derive(Debug, Clone, Default)]
pub struct OpponentTrainers {
    /// Facility trainer shown for slot 1 in frontier multi battles
    pub frontier_a: u16,

    /// Facility trainer shown for slot 3 in frontier multi battles
    pub frontier_b: u16,

    /// Set when the opponent is a union room trainer
    pub union_room: Option<u16>,

    /// Front pic per link player. Multi battles index it by the battler slot
    /// the player controls, two-player battles by multiplayer id.
    pub link_player_pics: [u16; MAX_BATTLERS],

    /// Multiplayer id the recording was captured from
    pub recorded_multiplayer_id: u8,
}

/// Shared battle context
///
/// Access pattern by component:
/// - the engine writes command buffers and sets exec flags;
/// - a controller reads its own slot's buffer, writes its own slot's
///   response and decision registers, and clears its own exec flag
///   (local battles only);
/// - the intro chain may read and clear its partner's wait flags;
/// - the presentation runtime updates the animation flags in
///   [`AnimationWaitState`] between ticks.
#[derive(Debug, Clone)]
pub struct BattleContext {
    pub kind: BattleKind,

    pub exec_flags: ExecFlags,

    /// Always `MAX_BATTLERS` long; a singles partner slot exists but is empty
    slots: Vec<SlotState>,

    /// The recorded opponent's party
    pub party: [PartyMon; PARTY_SIZE],

    pub trainers: OpponentTrainers,

    // === Battle-wide registers ===
    pub outcome: u8,
    pub selected_mon_party_id: u8,
    pub intro_anim_active: bool,
    pub intro_slide_active: bool,
    pub scratch_var: u8,
    pub scratch_flag: bool,
}

impl BattleContext {
    pub fn new(kind: BattleKind) -> Self {
        let slots = (0..MAX_BATTLERS as u8)
            .map(|id| SlotState::new(Position::from_bits(id)))
            .collect();

        Self {
            kind,
            exec_flags: ExecFlags::new(),
            slots,
            party: [PartyMon::default(); PARTY_SIZE],
            trainers: OpponentTrainers::default(),
            outcome: 0,
            selected_mon_party_id: 0,
            intro_anim_active: false,
            intro_slide_active: false,
            scratch_var: 0,
            scratch_flag: false,
        }
    }

    /// Number of live slots (2 for singles, 4 for doubles)
    pub fn battler_count(&self) -> u8 {
        self.kind.battler_count()
    }

    pub fn slot(&self, slot: BattlerSlot) -> &SlotState {
        &self.slots[slot.index()]
    }

    pub fn slot_mut(&mut self, slot: BattlerSlot) -> &mut SlotState {
        &mut self.slots[slot.index()]
    }

    pub fn wait(&self, slot: BattlerSlot) -> &AnimationWaitState {
        &self.slots[slot.index()].wait
    }

    pub fn wait_mut(&mut self, slot: BattlerSlot) -> &mut AnimationWaitState {
        &mut self.slots[slot.index()].wait
    }

    pub fn position(&self, slot: BattlerSlot) -> Position {
        self.slots[slot.index()].position
    }

    /// The party member currently in `slot`
    pub fn active_mon(&self, slot: BattlerSlot) -> Option<&PartyMon> {
        self.party.get(self.slot(slot).party_index as usize)
    }

    pub fn active_mon_mut(&mut self, slot: BattlerSlot) -> Option<&mut PartyMon> {
        let index = self.slot(slot).party_index as usize;
        self.party.get_mut(index)
    }

    /// Engine side: write a command and mark the slot pending
    pub fn issue_command(&mut self, slot: BattlerSlot, bytes: &[u8]) {
        self.slot_mut(slot).command.write(bytes);
        self.exec_flags.set(slot);
    }

    pub fn is_pending(&self, slot: BattlerSlot) -> bool {
        self.exec_flags.is_set(slot)
    }

    /// Store a response in the slot's outbound buffer
    pub fn write_response(&mut self, slot: BattlerSlot, bytes: Vec<u8>) {
        self.slot_mut(slot).response = bytes;
    }
}
