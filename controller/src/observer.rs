use rewind_battle::BattlerSlot;
use rewind_protocol::Opcode;

/// Hooks for watching what a controller does.
///
/// All methods have default no-op implementations, so you only need to
/// implement the events you care about. Battle test runners use this to
/// record messages, HP changes and status changes as the replay plays out.
///
/// # Example
///
/// ```ignore
/// struct Transcript(Vec<String>);
///
/// impl Observer for Transcript {
///     fn on_message(&mut self, _slot: BattlerSlot, _id: u16, text: &str) {
///         self.0.push(text.to_string());
///     }
/// }
/// ```
pub trait Observer {
    /// Called when a command is dispatched to its handler.
    fn on_dispatch(&mut self, slot: BattlerSlot, opcode: Opcode) {
        let _ = (slot, opcode);
    }

    /// Called when a battle message is printed (or would be, in headless mode).
    fn on_message(&mut self, slot: BattlerSlot, string_id: u16, text: &str) {
        let _ = (slot, string_id, text);
    }

    /// Called when a health bar update starts, with HP before and after.
    fn on_hp_change(&mut self, slot: BattlerSlot, before: u16, after: u16) {
        let _ = (slot, before, after);
    }

    /// Called when the status icon is refreshed.
    fn on_status(&mut self, slot: BattlerSlot, status: u32) {
        let _ = (slot, status);
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}
