//! Modifier key tracking.

use super::keymap::{keys, Scancode};
use lumen_common::KeyModifiers;

/// Live set of held modifier keys.
///
/// Fed every scancode in arrival order, whichever terminal ends up with the
/// character, since modifier state is shared by all of them.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    held: KeyModifiers,
}

impl ModifierTracker {
    /// Creates a tracker with nothing held.
    pub const fn new() -> Self {
        ModifierTracker {
            held: KeyModifiers::empty(),
        }
    }

    /// Currently held modifiers.
    pub fn current(&self) -> KeyModifiers {
        self.held
    }

    /// Applies one raw scancode and returns the updated state.
    pub fn on_scancode(&mut self, raw: u8) -> KeyModifiers {
        let scancode = Scancode(raw);
        let flag = match scancode.key() {
            keys::LEFT_SHIFT => KeyModifiers::SHIFT_LEFT,
            keys::RIGHT_SHIFT => KeyModifiers::SHIFT_RIGHT,
            keys::CTRL => KeyModifiers::CTRL,
            keys::ALT => KeyModifiers::ALT,
            _ => return self.held,
        };
        self.held.set(flag, !scancode.is_release());
        self.held
    }
}
