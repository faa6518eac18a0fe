//! Keyboard modifier state.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys currently held down.
    ///
    /// The bit values match the layout used by the keyboard driver so the
    /// raw mask can be logged and compared directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct KeyModifiers: u8 {
        /// Left shift.
        const SHIFT_LEFT  = 1 << 0;
        /// Right shift.
        const SHIFT_RIGHT = 1 << 1;
        /// Either control key.
        const CTRL        = 1 << 2;
        /// Left alt.
        const ALT         = 1 << 3;
    }
}

impl KeyModifiers {
    /// Returns true if either shift key is held.
    pub fn shifted(self) -> bool {
        self.intersects(Self::SHIFT_LEFT | Self::SHIFT_RIGHT)
    }

    /// Returns true if alt is held.
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

impl Default for KeyModifiers {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_shift_counts_as_shifted() {
        assert!(!KeyModifiers::empty().shifted());
        assert!(KeyModifiers::SHIFT_LEFT.shifted());
        assert!(KeyModifiers::SHIFT_RIGHT.shifted());
        assert!(!(KeyModifiers::CTRL | KeyModifiers::ALT).shifted());
    }

    #[test]
    fn raw_bits_match_driver_layout() {
        assert_eq!(KeyModifiers::SHIFT_LEFT.bits(), 1);
        assert_eq!(KeyModifiers::SHIFT_RIGHT.bits(), 2);
        assert_eq!(KeyModifiers::CTRL.bits(), 4);
        assert_eq!(KeyModifiers::ALT.bits(), 8);
    }
}
