//! Scancode set 1 to character translation.
//!
//! Two static 256-entry tables, one for the plain layer and one for the
//! shifted layer. Index 0 (`NO`) doubles as the "no character" sentinel, so
//! pure modifier keys and unassigned codes decode to nothing.

use lazy_static::lazy_static;
use lumen_common::KeyModifiers;

/// Table entry meaning "no character".
const NO: u8 = 0;

/// Bit set in a scancode when the key is released.
pub const RELEASE_BIT: u8 = 0x80;

/// Physical key codes the terminal layer cares about.
pub mod keys {
    /// Backspace.
    pub const BACKSPACE: u8 = 0x0E;
    /// Enter on the main block.
    pub const ENTER: u8 = 0x1C;
    /// Left or right control.
    pub const CTRL: u8 = 0x1D;
    /// Left shift.
    pub const LEFT_SHIFT: u8 = 0x2A;
    /// Right shift.
    pub const RIGHT_SHIFT: u8 = 0x36;
    /// Left alt.
    pub const ALT: u8 = 0x38;
    /// Caps lock. Decoded as nothing.
    pub const CAPS_LOCK: u8 = 0x3A;
    /// Function key F1.
    pub const F1: u8 = 0x3B;
    /// Function key F2.
    pub const F2: u8 = 0x3C;
    /// Function key F3.
    pub const F3: u8 = 0x3D;
}

/// One raw byte from the keyboard controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scancode(pub u8);

impl Scancode {
    /// True for a break (key up) code.
    pub fn is_release(self) -> bool {
        self.0 & RELEASE_BIT != 0
    }

    /// The physical key, with the make/break bit stripped.
    pub fn key(self) -> u8 {
        self.0 & !RELEASE_BIT
    }
}

/// Navigation keys carried through the tables as opaque markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    /// Home.
    Home,
    /// End.
    End,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
}

impl SpecialKey {
    const MARKERS: [SpecialKey; 10] = [
        SpecialKey::Home,
        SpecialKey::End,
        SpecialKey::Up,
        SpecialKey::Down,
        SpecialKey::Left,
        SpecialKey::Right,
        SpecialKey::PageUp,
        SpecialKey::PageDown,
        SpecialKey::Insert,
        SpecialKey::Delete,
    ];

    /// The table value standing in for this key.
    pub const fn marker(self) -> u8 {
        0xE0 + self as u8
    }

    fn from_marker(value: u8) -> Option<Self> {
        match value {
            0xE0..=0xE9 => Some(Self::MARKERS[(value - 0xE0) as usize]),
            _ => None,
        }
    }
}

/// A decoded table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A byte to hand to the line discipline.
    Char(u8),
    /// A navigation key with no line-editing meaning.
    Special(SpecialKey),
}

impl Key {
    fn from_entry(entry: u8) -> Option<Key> {
        match entry {
            NO => None,
            value => Some(
                SpecialKey::from_marker(value)
                    .map(Key::Special)
                    .unwrap_or(Key::Char(value)),
            ),
        }
    }
}

#[rustfmt::skip]
const PLAIN_LOW: [u8; 0x60] = [
    NO,   0x1B, b'1', b'2', b'3', b'4', b'5', b'6', // 0x00
    b'7', b'8', b'9', b'0', b'-', b'=', 0x08, b'\t',
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', // 0x10
    b'o', b'p', b'[', b']', b'\n', NO,  b'a', b's',
    b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', // 0x20
    b'\'', b'`', NO,  b'\\', b'z', b'x', b'c', b'v',
    b'b', b'n', b'm', b',', b'.', b'/', NO,   b'*', // 0x30
    NO,   b' ', NO,   NO,   NO,   NO,   NO,   NO,
    NO,   NO,   NO,   NO,   NO,   NO,   NO,   b'7', // 0x40
    b'8', b'9', b'-', b'4', b'5', b'6', b'+', b'1',
    b'2', b'3', b'0', b'.', NO,   NO,   NO,   NO,   // 0x50
    NO,   NO,   NO,   NO,   NO,   NO,   NO,   NO,
];

#[rustfmt::skip]
const SHIFTED_LOW: [u8; 0x60] = [
    NO,   0x1B, b'!', b'@', b'#', b'$', b'%', b'^', // 0x00
    b'&', b'*', b'(', b')', b'_', b'+', 0x08, b'\t',
    b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', // 0x10
    b'O', b'P', b'{', b'}', b'\n', NO,  b'A', b'S',
    b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':', // 0x20
    b'"', b'~', NO,   b'|', b'Z', b'X', b'C', b'V',
    b'B', b'N', b'M', b'<', b'>', b'?', NO,   b'*', // 0x30
    NO,   b' ', NO,   NO,   NO,   NO,   NO,   NO,
    NO,   NO,   NO,   NO,   NO,   NO,   NO,   b'7', // 0x40
    b'8', b'9', b'-', b'4', b'5', b'6', b'+', b'1',
    b'2', b'3', b'0', b'.', NO,   NO,   NO,   NO,   // 0x50
    NO,   NO,   NO,   NO,   NO,   NO,   NO,   NO,
];

/// Entries at fixed offsets in the upper half, shared by both layers.
const HIGH_ENTRIES: [(usize, u8); 12] = [
    (0x9C, b'\n'), // keypad enter
    (0xB5, b'/'),  // keypad divide
    (0xC8, SpecialKey::Up.marker()),
    (0xD0, SpecialKey::Down.marker()),
    (0xC9, SpecialKey::PageUp.marker()),
    (0xD1, SpecialKey::PageDown.marker()),
    (0xCB, SpecialKey::Left.marker()),
    (0xCD, SpecialKey::Right.marker()),
    (0x97, SpecialKey::Home.marker()),
    (0xCF, SpecialKey::End.marker()),
    (0xD2, SpecialKey::Insert.marker()),
    (0xD3, SpecialKey::Delete.marker()),
];

fn build_table(low: &[u8; 0x60]) -> [u8; 256] {
    let mut table = [NO; 256];
    table[..low.len()].copy_from_slice(low);
    for &(index, value) in HIGH_ENTRIES.iter() {
        table[index] = value;
    }
    table
}

lazy_static! {
    /// The US layout keymap, built on first use.
    pub static ref KEYMAP: Keymap = Keymap {
        plain: build_table(&PLAIN_LOW),
        shifted: build_table(&SHIFTED_LOW),
    };
}

/// Plain and shifted lookup tables.
pub struct Keymap {
    plain: [u8; 256],
    shifted: [u8; 256],
}

impl Keymap {
    /// Reads a table entry by raw index.
    pub fn lookup(&self, shifted: bool, index: u8) -> Option<Key> {
        let table = if shifted { &self.shifted } else { &self.plain };
        Key::from_entry(table[index as usize])
    }

    /// Decodes a scancode under the given modifier state.
    ///
    /// The make/break bit is stripped first, so a release decodes to the
    /// same entry as its press; callers filter releases themselves.
    pub fn translate(&self, modifiers: KeyModifiers, scancode: Scancode) -> Option<Key> {
        self.lookup(modifiers.shifted(), scancode.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(modifiers: KeyModifiers, raw: u8) -> Option<Key> {
        KEYMAP.translate(modifiers, Scancode(raw))
    }

    #[test]
    fn test_plain_letters_and_digits() {
        assert_eq!(translate(KeyModifiers::empty(), 0x23), Some(Key::Char(b'h')));
        assert_eq!(translate(KeyModifiers::empty(), 0x17), Some(Key::Char(b'i')));
        assert_eq!(translate(KeyModifiers::empty(), 0x02), Some(Key::Char(b'1')));
        assert_eq!(translate(KeyModifiers::empty(), keys::ENTER), Some(Key::Char(b'\n')));
        assert_eq!(translate(KeyModifiers::empty(), keys::BACKSPACE), Some(Key::Char(0x08)));
    }

    #[test]
    fn test_either_shift_selects_shifted_layer() {
        assert_eq!(translate(KeyModifiers::SHIFT_LEFT, 0x23), Some(Key::Char(b'H')));
        assert_eq!(translate(KeyModifiers::SHIFT_RIGHT, 0x02), Some(Key::Char(b'!')));
        assert_eq!(translate(KeyModifiers::SHIFT_LEFT, 0x28), Some(Key::Char(b'"')));
    }

    #[test]
    fn test_ctrl_and_alt_do_not_shift() {
        let mods = KeyModifiers::CTRL | KeyModifiers::ALT;
        assert_eq!(translate(mods, 0x1E), Some(Key::Char(b'a')));
    }

    #[test]
    fn test_modifiers_and_function_keys_are_holes() {
        for raw in [keys::LEFT_SHIFT, keys::RIGHT_SHIFT, keys::CTRL, keys::ALT] {
            assert_eq!(translate(KeyModifiers::empty(), raw), None);
        }
        for raw in [keys::F1, keys::F2, keys::F3, keys::CAPS_LOCK] {
            assert_eq!(translate(KeyModifiers::ALT, raw), None);
        }
        assert_eq!(translate(KeyModifiers::empty(), 0x00), None);
    }

    #[test]
    fn test_release_decodes_like_press() {
        assert_eq!(
            translate(KeyModifiers::empty(), 0x23 | RELEASE_BIT),
            Some(Key::Char(b'h'))
        );
        assert!(Scancode(0x23 | RELEASE_BIT).is_release());
        assert!(!Scancode(0x23).is_release());
        assert_eq!(Scancode(0xA3).key(), 0x23);
    }

    #[test]
    fn test_every_mapped_press_decodes_to_table_entry() {
        for raw in 0u8..0x60 {
            let expected = Key::from_entry(PLAIN_LOW[raw as usize]);
            assert_eq!(translate(KeyModifiers::empty(), raw), expected);
            let expected = Key::from_entry(SHIFTED_LOW[raw as usize]);
            assert_eq!(translate(KeyModifiers::SHIFT_LEFT, raw), expected);
        }
    }

    #[test]
    fn test_high_entries_hold_markers() {
        assert_eq!(KEYMAP.lookup(false, 0xC8), Some(Key::Special(SpecialKey::Up)));
        assert_eq!(KEYMAP.lookup(true, 0xD3), Some(Key::Special(SpecialKey::Delete)));
        assert_eq!(KEYMAP.lookup(false, 0x97), Some(Key::Special(SpecialKey::Home)));
        assert_eq!(KEYMAP.lookup(false, 0x9C), Some(Key::Char(b'\n')));
        assert_eq!(KEYMAP.lookup(true, 0xB5), Some(Key::Char(b'/')));
        assert_eq!(KEYMAP.lookup(false, 0xFF), None);
    }
}
