//! Key name to Windows Virtual-Key code translation.
//!
//! Scripts name keys the way a person would (`"esc"`, `"space"`, `"f5"`) or
//! pass a single printable character.  The injector speaks Windows
//! Virtual-Key codes (winuser.h `VK_*`), so every key is resolved to a
//! [`VirtualKey`] before it reaches the injector.
//!
//! Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes

use std::fmt;

/// A Windows Virtual-Key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualKey(pub u8);

/// Named (non-character) keys.  Lookups are case-insensitive.
const NAMED_KEYS: &[(&str, u8)] = &[
    ("backspace", 0x08),
    ("tab", 0x09),
    ("enter", 0x0D),
    ("return", 0x0D),
    ("shift", 0x10),
    ("ctrl", 0x11),
    ("control", 0x11),
    ("alt", 0x12),
    ("esc", 0x1B),
    ("escape", 0x1B),
    ("space", 0x20),
    ("pageup", 0x21),
    ("pagedown", 0x22),
    ("end", 0x23),
    ("home", 0x24),
    ("left", 0x25),
    ("up", 0x26),
    ("right", 0x27),
    ("down", 0x28),
    ("delete", 0x2E),
    ("f1", 0x70),
    ("f2", 0x71),
    ("f3", 0x72),
    ("f4", 0x73),
    ("f5", 0x74),
    ("f6", 0x75),
    ("f7", 0x76),
    ("f8", 0x77),
    ("f9", 0x78),
    ("f10", 0x79),
    ("f11", 0x7A),
    ("f12", 0x7B),
];

/// Punctuation on a US layout: `(unshifted, shifted, VK_OEM_* code)`.
const PUNCTUATION_KEYS: &[(char, char, u8)] = &[
    (';', ':', 0xBA),
    ('=', '+', 0xBB),
    (',', '<', 0xBC),
    ('-', '_', 0xBD),
    ('.', '>', 0xBE),
    ('/', '?', 0xBF),
    ('`', '~', 0xC0),
    ('[', '{', 0xDB),
    ('\\', '|', 0xDC),
    (']', '}', 0xDD),
    ('\'', '"', 0xDE),
];

/// Shifted digit row, indexed by digit.
const SHIFTED_DIGITS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// A key plus whether Shift must be held to produce the intended character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub key: VirtualKey,
    pub shift: bool,
}

impl KeyStroke {
    pub const fn plain(key: VirtualKey) -> Self {
        Self { key, shift: false }
    }

    pub const fn shifted(key: VirtualKey) -> Self {
        Self { key, shift: true }
    }
}

impl VirtualKey {
    pub const ESCAPE: VirtualKey = VirtualKey(0x1B);
    pub const SPACE: VirtualKey = VirtualKey(0x20);
    pub const ENTER: VirtualKey = VirtualKey(0x0D);
    pub const TAB: VirtualKey = VirtualKey(0x09);
    pub const SHIFT: VirtualKey = VirtualKey(0x10);

    /// Resolves a named key such as `"esc"` or `"F5"`.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_KEYS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, vk)| VirtualKey(*vk))
    }

    /// Resolves a printable ASCII character (plus `\n` and `\t`) to the
    /// key that produces it on a US layout.
    ///
    /// Shift state is dropped; use [`VirtualKey::stroke_for`] when it matters.
    pub fn from_char(c: char) -> Option<Self> {
        Self::stroke_for(c).map(|stroke| stroke.key)
    }

    /// Like [`VirtualKey::from_char`], but also reports whether Shift is
    /// needed (upper-case letters and the shifted symbols).
    pub fn stroke_for(c: char) -> Option<KeyStroke> {
        match c {
            'a'..='z' => Some(KeyStroke::plain(VirtualKey(c.to_ascii_uppercase() as u8))),
            'A'..='Z' => Some(KeyStroke::shifted(VirtualKey(c as u8))),
            '0'..='9' => Some(KeyStroke::plain(VirtualKey(c as u8))),
            ' ' => Some(KeyStroke::plain(Self::SPACE)),
            '\n' => Some(KeyStroke::plain(Self::ENTER)),
            '\t' => Some(KeyStroke::plain(Self::TAB)),
            _ => {
                if let Some(digit) = SHIFTED_DIGITS.iter().position(|&s| s == c) {
                    return Some(KeyStroke::shifted(VirtualKey(b'0' + digit as u8)));
                }
                PUNCTUATION_KEYS.iter().find_map(|&(plain, shifted, vk)| {
                    if c == plain {
                        Some(KeyStroke::plain(VirtualKey(vk)))
                    } else if c == shifted {
                        Some(KeyStroke::shifted(VirtualKey(vk)))
                    } else {
                        None
                    }
                })
            }
        }
    }

    /// Resolves either a named key or a single character.
    pub fn parse(key: &str) -> Option<Self> {
        Self::parse_stroke(key).map(|stroke| stroke.key)
    }

    /// Resolves a named key (never shifted) or a single character.
    pub fn parse_stroke(key: &str) -> Option<KeyStroke> {
        Self::from_name(key).map(KeyStroke::plain).or_else(|| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Self::stroke_for(c),
                _ => None,
            }
        })
    }

    pub fn code(self) -> u8 {
        self.0
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VK 0x{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys_are_case_insensitive() {
        assert_eq!(VirtualKey::from_name("esc"), Some(VirtualKey::ESCAPE));
        assert_eq!(VirtualKey::from_name("ESC"), Some(VirtualKey::ESCAPE));
        assert_eq!(VirtualKey::from_name("F12"), Some(VirtualKey(0x7B)));
    }

    #[test]
    fn test_letters_map_to_uppercase_codes() {
        assert_eq!(VirtualKey::from_char('a'), Some(VirtualKey(0x41)));
        assert_eq!(VirtualKey::from_char('Z'), Some(VirtualKey(0x5A)));
        assert_eq!(VirtualKey::from_char('7'), Some(VirtualKey(0x37)));
    }

    #[test]
    fn test_parse_prefers_names_over_characters() {
        assert_eq!(VirtualKey::parse("space"), Some(VirtualKey::SPACE));
        assert_eq!(VirtualKey::parse("q"), Some(VirtualKey(0x51)));
    }

    #[test]
    fn test_every_printable_ascii_character_resolves() {
        let unmapped: String = (0x20u8..0x7F)
            .map(char::from)
            .filter(|&c| VirtualKey::from_char(c).is_none())
            .collect();
        assert_eq!(unmapped, "");
    }

    #[test]
    fn test_punctuation_maps_to_oem_codes_with_shift() {
        assert_eq!(
            VirtualKey::stroke_for('.'),
            Some(KeyStroke::plain(VirtualKey(0xBE)))
        );
        assert_eq!(
            VirtualKey::stroke_for('~'),
            Some(KeyStroke::shifted(VirtualKey(0xC0)))
        );
        assert_eq!(
            VirtualKey::stroke_for('"'),
            Some(KeyStroke::shifted(VirtualKey(0xDE)))
        );
        assert_eq!(
            VirtualKey::stroke_for('\\'),
            Some(KeyStroke::plain(VirtualKey(0xDC)))
        );
    }

    #[test]
    fn test_shifted_digit_row() {
        assert_eq!(VirtualKey::stroke_for('!'), Some(KeyStroke::shifted(VirtualKey(b'1'))));
        assert_eq!(VirtualKey::stroke_for(')'), Some(KeyStroke::shifted(VirtualKey(b'0'))));
        assert_eq!(VirtualKey::stroke_for('5'), Some(KeyStroke::plain(VirtualKey(b'5'))));
    }

    #[test]
    fn test_upper_case_letters_need_shift() {
        assert_eq!(VirtualKey::stroke_for('Q'), Some(KeyStroke::shifted(VirtualKey(b'Q'))));
        assert_eq!(VirtualKey::stroke_for('q'), Some(KeyStroke::plain(VirtualKey(b'Q'))));
        assert_eq!(VirtualKey::parse_stroke("esc"), Some(KeyStroke::plain(VirtualKey::ESCAPE)));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert_eq!(VirtualKey::parse("hyper"), None);
        assert_eq!(VirtualKey::parse("€"), None);
        assert_eq!(VirtualKey::parse("\u{7f}"), None);
        assert_eq!(VirtualKey::parse(""), None);
    }
}
