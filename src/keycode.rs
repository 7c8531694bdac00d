//! Keyboard usage ids and the bounded key combos emitted by pads.

use core::fmt;

use heapless::Vec;

/// Maximum number of codes pressed together by one pad action
pub const MAX_COMBO: usize = 3;

/// HID keyboard usage id (usage page 0x07)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Keycode(pub u8);

impl Keycode {
    pub const A: Self = Self(0x04);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const SPACE: Self = Self(0x2C);

    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);
    pub const F13: Self = Self(0x68);
    pub const F14: Self = Self(0x69);
    pub const F15: Self = Self(0x6A);
    pub const F16: Self = Self(0x6B);
    pub const F17: Self = Self(0x6C);
    pub const F18: Self = Self(0x6D);
    pub const F19: Self = Self(0x6E);
    pub const F20: Self = Self(0x6F);
    pub const F21: Self = Self(0x70);
    pub const F22: Self = Self(0x71);
    pub const F23: Self = Self(0x72);
    pub const F24: Self = Self(0x73);

    pub const RIGHT_ARROW: Self = Self(0x4F);
    pub const LEFT_ARROW: Self = Self(0x50);
    pub const DOWN_ARROW: Self = Self(0x51);
    pub const UP_ARROW: Self = Self(0x52);

    pub const CONTROL: Self = Self(0xE0);
    pub const SHIFT: Self = Self(0xE1);
    pub const ALT: Self = Self(0xE2);
    pub const GUI: Self = Self(0xE3);
    pub const RIGHT_CONTROL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    /// Returns if the code is one of the eight modifier keys
    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::CONTROL.0 && self.0 <= Self::RIGHT_GUI.0
    }
}

/// Ordered set of up to [`MAX_COMBO`] codes sent together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCombo {
    codes: Vec<Keycode, MAX_COMBO>,
}

impl KeyCombo {
    pub const fn new() -> Self {
        Self { codes: Vec::new() }
    }

    /// Build a combo from a slice, keeping the first [`MAX_COMBO`] codes.
    ///
    /// Returns the combo and whether any codes were dropped.
    pub fn from_slice_truncated(codes: &[Keycode]) -> (Self, bool) {
        let mut combo = Self::new();
        for code in codes.iter().take(MAX_COMBO) {
            // Capacity is guaranteed by `take`
            let _ = combo.codes.push(*code);
        }
        (combo, codes.len() > MAX_COMBO)
    }

    pub fn as_slice(&self) -> &[Keycode] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, code) in self.codes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:#04x}", code.0)?;
        }
        f.write_str("]")
    }
}
