use crate::error::Error;
use crate::events::MockEvent;

/// Legacy numeric key codes, as historically reported by browser keyboard
/// events. Read-only; hosts map their platform key events to these values.
pub mod codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const SHIFT: u32 = 16;
    pub const CTRL: u32 = 17;
    pub const ESC: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const INS: u32 = 45;
    pub const DELETE: u32 = 46;
    pub const DIGIT_0: u32 = 48;
    pub const DIGIT_9: u32 = 57;
    pub const A: u32 = 65;
    pub const Z: u32 = 90;
    pub const META: u32 = 91;
    pub const NUMPAD_0: u32 = 96;
    pub const NUMPAD_9: u32 = 105;
    /// Start of the `;`..=`` ` `` legacy punctuation block.
    pub const SEMICOLON: u32 = 186;
    pub const GRAVE: u32 = 192;
    /// Start of the `[`..=`"` legacy punctuation block.
    pub const LEFT_BRACKET: u32 = 219;
    pub const QUOTE: u32 = 222;
    /// Reported by some platforms while an IME composition is in flight.
    pub const IME: u32 = 229;
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const META  = 0b0001;
        const CTRL  = 0b0010;
        const SHIFT = 0b0100;
    }
}

/// One validated keyboard event: a legacy key code plus the modifier flags
/// held with it.
///
/// Constructing this through [`KeyInput::from_event`] enforces the
/// is-a-key-event precondition (a non-zero code or at least one modifier),
/// so downstream classification never re-checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The legacy numeric key code.
    pub code: u32,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyInput {
    pub fn new(code: u32, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// Extracts the key fields from a synthetic event.
    ///
    /// Fails with [`Error::NotAKeyEvent`] unless the event carries a
    /// non-zero key code or at least one modifier flag.
    pub fn from_event(event: &MockEvent) -> Result<Self, Error> {
        let mods = event.modifiers();
        if event.key_code == 0 && mods.is_empty() {
            return Err(Error::NotAKeyEvent);
        }
        Ok(Self {
            code: event.key_code,
            mods,
        })
    }
}
