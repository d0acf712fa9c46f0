use crate::error::Error;
use crate::events::MockEvent;
use crate::key::{KeyInput, Modifiers, codes};
use crate::types::{Direction, Modifier};

/// Semantic view over one keyboard event.
///
/// Wraps a single [`KeyInput`] and answers what the key *means* to an
/// editor: is it a delete, an arrow, a printable character, and so on.
/// Create one per event and discard it after use; every query is pure.
#[derive(Debug, Clone, Copy)]
pub struct KeyClassifier {
    input: KeyInput,
}

impl KeyClassifier {
    pub fn new(input: KeyInput) -> Self {
        Self { input }
    }

    /// Classifies a synthetic event directly; fails with
    /// [`Error::NotAKeyEvent`] when the event carries no key data.
    pub fn from_event(event: &MockEvent) -> Result<Self, Error> {
        Ok(Self::new(KeyInput::from_event(event)?))
    }

    pub fn code(&self) -> u32 {
        self.input.code
    }

    pub fn is_escape(&self) -> bool {
        self.input.code == codes::ESC
    }

    /// True for both delete variants, backspace and forward-delete.
    pub fn is_delete(&self) -> bool {
        self.input.code == codes::BACKSPACE || self.is_forward_delete()
    }

    pub fn is_forward_delete(&self) -> bool {
        self.input.code == codes::DELETE
    }

    pub fn is_horizontal_arrow(&self) -> bool {
        self.is_left_arrow() || self.is_right_arrow()
    }

    pub fn is_left_arrow(&self) -> bool {
        self.input.code == codes::LEFT
    }

    pub fn is_right_arrow(&self) -> bool {
        self.input.code == codes::RIGHT
    }

    pub fn is_space(&self) -> bool {
        self.input.code == codes::SPACE
    }

    pub fn is_enter(&self) -> bool {
        self.input.code == codes::ENTER
    }

    /// True when the pressed key *is* the shift key, matching the key
    /// identity like the other predicates. For the held-shift flag use
    /// [`KeyClassifier::has_modifier`].
    pub fn is_shift(&self) -> bool {
        self.input.code == codes::SHIFT
    }

    /// The forward/backward sense of this key.
    ///
    /// `Some` only for the delete variants and horizontal arrows; the
    /// rightward/forward variants map to [`Direction::Forward`], their
    /// counterparts to [`Direction::Backward`]. All other keys have no
    /// direction.
    pub fn direction(&self) -> Option<Direction> {
        match self.input.code {
            codes::DELETE | codes::RIGHT => Some(Direction::Forward),
            codes::BACKSPACE | codes::LEFT => Some(Direction::Backward),
            _ => None,
        }
    }

    /// Whether the given modifier was held with this key.
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        let flag = match modifier {
            Modifier::Meta => Modifiers::META,
            Modifier::Ctrl => Modifiers::CTRL,
            Modifier::Shift => Modifiers::SHIFT,
        };
        self.input.mods.contains(flag)
    }

    pub fn has_any_modifier(&self) -> bool {
        !self.input.mods.is_empty()
    }

    /// Whether this key is the given character, compared through the
    /// legacy convention: the code equals the upper-cased character's
    /// code point.
    pub fn is_char(&self, ch: char) -> bool {
        let upper = ch.to_uppercase().next().unwrap_or(ch);
        self.input.code == upper as u32
    }

    /// Heuristic printability over the legacy keycode space.
    ///
    /// False whenever ctrl or meta is held. Otherwise true for enter,
    /// space, digits, letters, numpad digits, the two legacy punctuation
    /// blocks, and the IME composition code. Intentionally approximate;
    /// this is not a Unicode classification.
    pub fn is_printable(&self) -> bool {
        if self
            .input
            .mods
            .intersects(Modifiers::CTRL | Modifiers::META)
        {
            return false;
        }
        let code = self.input.code;
        code == codes::ENTER
            || code == codes::SPACE
            || (codes::DIGIT_0..=codes::DIGIT_9).contains(&code)
            || (codes::A..=codes::Z).contains(&code)
            || (codes::NUMPAD_0..=codes::NUMPAD_9).contains(&code)
            || (codes::SEMICOLON..=codes::GRAVE).contains(&code)
            || (codes::LEFT_BRACKET..=codes::QUOTE).contains(&code)
            || code == codes::IME
    }
}
