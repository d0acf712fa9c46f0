use std::collections::HashMap;

use log::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::dom::{Document, NodeId};
use crate::error::Error;
use crate::events::{DataTransfer, MockEvent};
use crate::key::codes;
use crate::traits::EditorOps;
use crate::types::{Direction, Modifier};

/// Event-simulation harness.
///
/// Owns the simulated clipboard buffer, so clipboard state is scoped to
/// one harness value instead of the whole process; independent tests get
/// independent buffers. All simulated events flow through
/// [`Harness::dispatch`] into the host's [`EditorOps::on_event`].
#[derive(Debug, Default)]
pub struct Harness {
    clipboard: HashMap<String, String>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands an event to the host and returns it for inspection.
    pub fn dispatch<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        mut event: MockEvent,
    ) -> MockEvent {
        trace!("dispatch {:?} -> {:?}", event.name, event.target);
        editor.on_event(doc, &mut event);
        event
    }

    /// Synthesizes a generic bubbling, cancelable event of the given type
    /// on `node` and dispatches it.
    ///
    /// Returns whether the event's default action was *not* prevented.
    /// Fails with [`Error::MissingNode`] when `node` is not in the
    /// document.
    pub fn trigger_event<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        node: NodeId,
        event_type: &str,
    ) -> Result<bool, Error> {
        if !doc.contains(node) {
            return Err(Error::MissingNode);
        }
        let event = MockEvent::builder(event_type).target(node).build();
        let event = self.dispatch(doc, editor, event);
        Ok(!event.default_prevented())
    }

    /// Keydown with the backspace or forward-delete code per `direction`.
    pub fn trigger_delete<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        direction: Direction,
    ) -> Result<(), Error> {
        let code = match direction {
            Direction::Backward => codes::BACKSPACE,
            Direction::Forward => codes::DELETE,
        };
        let target = self.editor_element(doc, editor)?;
        let event = MockEvent::builder("keydown")
            .target(target)
            .key_code(code)
            .build();
        self.dispatch(doc, editor, event);
        Ok(())
    }

    pub fn trigger_forward_delete<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
    ) -> Result<(), Error> {
        self.trigger_delete(doc, editor, Direction::Forward)
    }

    pub fn trigger_enter<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        let event = MockEvent::builder("keydown")
            .target(target)
            .key_code(codes::ENTER)
            .build();
        self.dispatch(doc, editor, event);
        Ok(())
    }

    /// Simulates typing `text` one grapheme cluster at a time.
    ///
    /// Per cluster: keydown; unless its default was prevented, the native
    /// text-insertion command ([`Document::insert_text_at_cursor`]), then
    /// an `input` event, then keyup. A prevented step short-circuits the
    /// remaining dispatch for that cluster only.
    pub fn insert_text<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        text: &str,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        for cluster in text.graphemes(true) {
            let Some(first) = cluster.chars().next() else {
                continue;
            };
            let code = char_code(first);
            let keydown = MockEvent::builder("keydown")
                .target(target)
                .key_code(code)
                .build();
            let keydown = self.dispatch(doc, editor, keydown);
            if keydown.default_prevented() {
                continue;
            }

            doc.insert_text_at_cursor(cluster)?;

            let input = MockEvent::builder("input").target(target).build();
            let input = self.dispatch(doc, editor, input);
            if input.default_prevented() {
                continue;
            }

            let keyup = MockEvent::builder("keyup")
                .target(target)
                .key_code(code)
                .build();
            self.dispatch(doc, editor, keyup);
        }
        Ok(())
    }

    /// Keydown for `ch` with the requested modifier flag set, as a host
    /// would see a shortcut like meta-B.
    pub fn trigger_key_command<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        ch: char,
        modifier: Modifier,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        let event = MockEvent::builder("keydown")
            .target(target)
            .key_code(char_code(ch))
            .meta_key(modifier == Modifier::Meta)
            .ctrl_key(modifier == Modifier::Ctrl)
            .shift_key(modifier == Modifier::Shift)
            .build();
        self.dispatch(doc, editor, event);
        Ok(())
    }

    pub fn trigger_right_arrow_key<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        modifier: Option<Modifier>,
    ) -> Result<(), Error> {
        self.trigger_arrow_key(doc, editor, codes::RIGHT, modifier)
    }

    pub fn trigger_left_arrow_key<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        modifier: Option<Modifier>,
    ) -> Result<(), Error> {
        self.trigger_arrow_key(doc, editor, codes::LEFT, modifier)
    }

    /// Keydown then keyup for an arrow code, shift flag set when the
    /// modifier is shift.
    fn trigger_arrow_key<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        code: u32,
        modifier: Option<Modifier>,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        let shift = modifier == Some(Modifier::Shift);
        for name in ["keydown", "keyup"] {
            let event = MockEvent::builder(name)
                .target(target)
                .key_code(code)
                .shift_key(shift)
                .build();
            self.dispatch(doc, editor, event);
        }
        Ok(())
    }

    /// Simulates a copy: the event carries an empty data transfer, and
    /// whatever the host wrote through `set_data` lands in the harness
    /// clipboard buffer.
    pub fn trigger_copy_event<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
    ) -> Result<(), Error> {
        self.trigger_clipboard_write(doc, editor, "copy")
    }

    /// Like copy, with the `cut` event type.
    pub fn trigger_cut_event<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
    ) -> Result<(), Error> {
        self.trigger_clipboard_write(doc, editor, "cut")
    }

    fn trigger_clipboard_write<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
        name: &str,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        let event = MockEvent::builder(name)
            .target(target)
            .data_transfer(DataTransfer::new())
            .build();
        let mut event = self.dispatch(doc, editor, event);
        if let Some(transfer) = event.data_transfer.as_mut() {
            for (mime, value) in transfer.drain() {
                trace!("clipboard[{mime}] <- {} bytes", value.len());
                self.clipboard.insert(mime, value);
            }
        }
        Ok(())
    }

    /// Simulates a paste: the event's data transfer is pre-filled from the
    /// harness clipboard buffer, so the host's `get_data` reads the last
    /// copied value per MIME type.
    pub fn trigger_paste_event<E: EditorOps>(
        &mut self,
        doc: &mut Document,
        editor: &mut E,
    ) -> Result<(), Error> {
        let target = self.editor_element(doc, editor)?;
        let event = MockEvent::builder("paste")
            .target(target)
            .data_transfer(DataTransfer::fill(&self.clipboard))
            .build();
        self.dispatch(doc, editor, event);
        Ok(())
    }

    /// Reads the clipboard buffer, for test assertions.
    pub fn copy_data(&self, mime: &str) -> Option<&str> {
        self.clipboard.get(mime).map(String::as_str)
    }

    fn editor_element<E: EditorOps>(
        &self,
        doc: &Document,
        editor: &E,
    ) -> Result<NodeId, Error> {
        let element = editor.element();
        if !doc.contains(element) {
            return Err(Error::MissingNode);
        }
        Ok(element)
    }
}

/// The legacy key code for a character: the code point of its upper-cased
/// form, matching [`crate::KeyClassifier::is_char`].
fn char_code(ch: char) -> u32 {
    ch.to_uppercase().next().unwrap_or(ch) as u32
}
