use keysim::{Document, EditorOps, MockEvent, NodeId};

/// One observed dispatch, flattened for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub name: String,
    pub key_code: u32,
    pub meta_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
}

/// Recording host editor.
///
/// Logs every event it receives, prevents default on keydowns whose code
/// is in `prevent_keydown_codes`, writes the current selection into
/// copy/cut events as text/plain, and collects pasted text/plain payloads.
pub struct MockEditor {
    element: NodeId,
    pub events: Vec<RecordedEvent>,
    pub prevent_keydown_codes: Vec<u32>,
    pub prevent_types: Vec<String>,
    pub pasted: Vec<String>,
}

impl MockEditor {
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            events: Vec::new(),
            prevent_keydown_codes: Vec::new(),
            prevent_types: Vec::new(),
            pasted: Vec::new(),
        }
    }

    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name.as_str()).collect()
    }
}

impl EditorOps for MockEditor {
    fn element(&self) -> NodeId {
        self.element
    }

    fn on_event(&mut self, doc: &mut Document, event: &mut MockEvent) {
        self.events.push(RecordedEvent {
            name: event.name.clone(),
            key_code: event.key_code,
            meta_key: event.meta_key,
            ctrl_key: event.ctrl_key,
            shift_key: event.shift_key,
        });

        if self.prevent_types.iter().any(|t| *t == event.name) {
            event.prevent_default();
        }

        match event.name.as_str() {
            "keydown" if self.prevent_keydown_codes.contains(&event.key_code) => {
                event.prevent_default();
            }
            "copy" | "cut" => {
                if let Ok(Some(text)) = doc.selected_text()
                    && let Some(transfer) = event.data_transfer.as_mut()
                {
                    transfer.set_data("text/plain", &text);
                }
            }
            "paste" => {
                if let Some(text) = event
                    .data_transfer
                    .as_ref()
                    .and_then(|t| t.get_data("text/plain"))
                {
                    self.pasted.push(text.to_string());
                }
            }
            _ => {}
        }
    }
}
