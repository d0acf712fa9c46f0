use std::collections::HashMap;

use crate::dom::NodeId;
use crate::key::Modifiers;

/// MIME-typed payloads attached to a simulated clipboard event.
///
/// Hosts write into it during copy/cut via [`DataTransfer::set_data`] and
/// read from it during paste via [`DataTransfer::get_data`]; the harness
/// shuttles the contents to and from its clipboard buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: HashMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, mime: &str, value: &str) {
        self.entries.insert(mime.to_string(), value.to_string());
    }

    pub fn get_data(&self, mime: &str) -> Option<&str> {
        self.entries.get(mime).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (String, String)> + '_ {
        self.entries.drain()
    }

    pub(crate) fn fill(entries: &HashMap<String, String>) -> Self {
        Self {
            entries: entries.clone(),
        }
    }
}

/// A plain event-like value, the shape synthetic dispatch hands to hosts.
///
/// Default prevention is a no-op hook: calling
/// [`MockEvent::prevent_default`] only flips a flag the simulation inspects
/// afterwards.
#[derive(Debug, Clone)]
pub struct MockEvent {
    pub name: String,
    pub target: Option<NodeId>,
    pub key_code: u32,
    pub meta_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Present only on simulated clipboard events.
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl MockEvent {
    /// Starts building an event of the given type over the base shape:
    /// bubbling, cancelable, no key data, no target.
    pub fn builder(name: &str) -> MockEventBuilder {
        MockEventBuilder {
            event: MockEvent {
                name: name.to_string(),
                target: None,
                key_code: 0,
                meta_key: false,
                ctrl_key: false,
                shift_key: false,
                bubbles: true,
                cancelable: true,
                data_transfer: None,
                default_prevented: false,
            },
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The modifier flags carried by this event, in combinable form.
    pub fn modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::empty();
        if self.meta_key {
            mods |= Modifiers::META;
        }
        if self.ctrl_key {
            mods |= Modifiers::CTRL;
        }
        if self.shift_key {
            mods |= Modifiers::SHIFT;
        }
        mods
    }
}

/// Builder merging caller-supplied options over the base event shape.
pub struct MockEventBuilder {
    event: MockEvent,
}

impl MockEventBuilder {
    pub fn target(mut self, node: NodeId) -> Self {
        self.event.target = Some(node);
        self
    }

    pub fn key_code(mut self, code: u32) -> Self {
        self.event.key_code = code;
        self
    }

    pub fn meta_key(mut self, held: bool) -> Self {
        self.event.meta_key = held;
        self
    }

    pub fn ctrl_key(mut self, held: bool) -> Self {
        self.event.ctrl_key = held;
        self
    }

    pub fn shift_key(mut self, held: bool) -> Self {
        self.event.shift_key = held;
        self
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.event.bubbles = bubbles;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.event.cancelable = cancelable;
        self
    }

    pub fn data_transfer(mut self, transfer: DataTransfer) -> Self {
        self.event.data_transfer = Some(transfer);
        self
    }

    pub fn build(self) -> MockEvent {
        self.event
    }
}
