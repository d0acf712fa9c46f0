use crate::dom::{Document, NodeId};
use crate::events::MockEvent;

/// The host editor boundary.
///
/// The simulation harness drives an editor through this trait: every
/// synthetic event lands in [`EditorOps::on_event`], where the host may
/// inspect the key fields, call [`MockEvent::prevent_default`], mutate the
/// document, or read and write the event's clipboard data.
pub trait EditorOps {
    /// The editor's root element within the document.
    fn element(&self) -> NodeId;

    /// Handles one dispatched event.
    fn on_event(&mut self, doc: &mut Document, event: &mut MockEvent);
}
