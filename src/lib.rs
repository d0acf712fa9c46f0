pub mod classifier;
pub mod dom;
pub mod error;
pub mod events;
pub mod harness;
pub mod key;
pub mod traits;
pub mod types;

pub use crate::classifier::KeyClassifier;
pub use crate::dom::{Boundary, Document, NodeData, NodeId, Range};
pub use crate::error::Error;
pub use crate::events::{DataTransfer, MockEvent, MockEventBuilder};
pub use crate::harness::Harness;
pub use crate::key::{KeyInput, Modifiers, codes};
pub use crate::traits::EditorOps;
pub use crate::types::{Direction, Modifier};
