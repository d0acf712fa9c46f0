/// Faults raised by classification and simulation calls.
///
/// Every failure is synchronous and fatal to the current call; nothing is
/// retried or caught internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("value is not a key event: no key code and no modifier flags")]
    NotAKeyEvent,

    #[error("required node is missing or no longer in the document")]
    MissingNode,

    #[error("no text node containing {0:?} under the given container")]
    TextNotFound(String),

    #[error("selection has {0} ranges; multi-range selections are unsupported")]
    MultipleRanges(usize),

    #[error("malformed markup: {0}")]
    Parse(String),
}
