/// Logical forward/backward sense associated with certain keys.
///
/// Editor logic uses this to decide which side of the cursor an operation
/// affects: forward-delete and right-arrow are [`Direction::Forward`],
/// backspace and left-arrow are [`Direction::Backward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A held auxiliary key, named individually for query arguments.
///
/// This is the closed set of modifiers the classifier answers for; the raw
/// combinable flags live in [`crate::key::Modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Meta,
    Ctrl,
    Shift,
}
