pub mod parser;

pub use parser::parse_command;

use crate::cleanup::selection::PageDirection;

/// Everything an operator can ask the cleanup engine to do.
///
/// Inbound chat text is parsed into exactly one of these; free text that
/// is not a slash command becomes [`Command::Text`] so an armed
/// confirmation gate can interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    Space,
    Preview,
    /// Render the current selection page.
    ShowSelection,
    /// Flip one 1-based item number.
    Toggle(usize),
    Page(PageDirection),
    SelectAll,
    ClearAll,
    /// Arm the gate from the interactive selection.
    Arm,
    /// Arm the gate from a textual selection expression.
    ArmExpression(String),
    Cancel,
    /// Unrecognized slash command, echoed back in the reply.
    Unknown(String),
    /// Non-command text (confirmation input while armed).
    Text(String),
}
