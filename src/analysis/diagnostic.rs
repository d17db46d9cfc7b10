//! Reported policy violations.

use std::fmt;

use crate::syntax::Position;

/// One policy violation: where, what and which rule found it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Diagnostic {
    /// Resolved source position.
    pub position: Position,
    /// Rendered message text.
    pub message: String,
    /// Name of the rule that reported it.
    pub rule: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(position: Position, message: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.position, self.message, self.rule)
    }
}
