//! Violation messages.

use std::fmt;

use super::pass::Pass;
use crate::syntax::Pos;

/// A named policy-violation message owned by exactly one rule.
///
/// Messages are `const` items so tests and tooling can match on their
/// exact wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Message(&'static str);

impl Message {
    /// Define a message.
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    /// Message text.
    pub const fn text(&self) -> &'static str {
        self.0
    }

    /// Report this message at `pos` through the pass's reporter.
    pub fn report(&self, pass: &Pass<'_>, pos: Pos) {
        pass.report(pos, *self);
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
