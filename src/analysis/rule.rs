//! The rule abstraction.
//!
//! - [`Rule`] - The trait every analysis rule implements
//! - [`RuleInfo`] - Serializable description of a rule, for list mode

use std::fmt;

use serde::Serialize;

use super::message::Message;
use super::pass::Pass;

/// A named, documented policy check.
///
/// `run` is called once per (unit, rule) pair, possibly from several
/// threads at once. Rules keep no state between calls.
pub trait Rule: Send + Sync {
    /// Unique name, shown next to each diagnostic.
    fn name(&self) -> &'static str;

    /// One-line description.
    fn doc(&self) -> &'static str;

    /// Every message the rule may report, in declaration order.
    fn messages(&self) -> &'static [Message];

    /// Analyze one unit, reporting violations through the pass.
    fn run(&self, pass: &Pass<'_>) -> anyhow::Result<()>;
}

/// Introspection record of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub doc: &'static str,
    pub messages: Vec<&'static str>,
}

impl RuleInfo {
    /// Describe `rule`.
    pub fn of(rule: &dyn Rule) -> Self {
        Self {
            name: rule.name(),
            doc: rule.doc(),
            messages: rule.messages().iter().map(Message::text).collect(),
        }
    }
}

impl fmt::Display for RuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.name, self.doc)?;
        for message in &self.messages {
            writeln!(f, "  - {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quiet;

    const MESSAGES: &[Message] = &[Message::new("first"), Message::new("second")];

    impl Rule for Quiet {
        fn name(&self) -> &'static str {
            "quiet"
        }
        fn doc(&self) -> &'static str {
            "reports nothing"
        }
        fn messages(&self) -> &'static [Message] {
            MESSAGES
        }
        fn run(&self, _pass: &Pass<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn info_lists_messages_in_order() {
        let info = RuleInfo::of(&Quiet);
        assert_eq!(info.messages, vec!["first", "second"]);
    }

    #[test]
    fn info_display_is_a_block() {
        let info = RuleInfo::of(&Quiet);
        assert_eq!(
            info.to_string(),
            "quiet: reports nothing\n  - first\n  - second\n"
        );
    }
}
