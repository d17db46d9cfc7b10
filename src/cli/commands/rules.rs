//! Rules command implementation.
//!
//! `gopolicy rules` prints every built-in rule with its description and
//! messages. It never touches the source tree.

use crate::analysis::{list_rules, RuleInfo, RuleRegistry};
use crate::cli::args::RulesArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(args: RulesArgs) -> Self {
        Self { args }
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let infos = list_rules(&RuleRegistry::with_builtins());
        if self.args.json {
            let json = serde_json::to_string_pretty(&infos)
                .map_err(|e| anyhow::anyhow!("Failed to serialize rules: {}", e))?;
            ui.data(&format!("{json}\n"));
        } else {
            ui.data(&render_rule_list(&infos));
        }
        Ok(CommandResult::success())
    }
}

/// One block per rule: `name: doc` followed by `  - message` lines.
pub fn render_rule_list(infos: &[RuleInfo]) -> String {
    infos.iter().map(ToString::to_string).collect()
}
