//! Rule registry.
//!
//! The [`RuleRegistry`] is the ordered list of rules active for one run.
//! It is built by the caller; there is no process-wide rule table.

use super::rule::{Rule, RuleInfo};
use super::rules::{NoCommentsRule, PkgErrorsRule};
use crate::error::{PolicyError, Result};

/// Ordered collection of rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with the built-in rules, in reporting order.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PkgErrorsRule));
        registry.register(Box::new(NoCommentsRule));
        registry
    }

    /// Append a rule. A rule with the same name replaces the earlier one in place.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.iter().find(|r| r.name() == name)
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Remove the named rules.
    ///
    /// # Errors
    ///
    /// Fails without changing the registry if any name is unknown.
    pub fn disable(&mut self, names: &[String]) -> Result<()> {
        if let Some(unknown) = names.iter().find(|n| self.get(n).is_none()) {
            let known: Vec<_> = self.iter().map(|r| r.name()).collect();
            return Err(PolicyError::ConfigValidationError {
                message: format!(
                    "unknown rule '{}' (available: {})",
                    unknown,
                    known.join(", ")
                ),
            });
        }
        self.rules.retain(|r| !names.iter().any(|n| n == r.name()));
        Ok(())
    }

    /// Describe every rule, in order.
    pub fn list(&self) -> Vec<RuleInfo> {
        self.iter().map(RuleInfo::of).collect()
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
