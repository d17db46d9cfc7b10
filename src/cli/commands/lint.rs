//! Lint command implementation.
//!
//! `gopolicy lint` runs the external verification tool and then the policy
//! rules over a package pattern. The run fails if either finds problems.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{
    list_rules, run_rules, HumanReporter, JsonFormatter, LintFormatter, OutputFormat,
    RecordingReporter, RuleRegistry, RunOptions, RunSummary, SarifFormatter,
};
use crate::cli::args::LintArgs;
use crate::config::{load_config, PolicyConfig};
use crate::error::{PolicyError, Result};
use crate::loader::LoadOptions;
use crate::shell::{require_tool, run_tool, CommandOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_ERROR, EXIT_VIOLATIONS};
use super::rules::render_rule_list;

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: LintArgs,
}

/// Outcome of the external verification tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VetOutcome {
    Skipped,
    Passed,
    Failed,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, args: LintArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Use an explicit configuration file.
    pub fn with_config(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    fn run_options(&self, config: &PolicyConfig) -> RunOptions {
        RunOptions {
            load: LoadOptions {
                include_tests: self.args.tests || config.include_tests,
                exclude: config.exclude.clone(),
                build_tags: config
                    .build_tags
                    .iter()
                    .chain(&self.args.tags)
                    .cloned()
                    .collect(),
            },
            jobs: self.args.jobs.unwrap_or(config.jobs),
        }
    }

    /// Run the configured verification tool in the project root.
    fn run_vet(&self, config: &PolicyConfig, ui: &mut dyn UserInterface) -> Result<VetOutcome> {
        if self.args.no_vet || !config.vet.enabled {
            debug!("Verification tool disabled");
            return Ok(VetOutcome::Skipped);
        }

        let program = require_tool(&config.vet.command)?;
        let options = CommandOptions {
            cwd: Some(self.project_root.clone()),
            timeout: config.vet.timeout(),
        };
        let result = run_tool(&program, &config.vet.args, &options)?;

        if result.success {
            Ok(VetOutcome::Passed)
        } else {
            if result.timed_out {
                ui.warning(&format!("{} timed out", config.vet.command));
            }
            Ok(VetOutcome::Failed)
        }
    }

    /// Run the rules, writing diagnostics in the requested format.
    fn run_policy(
        &self,
        registry: &RuleRegistry,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<RunSummary> {
        let root = &self.project_root;
        let pattern = &self.args.pattern;

        if self.args.format == OutputFormat::Human {
            let reporter = HumanReporter::new(io::stderr());
            return run_rules(root, pattern, registry, options, &reporter);
        }

        let recorder = RecordingReporter::new();
        let summary = run_rules(root, pattern, registry, options, &recorder)?;
        let diagnostics = recorder.into_diagnostics();

        let mut output = Vec::new();
        match self.args.format {
            OutputFormat::Json => JsonFormatter::new(summary.units).format(&diagnostics, &mut output)?,
            _ => SarifFormatter::new(
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                registry.list(),
            )
            .format(&diagnostics, &mut output)?,
        }
        ui.data(&String::from_utf8_lossy(&output));

        Ok(summary)
    }

    fn report_summary(&self, summary: &RunSummary, vet: VetOutcome, ui: &mut dyn UserInterface) {
        if summary.faults > 0 {
            ui.error(&format!(
                "{} rule invocation(s) failed; see the log for details",
                summary.faults
            ));
        }
        if vet == VetOutcome::Failed {
            ui.error("Verification tool reported problems");
        }
        if summary.diagnostics > 0 {
            ui.warning(&format!(
                "{} issue(s) in {} package(s)",
                summary.diagnostics, summary.units
            ));
        } else if summary.faults == 0 && vet != VetOutcome::Failed {
            ui.success(&format!("No issues in {} package(s)", summary.units));
        }
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.list {
            ui.data(&render_rule_list(&list_rules(&RuleRegistry::with_builtins())));
            return Ok(CommandResult::success());
        }

        let config = match load_config(&self.project_root, self.config_path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_ERROR));
            }
        };

        let mut registry = RuleRegistry::with_builtins();
        if let Err(e) = registry.disable(&config.rules.disable) {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(EXIT_ERROR));
        }

        let vet = match self.run_vet(&config, ui) {
            Ok(outcome) => outcome,
            Err(e @ (PolicyError::ToolMissing { .. } | PolicyError::CommandFailed { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_ERROR));
            }
            Err(e) => return Err(e),
        };

        let options = self.run_options(&config);
        let summary = match self.run_policy(&registry, &options, ui) {
            Ok(summary) => summary,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_ERROR));
            }
        };

        self.report_summary(&summary, vet, ui);

        if summary.faults > 0 {
            Ok(CommandResult::failure(EXIT_ERROR))
        } else if summary.diagnostics > 0 || vet == VetOutcome::Failed {
            Ok(CommandResult::failure(EXIT_VIOLATIONS))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod"), "module example.com/demo\n").unwrap();
        for (name, content) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    fn args() -> LintArgs {
        LintArgs {
            no_vet: true,
            ..Default::default()
        }
    }

    fn run(temp: &TempDir, args: LintArgs) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = LintCommand::new(temp.path(), args)
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn lint_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = LintCommand::new(temp.path(), LintArgs::default());

        assert_eq!(cmd.project_root(), temp.path());
        assert_eq!(cmd.args().pattern, "./...");
    }

    #[test]
    fn clean_project_succeeds() {
        let temp = project(&[("main.go", "package main\n\n// main runs.\nfunc main() {}\n")]);
        let (result, ui) = run(&temp, args());

        assert!(result.success);
        assert!(ui.has_success("No issues in 1 package(s)"));
    }

    #[test]
    fn violations_exit_with_one() {
        let temp = project(&[("main.go", "package main\n\nimport \"errors\"\n\nvar _ = errors.New\n")]);
        let (result, ui) = run(&temp, args());

        assert_eq!(result.exit_code, EXIT_VIOLATIONS);
        assert!(ui.has_warning("1 issue(s) in 1 package(s)"));
    }

    #[test]
    fn load_failure_exits_with_two() {
        let temp = project(&[("main.go", "package main\n\nfunc {\n")]);
        let (result, ui) = run(&temp, args());

        assert_eq!(result.exit_code, EXIT_ERROR);
        assert!(ui.has_error("syntax error"));
    }

    #[test]
    fn missing_pattern_directory_exits_with_two() {
        let temp = project(&[]);
        let (result, _) = run(
            &temp,
            LintArgs {
                pattern: "./missing/...".to_string(),
                ..args()
            },
        );

        assert_eq!(result.exit_code, EXIT_ERROR);
    }

    #[test]
    fn disabled_rules_do_not_run() {
        let temp = project(&[
            (".gopolicy.yml", "rules:\n  disable: [pkgerrors]\n"),
            ("main.go", "package main\n\nimport \"errors\"\n\nvar _ = errors.New\n"),
        ]);
        let (result, _) = run(&temp, args());

        assert!(result.success);
    }

    #[test]
    fn unknown_disabled_rule_is_a_config_error() {
        let temp = project(&[(".gopolicy.yml", "rules:\n  disable: [nope]\n")]);
        let (result, ui) = run(&temp, args());

        assert_eq!(result.exit_code, EXIT_ERROR);
        assert!(ui.has_error("nope"));
    }

    #[test]
    fn missing_vet_tool_exits_with_two() {
        let temp = project(&[(
            ".gopolicy.yml",
            "vet:\n  command: gopolicy-missing-vet-tool\n",
        )]);
        let (result, ui) = run(&temp, LintArgs::default());

        assert_eq!(result.exit_code, EXIT_ERROR);
        assert!(ui.has_error("gopolicy-missing-vet-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_vet_tool_fails_the_run() {
        let temp = project(&[
            (
                ".gopolicy.yml",
                "vet:\n  command: /bin/sh\n  args: [\"-c\", \"exit 3\"]\n",
            ),
            ("main.go", "package main\n"),
        ]);
        let (result, ui) = run(&temp, LintArgs::default());

        assert_eq!(result.exit_code, EXIT_VIOLATIONS);
        assert!(ui.has_error("Verification tool"));
    }

    #[cfg(unix)]
    #[test]
    fn passing_vet_tool_and_clean_rules_succeed() {
        let temp = project(&[
            (
                ".gopolicy.yml",
                "vet:\n  command: /bin/sh\n  args: [\"-c\", \"exit 0\"]\n",
            ),
            ("main.go", "package main\n"),
        ]);
        let (result, _) = run(&temp, LintArgs::default());

        assert!(result.success);
    }

    #[test]
    fn json_format_writes_document() {
        let temp = project(&[("main.go", "package main\n\nfunc main() {\n\t// loose\n}\n")]);
        let (result, ui) = run(
            &temp,
            LintArgs {
                format: OutputFormat::Json,
                ..args()
            },
        );

        assert_eq!(result.exit_code, EXIT_VIOLATIONS);
        let parsed: serde_json::Value = serde_json::from_str(ui.data_output()).unwrap();
        assert_eq!(parsed["summary"]["total"], 1);
        assert_eq!(parsed["diagnostics"][0]["rule"], "nocomments");
        assert_eq!(parsed["diagnostics"][0]["file"], "main.go");
        assert_eq!(parsed["diagnostics"][0]["line"], 4);
    }

    #[test]
    fn sarif_format_lists_rules() {
        let temp = project(&[("main.go", "package main\n")]);
        let (result, ui) = run(
            &temp,
            LintArgs {
                format: OutputFormat::Sarif,
                ..args()
            },
        );

        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(ui.data_output()).unwrap();
        assert_eq!(
            parsed["runs"][0]["tool"]["driver"]["rules"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn list_mode_loads_nothing() {
        let temp = project(&[("main.go", "this is not go\n")]);
        let (result, ui) = run(
            &temp,
            LintArgs {
                list: true,
                ..Default::default()
            },
        );

        assert!(result.success);
        assert!(ui.data_output().contains("pkgerrors: "));
    }

    #[test]
    fn tests_flag_includes_test_files() {
        let temp = project(&[
            ("main.go", "package main\n"),
            ("main_test.go", "package main\n\nimport \"errors\"\n\nvar _ = errors.New\n"),
        ]);

        let (without, _) = run(&temp, args());
        let (with, _) = run(
            &temp,
            LintArgs {
                tests: true,
                ..args()
            },
        );

        assert!(without.success);
        assert_eq!(with.exit_code, EXIT_VIOLATIONS);
    }

    #[test]
    fn tools_file_behind_build_tag_is_not_linted() {
        let tools = "//go:build tools\n\npackage main\n\nimport _ \"errors\"\n";
        let temp = project(&[("main.go", "package main\n"), ("tools.go", tools)]);

        let (result, _) = run(&temp, args());
        assert!(result.success);

        let (tagged, _) = run(
            &temp,
            LintArgs {
                tags: vec!["tools".to_string()],
                ..args()
            },
        );
        assert_eq!(tagged.exit_code, EXIT_VIOLATIONS);
    }
}
