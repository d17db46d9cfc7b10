//! Integration tests for the public analysis API.

use gopolicy::analysis::{
    list_rules, run_rules, Diagnostic, Engine, Message, Pass, RecordingReporter, Rule,
    RuleRegistry, RunOptions, MSG_NO_COMMENTS, MSG_PKG_ERRORS,
};
use gopolicy::loader::{LoadOptions, Loader};
use gopolicy::PolicyError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), "module example.com/demo\n").unwrap();
    for (name, content) in files {
        let path = temp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

fn lint(temp: &TempDir) -> Vec<Diagnostic> {
    let reporter = RecordingReporter::new();
    let summary = run_rules(
        temp.path(),
        "./...",
        &RuleRegistry::with_builtins(),
        &RunOptions::default(),
        &reporter,
    )
    .unwrap();
    assert_eq!(summary.faults, 0);
    let diagnostics = reporter.into_diagnostics();
    assert_eq!(summary.diagnostics, diagnostics.len());
    diagnostics
}

#[test]
fn errors_import_is_flagged() {
    let temp = setup_project(&[("a.go", "package demo\n\nimport \"errors\"\n")]);
    let diagnostics = lint(&temp);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "pkgerrors");
    assert_eq!(diagnostics[0].message, MSG_PKG_ERRORS.text());
    assert_eq!(diagnostics[0].to_string().split(' ').next(), Some("a.go:3:8:"));
}

#[test]
fn free_floating_comment_is_flagged() {
    let temp = setup_project(&[(
        "a.go",
        "package demo\n\n// TODO fix this\n\nvar x = 1\n",
    )]);
    let diagnostics = lint(&temp);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "nocomments");
    assert_eq!(diagnostics[0].message, MSG_NO_COMMENTS.text());
    assert_eq!(diagnostics[0].position.line, 3);
}

#[test]
fn note_comment_is_allowed() {
    let temp = setup_project(&[(
        "a.go",
        "package demo\n\n//! TODO fix this\n\nvar x = 1\n",
    )]);

    assert!(lint(&temp).is_empty());
}

#[test]
fn function_doc_is_allowed() {
    let temp = setup_project(&[(
        "a.go",
        "package demo\n\n// Run does the work.\nfunc Run() {}\n",
    )]);

    assert!(lint(&temp).is_empty());
}

#[test]
fn listing_loads_nothing() {
    let infos = list_rules(&RuleRegistry::with_builtins());
    let rendered: String = infos.iter().map(ToString::to_string).collect();

    assert_eq!(infos.len(), 2);
    assert_eq!(rendered.lines().filter(|l| !l.starts_with("  - ")).count(), 2);
    assert!(rendered.contains(MSG_PKG_ERRORS.text()));
    assert!(rendered.contains(MSG_NO_COMMENTS.text()));
}

#[test]
fn aliased_fmt_errorf_is_flagged() {
    let temp = setup_project(&[(
        "a.go",
        "package demo\n\nimport f \"fmt\"\n\n// Fail fails.\nfunc Fail() error {\n\treturn f.Errorf(\"boom\")\n}\n",
    )]);
    let diagnostics = lint(&temp);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "pkgerrors");
    assert_eq!(diagnostics[0].position.line, 7);
    assert_eq!(diagnostics[0].position.column, 9);
}

#[test]
fn generated_files_are_filtered() {
    let temp = setup_project(&[
        (
            "gen.go",
            "// Code generated by mockgen. DO NOT EDIT.\n\npackage demo\n\nimport \"errors\"\n\n// stray\nvar e = errors.New(\"x\")\n",
        ),
        ("a.go", "package demo\n"),
    ]);

    assert!(lint(&temp).is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let temp = setup_project(&[
        ("a.go", "package demo\n\nimport \"errors\"\n\nvar e = errors.New(\"x\")\n"),
        ("sub/b.go", "package sub\n\nfunc B() {\n\t// loose\n}\n"),
        ("sub/c.go", "package sub\n\n// one\n// two\nvar c = 1\n\n// three\n\nvar d = 2\n"),
    ]);

    let first = lint(&temp);
    let second = lint(&temp);

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn load_errors_are_fatal() {
    let temp = setup_project(&[("a.go", "package demo\n\nfunc (\n")]);
    let result = run_rules(
        temp.path(),
        "./...",
        &RuleRegistry::with_builtins(),
        &RunOptions::default(),
        &RecordingReporter::new(),
    );

    assert!(matches!(result, Err(PolicyError::ParseFailed { .. })));
}

#[test]
fn missing_pattern_is_fatal() {
    let temp = setup_project(&[]);
    let result = run_rules(
        temp.path(),
        "./missing/...",
        &RuleRegistry::with_builtins(),
        &RunOptions::default(),
        &RecordingReporter::new(),
    );

    assert!(matches!(result, Err(PolicyError::PatternNotFound { .. })));
}

const MSG_IMPORT: Message = Message::new("imports are not allowed here");

struct NoImports;

impl Rule for NoImports {
    fn name(&self) -> &'static str {
        "noimports"
    }

    fn doc(&self) -> &'static str {
        "forbids imports"
    }

    fn messages(&self) -> &'static [Message] {
        &[MSG_IMPORT]
    }

    fn run(&self, pass: &Pass<'_>) -> anyhow::Result<()> {
        for file in pass.files() {
            for import in &file.imports {
                MSG_IMPORT.report(pass, import.pos);
            }
        }
        Ok(())
    }
}

#[test]
fn custom_rules_plug_into_the_engine() {
    let temp = setup_project(&[
        ("a.go", "package demo\n\nimport (\n\t\"os\"\n\t\"strings\"\n)\n"),
        ("util/u.go", "package util\n\nimport \"io\"\n"),
    ]);
    let units = Loader::new(temp.path())
        .with_options(LoadOptions::default())
        .load("./...")
        .unwrap();

    let mut rules = RuleRegistry::new();
    rules.register(Box::new(NoImports));
    let reporter = RecordingReporter::new();
    let summary = Engine::new(&rules)
        .with_jobs(2)
        .run(&units, &reporter)
        .unwrap();

    assert_eq!(summary.units, 2);
    assert_eq!(summary.diagnostics, 3);
    let diagnostics = reporter.into_diagnostics();
    assert!(diagnostics.iter().all(|d| d.rule == "noimports"));
    assert_eq!(
        diagnostics
            .iter()
            .map(|d| d.position.filename.as_path())
            .filter(|p| *p == Path::new("a.go"))
            .count(),
        2
    );
}
