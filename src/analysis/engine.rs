//! The analysis driver.
//!
//! Running a pattern goes through four stages:
//!
//! 1. **Load** - resolve the pattern into compilation units (fatal on failure)
//! 2. **Filter** - drop generated files, skip units left with none
//! 3. **Analyze** - run every rule against every unit on a worker pool
//! 4. **Report** - every diagnostic goes to the caller's reporter and is counted
//!
//! Rule failures, whether returned errors or panics, are isolated: they are
//! logged, counted as faults and the run carries on.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, error, info};

use super::generated::is_generated;
use super::pass::Pass;
use super::registry::RuleRegistry;
use super::reporter::{CountingReporter, Reporter};
use crate::error::Result;
use crate::loader::{CompilationUnit, LoadOptions, Loader};
use crate::syntax::File;

/// Outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Diagnostics reported.
    pub diagnostics: usize,
    /// Rule invocations that failed.
    pub faults: usize,
    /// Units analyzed, not counting fully generated ones.
    pub units: usize,
}

impl RunSummary {
    /// No diagnostics and no faults.
    pub fn is_clean(&self) -> bool {
        self.diagnostics == 0 && self.faults == 0
    }
}

/// Options for [`run_rules`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub load: LoadOptions,
    /// Worker threads; 0 lets rayon decide.
    pub jobs: usize,
}

/// Runs a set of rules over compilation units.
pub struct Engine<'r> {
    rules: &'r RuleRegistry,
    jobs: usize,
}

impl<'r> Engine<'r> {
    /// Create an engine running `rules` in registry order.
    pub fn new(rules: &'r RuleRegistry) -> Self {
        Self { rules, jobs: 0 }
    }

    /// Set the number of worker threads (0 lets rayon decide).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Analyze `units`, sending diagnostics to `reporter`.
    pub fn run(&self, units: &[CompilationUnit], reporter: &dyn Reporter) -> Result<RunSummary> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start worker pool: {}", e))?;

        let counter = CountingReporter::new(reporter);
        let (units_analyzed, faults) = pool.install(|| {
            units
                .par_iter()
                .map(|unit| self.analyze(unit, &counter))
                .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
        });

        let summary = RunSummary {
            diagnostics: counter.count(),
            faults,
            units: units_analyzed,
        };
        info!(
            diagnostics = summary.diagnostics,
            faults = summary.faults,
            units = summary.units,
            "analysis finished"
        );
        Ok(summary)
    }

    /// Run every rule on one unit. Returns (units analyzed, faults).
    fn analyze(&self, unit: &CompilationUnit, reporter: &dyn Reporter) -> (usize, usize) {
        let files: Vec<&File> = unit
            .files()
            .iter()
            .filter(|file| {
                let generated = is_generated(file);
                if generated {
                    debug!(file = %file.path().display(), "skipping generated file");
                }
                !generated
            })
            .collect();
        if files.is_empty() {
            debug!(unit = unit.id(), "no files left to analyze");
            return (0, 0);
        }

        let mut faults = 0;
        for rule in self.rules.iter() {
            let pass = Pass::new(rule.name(), unit, files.clone(), reporter);
            match catch_unwind(AssertUnwindSafe(|| rule.run(&pass))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(rule = rule.name(), unit = unit.id(), "rule failed: {:#}", e);
                    faults += 1;
                }
                Err(panic) => {
                    let reason = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!(rule = rule.name(), unit = unit.id(), "rule panicked: {}", reason);
                    faults += 1;
                }
            }
        }
        (1, faults)
    }
}

/// Load `pattern` below `root` and run `rules` over the result.
///
/// # Errors
///
/// Load failures are returned before any rule runs.
pub fn run_rules(
    root: &Path,
    pattern: &str,
    rules: &RuleRegistry,
    options: &RunOptions,
    reporter: &dyn Reporter,
) -> Result<RunSummary> {
    let units = Loader::new(root)
        .with_options(options.load.clone())
        .load(pattern)?;
    debug!(count = units.len(), "loaded units");

    Engine::new(rules)
        .with_jobs(options.jobs)
        .run(&units, reporter)
}
