//! Generated file detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::syntax::File;

/// The marker `go generate` tools write into their output: a line comment
/// starting with `// Code generated` and ending with `DO NOT EDIT.`.
static GENERATED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// Code generated.*DO NOT EDIT\.$").expect("Invalid generated marker regex")
});

/// Whether any comment of `file` is a generated-code marker.
pub fn is_generated(file: &File) -> bool {
    file.all_comments()
        .any(|c| GENERATED_MARKER.is_match(&c.text))
}
