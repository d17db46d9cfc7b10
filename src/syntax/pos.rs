//! Source positions.
//!
//! A [`Pos`] is a compact (file, byte offset) pair carried by syntax nodes.
//! The [`FileSet`] owning the files resolves it into a human-readable
//! [`Position`] with 1-indexed line and column.

use std::fmt;
use std::path::{Path, PathBuf};

/// Index of a file inside its [`FileSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A location in a file, as a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// File containing this position.
    pub file: FileId,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Pos {
    /// Create a position.
    pub fn new(file: FileId, offset: usize) -> Self {
        Self { file, offset }
    }
}

/// A resolved source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// File path as the loader saw it.
    pub filename: PathBuf,
    /// Line (1-indexed).
    pub line: usize,
    /// Column in bytes (1-indexed).
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename.display(), self.line, self.column)
    }
}

#[derive(Debug, Clone)]
struct SourceFile {
    name: PathBuf,
    line_starts: Vec<usize>,
}

/// The set of files of one compilation unit, used to resolve positions.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<SourceFile>,
}

impl FileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and its contents, returning its id.
    pub fn add_file(&mut self, name: impl Into<PathBuf>, source: &str) -> FileId {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile {
            name: name.into(),
            line_starts,
        });
        id
    }

    /// Path of a registered file.
    pub fn file_name(&self, id: FileId) -> Option<&Path> {
        self.files.get(id.0 as usize).map(|f| f.name.as_path())
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no files are registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a position to line and column.
    ///
    /// Positions from an unknown file resolve to an empty filename at 0:0.
    pub fn position(&self, pos: Pos) -> Position {
        let Some(file) = self.files.get(pos.file.0 as usize) else {
            return Position {
                filename: PathBuf::new(),
                line: 0,
                column: 0,
            };
        };

        let line_index = file
            .line_starts
            .partition_point(|&start| start <= pos.offset)
            .saturating_sub(1);
        let line_start = file.line_starts[line_index];

        Position {
            filename: file.name.clone(),
            line: line_index + 1,
            column: pos.offset - line_start + 1,
        }
    }
}
