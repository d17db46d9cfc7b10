//! Go syntax: positions, the rule-facing syntax model and the parser.
//!
//! - [`pos`] - Byte positions and their line/column resolution
//! - [`ast`] - Import specs, calls, comment groups and doc-carrying declarations
//! - [`parser`] - tree-sitter based parser producing [`File`]s

pub mod ast;
mod comments;
pub mod parser;
pub mod pos;

pub use ast::{
    CallExpr, Comment, CommentGroup, Decl, DeclKind, Expr, File, GenKeyword, ImportSpec, Node,
};
pub use parser::GoParser;
pub use pos::{FileId, FileSet, Pos, Position};
