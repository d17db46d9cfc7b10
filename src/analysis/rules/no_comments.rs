//! Comment-placement rule.
//!
//! Code should explain itself. The only comments allowed are documentation
//! (the file header and the doc comments of declarations) and notes
//! explicitly marked as important with `//!` or `/*!`.

use std::collections::HashSet;

use crate::analysis::{Message, Pass, Rule};
use crate::syntax::{Comment, CommentGroup, File, Node, Pos};

/// Reported once per comment that is neither documentation nor marked.
pub const MSG_NO_COMMENTS: Message =
    Message::new("write self-commenting code; use //! prefix if truly important");

const MESSAGES: &[Message] = &[MSG_NO_COMMENTS];

/// Raw comment prefixes marking an intentional note.
pub const NOTE_PREFIXES: [&str; 2] = ["//!", "/*!"];

/// Flags free-standing comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommentsRule;

impl Rule for NoCommentsRule {
    fn name(&self) -> &'static str {
        "nocomments"
    }

    fn doc(&self) -> &'static str {
        "disallows comments except godoc and //! for important notes"
    }

    fn messages(&self) -> &'static [Message] {
        MESSAGES
    }

    fn run(&self, pass: &Pass<'_>) -> anyhow::Result<()> {
        for file in pass.files() {
            let docs = doc_positions(file);
            for comment in file.all_comments() {
                if !docs.contains(&comment.pos) && !is_note(comment) {
                    MSG_NO_COMMENTS.report(pass, comment.pos);
                }
            }
        }
        Ok(())
    }
}

/// Positions of every comment that documents the file or a declaration.
fn doc_positions(file: &File) -> HashSet<Pos> {
    let mut docs = HashSet::new();
    let mut add = |group: &CommentGroup| docs.extend(group.list.iter().map(|c| c.pos));

    if let Some(doc) = &file.doc {
        add(doc);
    }
    file.inspect(|node| {
        if let Node::Decl(decl) = node {
            if let Some(doc) = &decl.doc {
                add(doc);
            }
        }
    });
    docs
}

fn is_note(comment: &Comment) -> bool {
    NOTE_PREFIXES.iter().any(|p| comment.text.starts_with(p))
}
