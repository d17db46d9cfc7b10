//! Comment grouping and doc comment linking.
//!
//! Go's parser decides which comment group documents a declaration from the
//! token stream alone: the last comment group before a token is that token's
//! *lead comment* when it ends on the line directly above it. The tree-sitter
//! grammar treats comments as free-floating extras, so the same decision is
//! rebuilt here from a flat list of tokens and comments in source order.

use std::collections::HashMap;

use super::ast::{Comment, CommentGroup};
use super::pos::{FileId, Pos};

/// A non-comment token.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub start: usize,
    /// Line of the token start (0-indexed).
    pub line: usize,
}

/// A comment as found in the tree.
#[derive(Debug, Clone)]
pub(crate) struct RawComment {
    pub start: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

/// An element of the token stream.
#[derive(Debug, Clone)]
pub(crate) enum Item {
    Token(Token),
    Comment(RawComment),
}

/// Comment groups of a file plus the lead comment of every token.
#[derive(Debug, Default)]
pub(crate) struct CommentIndex {
    groups: Vec<CommentGroup>,
    lead: HashMap<usize, usize>,
    tokens: Vec<usize>,
}

impl CommentIndex {
    /// Group the comments of `items` and link lead comments to tokens.
    ///
    /// `items` must be in source order.
    pub fn build(file: FileId, items: &[Item]) -> Self {
        let mut index = CommentIndex::default();
        let mut prev_token_line: Option<usize> = None;
        let mut i = 0;

        while i < items.len() {
            match &items[i] {
                Item::Token(token) => {
                    index.tokens.push(token.start);
                    prev_token_line = Some(token.line);
                    i += 1;
                }
                Item::Comment(_) => {
                    let run_end = items[i..]
                        .iter()
                        .position(|item| matches!(item, Item::Token(_)))
                        .map_or(items.len(), |n| i + n);
                    let run: Vec<&RawComment> = items[i..run_end]
                        .iter()
                        .filter_map(|item| match item {
                            Item::Comment(c) => Some(c),
                            Item::Token(_) => None,
                        })
                        .collect();

                    let mut rest = run.as_slice();
                    if prev_token_line == Some(rest[0].start_line) {
                        // Trailing comment on the line of the previous token.
                        let (taken, _) = take_group(rest, 0);
                        index.push_group(file, &rest[..taken]);
                        rest = &rest[taken..];
                    }

                    let mut last: Option<(usize, usize)> = None;
                    while !rest.is_empty() {
                        let (taken, end_line) = take_group(rest, 1);
                        let group = index.push_group(file, &rest[..taken]);
                        last = Some((group, end_line));
                        rest = &rest[taken..];
                    }

                    if let (Some((group, end_line)), Some(Item::Token(next))) =
                        (last, items.get(run_end))
                    {
                        if end_line + 1 == next.line {
                            index.lead.insert(next.start, group);
                        }
                    }

                    i = run_end;
                }
            }
        }

        index
    }

    fn push_group(&mut self, file: FileId, comments: &[&RawComment]) -> usize {
        self.groups.push(CommentGroup {
            list: comments
                .iter()
                .map(|c| Comment {
                    pos: Pos::new(file, c.start),
                    text: c.text.clone(),
                })
                .collect(),
        });
        self.groups.len() - 1
    }

    /// Doc group of a node starting at byte `start`: the lead comment of the
    /// node's first token.
    pub fn doc_for(&self, start: usize) -> Option<CommentGroup> {
        let first = self.tokens.partition_point(|&t| t < start);
        let token = self.tokens.get(first)?;
        self.lead
            .get(token)
            .and_then(|&group| self.groups.get(group))
            .cloned()
    }

    /// All comment groups in source order.
    pub fn into_groups(self) -> Vec<CommentGroup> {
        self.groups
    }
}

/// Take comments while each starts at most `n` lines after the previous one
/// ended. Returns how many were taken and the end line of the last one.
fn take_group(comments: &[&RawComment], n: usize) -> (usize, usize) {
    let mut end_line = comments[0].start_line;
    let mut taken = 0;
    for comment in comments {
        if comment.start_line > end_line + n {
            break;
        }
        end_line = comment.end_line;
        taken += 1;
    }
    (taken, end_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(start: usize, line: usize) -> Item {
        Item::Token(Token { start, line })
    }

    fn comment(start: usize, line: usize, text: &str) -> Item {
        Item::Comment(RawComment {
            start,
            start_line: line,
            end_line: line,
            text: text.to_string(),
        })
    }

    fn texts(group: &CommentGroup) -> Vec<&str> {
        group.list.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn adjacent_line_comments_form_one_group() {
        let items = vec![
            token(0, 0),
            comment(10, 2, "// a"),
            comment(20, 3, "// b"),
            token(30, 4),
        ];
        let index = CommentIndex::build(FileId(0), &items);

        let doc = index.doc_for(30).unwrap();
        assert_eq!(texts(&doc), vec!["// a", "// b"]);
        assert_eq!(index.into_groups().len(), 1);
    }

    #[test]
    fn blank_line_splits_groups_and_only_last_is_lead() {
        let items = vec![
            token(0, 0),
            comment(10, 2, "// license"),
            comment(20, 4, "// doc"),
            token(30, 5),
        ];
        let index = CommentIndex::build(FileId(0), &items);

        let doc = index.doc_for(30).unwrap();
        assert_eq!(texts(&doc), vec!["// doc"]);
        assert_eq!(index.into_groups().len(), 2);
    }

    #[test]
    fn blank_line_before_token_means_no_lead() {
        let items = vec![token(0, 0), comment(10, 2, "// floating"), token(30, 4)];
        let index = CommentIndex::build(FileId(0), &items);

        assert!(index.doc_for(30).is_none());
    }

    #[test]
    fn trailing_comment_is_its_own_group() {
        let items = vec![
            token(0, 1),
            comment(10, 1, "// trailing"),
            comment(20, 2, "// doc"),
            token(30, 3),
        ];
        let index = CommentIndex::build(FileId(0), &items);

        let doc = index.doc_for(30).unwrap();
        assert_eq!(texts(&doc), vec!["// doc"]);
        assert_eq!(index.into_groups().len(), 2);
    }

    #[test]
    fn trailing_comment_alone_is_never_lead() {
        let items = vec![token(0, 1), comment(10, 1, "// trailing"), token(30, 2)];
        let index = CommentIndex::build(FileId(0), &items);

        assert!(index.doc_for(30).is_none());
    }

    #[test]
    fn doc_lookup_uses_first_token_at_or_after_start() {
        let items = vec![comment(0, 0, "// doc"), token(7, 1), token(12, 1)];
        let index = CommentIndex::build(FileId(0), &items);

        assert!(index.doc_for(5).is_some());
        assert!(index.doc_for(12).is_none());
    }

    #[test]
    fn multi_line_block_comment_uses_its_end_line() {
        let items = vec![
            Item::Comment(RawComment {
                start: 0,
                start_line: 0,
                end_line: 2,
                text: "/* a\nb\n*/".into(),
            }),
            token(12, 3),
        ];
        let index = CommentIndex::build(FileId(0), &items);

        assert!(index.doc_for(12).is_some());
    }
}
