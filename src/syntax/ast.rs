//! Syntax model for Go files.
//!
//! This is not a general-purpose Go AST. It keeps only the node kinds the
//! policy rules classify: import specs, call expressions, comment groups and
//! the declarations that may own a documentation comment group.

use std::path::{Path, PathBuf};

use super::pos::{FileId, Pos};

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Position of the comment's first byte.
    pub pos: Pos,
    /// Raw comment text, including the comment markers.
    pub text: String,
}

/// A sequence of comments with no other tokens and no blank lines between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

/// One import of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Start of the import: the local name if present, else the path literal.
    pub pos: Pos,
    /// Explicit local name (`f`, `_` or `.`), if any.
    pub name: Option<String>,
    /// Import path without quotes.
    pub path: String,
}

/// Shape of a call's callee, as far as the rules care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A plain identifier, `Foo`.
    Ident(String),
    /// A selector, `operand.field`.
    Selector { operand: Box<Expr>, field: String },
    /// Anything else: calls, indexes, parenthesized expressions, literals.
    Other,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// Start of the callee expression.
    pub pos: Pos,
    pub callee: Expr,
}

impl CallExpr {
    /// For `pkg.Func(...)` calls, return `("pkg", "Func")`.
    ///
    /// Chained (`a.b.Func`) and computed (`f().Func`) selectors return `None`.
    pub fn qualified_callee(&self) -> Option<(&str, &str)> {
        match &self.callee {
            Expr::Selector { operand, field } => match operand.as_ref() {
                Expr::Ident(name) => Some((name.as_str(), field.as_str())),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Keyword of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKeyword {
    Import,
    Const,
    Var,
    Type,
}

/// The kinds of declaration that can own a doc comment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `import`, `const`, `var` or `type` declaration, grouped or not.
    Gen(GenKeyword),
    /// Function or method declaration.
    Func,
    /// One type spec (`Name T` or `Name = T`).
    TypeSpec,
    /// One `const` or `var` spec.
    ValueSpec,
    /// A struct field or an interface element.
    Field,
}

/// A declaration together with its documentation and nested declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    /// Position of the declaration's first token.
    pub pos: Pos,
    /// Declared name, where the declaration has a single one.
    pub name: Option<String>,
    /// Doc comment group linked to this declaration.
    pub doc: Option<CommentGroup>,
    /// Declarations nested inside this one: specs of a group, fields of
    /// a struct type, local declarations of a function body.
    pub children: Vec<Decl>,
}

/// Node kinds visited by [`File::inspect`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Import(&'a ImportSpec),
    Decl(&'a Decl),
    Call(&'a CallExpr),
}

/// A parsed Go file.
#[derive(Debug, Clone)]
pub struct File {
    pub id: FileId,
    pub path: PathBuf,
    /// Name from the package clause.
    pub package: String,
    /// Comment group immediately preceding the package clause.
    pub doc: Option<CommentGroup>,
    pub imports: Vec<ImportSpec>,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
    /// Every call expression in the file, in source order.
    pub calls: Vec<CallExpr>,
    /// Every comment group in the file, in source order.
    pub comments: Vec<CommentGroup>,
}

impl File {
    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Visit every import, declaration (depth first, parents before
    /// children) and call of the file. Comments are reached through
    /// [`File::all_comments`].
    pub fn inspect<'a>(&'a self, mut visit: impl FnMut(Node<'a>)) {
        for import in &self.imports {
            visit(Node::Import(import));
        }
        let mut stack: Vec<&'a Decl> = self.decls.iter().rev().collect();
        while let Some(decl) = stack.pop() {
            visit(Node::Decl(decl));
            stack.extend(decl.children.iter().rev());
        }
        for call in &self.calls {
            visit(Node::Call(call));
        }
    }

    /// Iterate over every comment of the file.
    pub fn all_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().flat_map(|g| g.list.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize) -> Pos {
        Pos::new(FileId(0), offset)
    }

    fn decl(kind: DeclKind, offset: usize, children: Vec<Decl>) -> Decl {
        Decl {
            kind,
            pos: pos(offset),
            name: None,
            doc: None,
            children,
        }
    }

    #[test]
    fn qualified_callee_matches_simple_selector() {
        let call = CallExpr {
            pos: pos(0),
            callee: Expr::Selector {
                operand: Box::new(Expr::Ident("fmt".into())),
                field: "Errorf".into(),
            },
        };
        assert_eq!(call.qualified_callee(), Some(("fmt", "Errorf")));
    }

    #[test]
    fn qualified_callee_ignores_chained_selector() {
        let call = CallExpr {
            pos: pos(0),
            callee: Expr::Selector {
                operand: Box::new(Expr::Selector {
                    operand: Box::new(Expr::Ident("a".into())),
                    field: "fmt".into(),
                }),
                field: "Errorf".into(),
            },
        };
        assert_eq!(call.qualified_callee(), None);
    }

    #[test]
    fn qualified_callee_ignores_plain_identifier() {
        let call = CallExpr {
            pos: pos(0),
            callee: Expr::Ident("Errorf".into()),
        };
        assert_eq!(call.qualified_callee(), None);
    }

    #[test]
    fn inspect_visits_nested_declarations_in_order() {
        let file = File {
            id: FileId(0),
            path: PathBuf::from("a.go"),
            package: "a".into(),
            doc: None,
            imports: vec![],
            decls: vec![
                decl(
                    DeclKind::Gen(GenKeyword::Type),
                    10,
                    vec![decl(
                        DeclKind::TypeSpec,
                        15,
                        vec![decl(DeclKind::Field, 30, vec![])],
                    )],
                ),
                decl(DeclKind::Func, 50, vec![]),
            ],
            calls: vec![],
            comments: vec![],
        };

        let mut seen = Vec::new();
        file.inspect(|node| {
            if let Node::Decl(d) = node {
                seen.push(d.pos.offset);
            }
        });

        assert_eq!(seen, vec![10, 15, 30, 50]);
    }

    #[test]
    fn all_comments_flattens_groups_in_order() {
        let comment = |offset, text: &str| Comment {
            pos: pos(offset),
            text: text.into(),
        };
        let file = File {
            id: FileId(0),
            path: PathBuf::from("a.go"),
            package: "a".into(),
            doc: None,
            imports: vec![],
            decls: vec![],
            calls: vec![],
            comments: vec![
                CommentGroup {
                    list: vec![comment(0, "// a"), comment(5, "// b")],
                },
                CommentGroup {
                    list: vec![comment(20, "/* c */")],
                },
            ],
        };

        let texts: Vec<_> = file.all_comments().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["// a", "// b", "/* c */"]);
    }
}
