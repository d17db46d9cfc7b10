//! Go parsing on top of tree-sitter.
//!
//! The concrete syntax tree is lowered into the [`File`] model in two
//! passes: a flat walk that produces the token/comment stream used for
//! doc linking, and a structural walk that extracts declarations, imports
//! and calls.

use std::path::Path;

use tree_sitter::{Language, Node as TsNode, Parser};

use super::ast::{CallExpr, Decl, DeclKind, Expr, File, GenKeyword, ImportSpec};
use super::comments::{CommentIndex, Item, RawComment, Token};
use super::pos::{FileId, FileSet, Pos};
use crate::error::{PolicyError, Result};

/// Parser for Go source files.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a parser with the Go grammar loaded.
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| PolicyError::Language {
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Parse one file and register it in `fset`.
    ///
    /// Any syntax error fails the whole file.
    pub fn parse_file(&mut self, fset: &mut FileSet, path: &Path, source: &str) -> Result<File> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| PolicyError::ParseFailed {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
                message: "parser produced no tree".to_string(),
            })?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        if let Some(bad) = first_error(root) {
            let at = bad.start_position();
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                let snippet: String = node_text(bad, bytes).chars().take(20).collect();
                format!("unexpected '{}'", snippet.trim())
            };
            return Err(PolicyError::ParseFailed {
                path: path.to_path_buf(),
                line: at.row + 1,
                column: at.column + 1,
                message,
            });
        }

        let id = fset.add_file(path, source);
        let items = token_stream(root, bytes);
        let comments = CommentIndex::build(id, &items);

        let lowering = Lowering {
            file: id,
            source: bytes,
            comments: &comments,
        };

        let mut package = String::new();
        let mut doc = None;
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "package_clause" {
                if let Some(name) = child.named_child(0) {
                    package = node_text(name, bytes).to_string();
                }
                doc = comments.doc_for(child.start_byte());
                break;
            }
        }

        let decls = lowering.decls(root);
        let (imports, calls) = lowering.imports_and_calls(root);

        Ok(File {
            id,
            path: path.to_path_buf(),
            package,
            doc,
            imports,
            decls,
            calls,
            comments: comments.into_groups(),
        })
    }
}

fn node_text<'a>(node: TsNode<'_>, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.start_byte()..node.end_byte()]).unwrap_or("")
}

fn starts_with_identifier(node: TsNode<'_>) -> bool {
    let mut leaf = node;
    while let Some(child) = leaf.child(0) {
        leaf = child;
    }
    leaf.kind().ends_with("identifier")
}

fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Flatten the tree into leaf tokens and comments, in source order.
fn token_stream(root: TsNode<'_>, source: &[u8]) -> Vec<Item> {
    let mut items = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        let descend = if node.kind() == "comment" {
            items.push(Item::Comment(RawComment {
                start: node.start_byte(),
                start_line: node.start_position().row,
                end_line: node.end_position().row,
                text: node_text(node, source).to_string(),
            }));
            false
        } else if node.child_count() == 0 {
            // Newline terminators are not tokens.
            if !node_text(node, source).trim().is_empty() {
                items.push(Item::Token(Token {
                    start: node.start_byte(),
                    line: node.start_position().row,
                }));
            }
            false
        } else {
            true
        };

        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return items;
            }
        }
    }
}

struct Lowering<'a> {
    file: FileId,
    source: &'a [u8],
    comments: &'a CommentIndex,
}

impl Lowering<'_> {
    fn pos(&self, node: TsNode<'_>) -> Pos {
        Pos::new(self.file, node.start_byte())
    }

    fn text(&self, node: TsNode<'_>) -> &str {
        node_text(node, self.source)
    }

    /// Declarations found below `node`, outermost first.
    fn decls(&self, node: TsNode<'_>) -> Vec<Decl> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower(child, &mut out);
        }
        out
    }

    fn lower(&self, node: TsNode<'_>, out: &mut Vec<Decl>) {
        let kind = match node.kind() {
            "import_declaration" => DeclKind::Gen(GenKeyword::Import),
            "const_declaration" => DeclKind::Gen(GenKeyword::Const),
            "var_declaration" => DeclKind::Gen(GenKeyword::Var),
            "type_declaration" => DeclKind::Gen(GenKeyword::Type),
            "function_declaration" | "method_declaration" => DeclKind::Func,
            "type_spec" | "type_alias" => DeclKind::TypeSpec,
            "const_spec" | "var_spec" => DeclKind::ValueSpec,
            "field_declaration" | "method_elem" | "method_spec" | "type_elem" => DeclKind::Field,
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.lower(child, out);
                }
                return;
            }
        };

        let children = if kind == DeclKind::Gen(GenKeyword::Import) {
            Vec::new()
        } else {
            self.decls(node)
        };

        // Interface elements only carry a doc when they start with a name.
        let doc = if node.kind() == "type_elem" && !starts_with_identifier(node) {
            None
        } else {
            self.comments.doc_for(node.start_byte())
        };

        out.push(Decl {
            kind,
            pos: self.pos(node),
            name: node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string()),
            doc,
            children,
        });
    }

    fn imports_and_calls(&self, root: TsNode<'_>) -> (Vec<ImportSpec>, Vec<CallExpr>) {
        let mut imports = Vec::new();
        let mut calls = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_spec" => {
                    if let Some(path) = node.child_by_field_name("path") {
                        imports.push(ImportSpec {
                            pos: self.pos(node),
                            name: node
                                .child_by_field_name("name")
                                .map(|n| self.text(n).to_string()),
                            path: self
                                .text(path)
                                .trim_matches(|c| c == '"' || c == '`')
                                .to_string(),
                        });
                    }
                }
                "call_expression" => {
                    if let Some(function) = node.child_by_field_name("function") {
                        calls.push(CallExpr {
                            pos: self.pos(node),
                            callee: self.expr(function),
                        });
                    }
                }
                _ => {}
            }

            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        (imports, calls)
    }

    fn expr(&self, node: TsNode<'_>) -> Expr {
        match node.kind() {
            "identifier" => Expr::Ident(self.text(node).to_string()),
            "selector_expression" => {
                match (
                    node.child_by_field_name("operand"),
                    node.child_by_field_name("field"),
                ) {
                    (Some(operand), Some(field)) => Expr::Selector {
                        operand: Box::new(self.expr(operand)),
                        field: self.text(field).to_string(),
                    },
                    _ => Expr::Other,
                }
            }
            _ => Expr::Other,
        }
    }
}
