//! Build constraints.
//!
//! The go tool leaves a file out of its package when the file does not
//! build for the target platform. Two things decide that:
//!
//! - `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name suffixes
//!   (`poll_windows.go`, `asm_arm64.go`)
//! - a `//go:build` expression in the file header, or legacy
//!   `// +build` lines when there is no `//go:build` line
//!
//! Constraints are evaluated against a [`BuildContext`], normally the host
//! platform plus any configured tags.
//!
//! # Example
//!
//! ```
//! use gopolicy::loader::BuildContext;
//! use std::path::Path;
//!
//! let ctx = BuildContext::new("linux", "amd64");
//! assert!(ctx.matches_file_name("poll_linux.go"));
//! assert!(!ctx.matches_file_name("poll_windows.go"));
//!
//! let tools = "//go:build tools\n\npackage tools\n";
//! assert!(!ctx.matches_header(Path::new("tools.go"), tools).unwrap());
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PolicyError, Result};

static RELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^go1\.\d+$").expect("Invalid release tag regex"));

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Target platform and tags that build constraints are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    goos: String,
    goarch: String,
    tags: Vec<String>,
}

impl BuildContext {
    /// Context for an explicit GOOS/GOARCH pair.
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            tags: Vec::new(),
        }
    }

    /// Context for the platform gopolicy is running on.
    pub fn host() -> Self {
        Self::new(host_goos(), host_goarch())
    }

    /// Add user build tags (`go build -tags`).
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Target operating system, Go spelling.
    pub fn goos(&self) -> &str {
        &self.goos
    }

    /// Target architecture, Go spelling.
    pub fn goarch(&self) -> &str {
        &self.goarch
    }

    /// Whether a single build tag is satisfied.
    pub fn has_tag(&self, tag: &str) -> bool {
        tag == self.goos
            || tag == self.goarch
            || (tag == "linux" && self.goos == "android")
            || (tag == "solaris" && self.goos == "illumos")
            || (tag == "darwin" && self.goos == "ios")
            || (tag == "unix" && UNIX_OS.contains(&self.goos.as_str()))
            || tag == "gc"
            || tag == "cgo"
            || RELEASE_TAG.is_match(tag)
            || self.tags.iter().any(|t| t == tag)
    }

    /// Whether a file name's `_GOOS`/`_GOARCH` suffixes allow the file.
    pub fn matches_file_name(&self, name: &str) -> bool {
        let stem = name.split('.').next().unwrap_or(name);
        let stem = stem.strip_suffix("_test").unwrap_or(stem);
        let Some(index) = stem.find('_') else {
            return true;
        };

        let parts: Vec<&str> = stem[index..].split('_').collect();
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 2]) && self.has_tag(parts[n - 1]);
        }
        let last = parts[n - 1];
        if KNOWN_OS.contains(&last) || KNOWN_ARCH.contains(&last) {
            return self.has_tag(last);
        }
        true
    }

    /// Whether the constraint lines in `source`'s header allow the file.
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` for a malformed constraint expression.
    pub fn matches_header(&self, path: &Path, source: &str) -> Result<bool> {
        let header = scan_header(source);
        let invalid = |line: usize, message: String| PolicyError::ParseFailed {
            path: path.to_path_buf(),
            line,
            column: 1,
            message,
        };

        if let Some((line, text)) = header.go_build {
            let expr = parse_expr(text).map_err(|m| invalid(line, m))?;
            return Ok(expr.eval(self));
        }

        // Options are ORed, comma-separated terms ANDed, lines ANDed.
        for (line, text) in header.plus_build {
            let mut allowed = false;
            for option in text.split_whitespace() {
                let mut all = true;
                for term in option.split(',') {
                    let (negated, tag) = match term.strip_prefix('!') {
                        Some(tag) => (true, tag),
                        None => (false, term),
                    };
                    if tag.is_empty() || tag.starts_with('!') {
                        return Err(invalid(line, format!("invalid +build line: {text}")));
                    }
                    all &= self.has_tag(tag) != negated;
                }
                allowed |= all;
            }
            if !allowed {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        other => other,
    }
}

/// Constraint lines found before the package clause, with 1-indexed lines.
#[derive(Debug, Default)]
struct Header<'a> {
    go_build: Option<(usize, &'a str)>,
    plus_build: Vec<(usize, &'a str)>,
}

/// Scan the leading comments of a file.
///
/// `// +build` lines only count when a blank line follows them before the
/// first non-comment line.
fn scan_header(source: &str) -> Header<'_> {
    let mut header = Header::default();
    let mut pending = Vec::new();
    let mut in_block = false;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if in_block {
            if let Some((_, rest)) = line.split_once("*/") {
                in_block = false;
                if !rest.trim().is_empty() && !rest.trim().starts_with("//") {
                    break;
                }
            }
            continue;
        }
        if line.is_empty() {
            header.plus_build.append(&mut pending);
            continue;
        }
        if let Some(rest) = line.strip_prefix("/*") {
            in_block = !rest.contains("*/");
            continue;
        }
        let Some(comment) = line.strip_prefix("//") else {
            break;
        };

        if let Some(expr) = directive(comment, "go:build") {
            header.go_build.get_or_insert((index + 1, expr));
        } else if let Some(expr) = directive(comment.trim_start(), "+build") {
            pending.push((index + 1, expr));
        }
    }

    header
}

/// Text after `name` when the comment is exactly that directive.
fn directive<'a>(comment: &'a str, name: &str) -> Option<&'a str> {
    let rest = comment.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with([' ', '\t']) {
        Some(rest.trim())
    } else {
        None
    }
}

/// A `//go:build` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, ctx: &BuildContext) -> bool {
        match self {
            Expr::Tag(tag) => ctx.has_tag(tag),
            Expr::Not(inner) => !inner.eval(ctx),
            Expr::And(a, b) => a.eval(ctx) && b.eval(ctx),
            Expr::Or(a, b) => a.eval(ctx) || b.eval(ctx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Tag(&'a str),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(text: &str) -> std::result::Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let (token, len) = if rest.starts_with("&&") {
            (Token::And, 2)
        } else if rest.starts_with("||") {
            (Token::Or, 2)
        } else if rest.starts_with('!') {
            (Token::Not, 1)
        } else if rest.starts_with('(') {
            (Token::Open, 1)
        } else if rest.starts_with(')') {
            (Token::Close, 1)
        } else {
            let len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                .unwrap_or(rest.len());
            if len == 0 {
                let c = rest.chars().next().unwrap_or_default();
                return Err(format!("unexpected '{c}' in build constraint"));
            }
            (Token::Tag(&rest[..len]), len)
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    Ok(tokens)
}

fn parse_expr(text: &str) -> std::result::Result<Expr, String> {
    let tokens = tokenize(text)?;
    let mut parser = ExprParser { tokens, next: 0 };
    let expr = parser.or()?;
    if parser.next != parser.tokens.len() {
        return Err(format!("unexpected tokens in build constraint: {text}"));
    }
    Ok(expr)
}

struct ExprParser<'a> {
    tokens: Vec<Token<'a>>,
    next: usize,
}

impl ExprParser<'_> {
    fn eat(&mut self, token: &Token<'_>) -> bool {
        if self.tokens.get(self.next) == Some(token) {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> std::result::Result<Expr, String> {
        let mut expr = self.and()?;
        while self.eat(&Token::Or) {
            expr = Expr::Or(Box::new(expr), Box::new(self.and()?));
        }
        Ok(expr)
    }

    fn and(&mut self) -> std::result::Result<Expr, String> {
        let mut expr = self.unary()?;
        while self.eat(&Token::And) {
            expr = Expr::And(Box::new(expr), Box::new(self.unary()?));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> std::result::Result<Expr, String> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Open) {
            let expr = self.or()?;
            if !self.eat(&Token::Close) {
                return Err("missing ')' in build constraint".to_string());
            }
            return Ok(expr);
        }
        match self.tokens.get(self.next) {
            Some(Token::Tag(tag)) => {
                self.next += 1;
                Ok(Expr::Tag(tag.to_string()))
            }
            _ => Err("expected a build tag".to_string()),
        }
    }
}
