//! Error-convention rule.
//!
//! Errors should carry stack traces, so the standard `errors` package and
//! `fmt.Errorf` are replaced by `github.com/pkg/errors`.

use crate::analysis::{Message, Pass, Rule};
use crate::syntax::Node;

/// Reported for the `errors` import and for `fmt.Errorf` calls.
pub const MSG_PKG_ERRORS: Message = Message::new(
    "use github.com/pkg/errors: errors.WithStack by default and errors.Wrap only if it will be unwrapped",
);

const MESSAGES: &[Message] = &[MSG_PKG_ERRORS];

const STD_ERRORS: &str = "errors";
const FMT: &str = "fmt";
const ERRORF: &str = "Errorf";

/// Flags the standard `errors` import and `fmt.Errorf` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PkgErrorsRule;

impl Rule for PkgErrorsRule {
    fn name(&self) -> &'static str {
        "pkgerrors"
    }

    fn doc(&self) -> &'static str {
        "checks that github.com/pkg/errors is used instead of the standard errors package or fmt.Errorf"
    }

    fn messages(&self) -> &'static [Message] {
        MESSAGES
    }

    fn run(&self, pass: &Pass<'_>) -> anyhow::Result<()> {
        let types = pass.types();
        for file in pass.files() {
            file.inspect(|node| match node {
                Node::Import(spec) if spec.path == STD_ERRORS => {
                    MSG_PKG_ERRORS.report(pass, spec.pos);
                }
                Node::Call(call) => {
                    let Some((operand, function)) = call.qualified_callee() else {
                        return;
                    };
                    if function == ERRORF && types.resolve_package(file.id, operand) == Some(FMT) {
                        MSG_PKG_ERRORS.report(pass, call.pos);
                    }
                }
                _ => {}
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::rules::testing::check;

    #[test]
    fn flags_errors_import() {
        let found = check(&PkgErrorsRule, "package a\n\nimport \"errors\"\n\nvar _ = errors.New\n");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.to_string(), "a.go:3:8");
        assert_eq!(found[0].message, MSG_PKG_ERRORS.text());
        assert_eq!(found[0].rule, "pkgerrors");
    }

    #[test]
    fn flags_errors_import_inside_group_at_alias() {
        let src = "package a\n\nimport (\n\t\"fmt\"\n\tstderr \"errors\"\n)\n";
        let found = check(&PkgErrorsRule, src);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.to_string(), "a.go:5:2");
    }

    #[test]
    fn allows_pkg_errors_import() {
        let src = "package a\n\nimport \"github.com/pkg/errors\"\n\nvar _ = errors.New\n";
        assert!(check(&PkgErrorsRule, src).is_empty());
    }

    #[test]
    fn flags_fmt_errorf() {
        let src = "package a\n\nimport \"fmt\"\n\nfunc f() error {\n\treturn fmt.Errorf(\"x %d\", 1)\n}\n";
        let found = check(&PkgErrorsRule, src);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.to_string(), "a.go:6:9");
    }

    #[test]
    fn flags_aliased_fmt() {
        let src = "package a\n\nimport f \"fmt\"\n\nvar err = f.Errorf(\"x\")\n";
        let found = check(&PkgErrorsRule, src);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.to_string(), "a.go:5:11");
    }

    #[test]
    fn ignores_other_functions_and_packages() {
        let src = "package a\n\nimport (\n\t\"fmt\"\n\tother \"example.com/other\"\n)\n\n\
                   var s = fmt.Sprintf(\"x\")\nvar e = other.Errorf(\"x\")\n";
        assert!(check(&PkgErrorsRule, src).is_empty());
    }

    #[test]
    fn ignores_chained_and_computed_selectors() {
        let src = "package a\n\nimport \"fmt\"\n\nvar _ = fmt\n\n\
                   func g() {\n\ta.b.Errorf(\"x\")\n\tget().Errorf(\"x\")\n}\n";
        assert!(check(&PkgErrorsRule, src).is_empty());
    }

    #[test]
    fn ignores_errorf_without_fmt_import() {
        let src = "package a\n\nfunc g() {\n\tfmt.Errorf(\"x\")\n}\n";
        assert!(check(&PkgErrorsRule, src).is_empty());
    }

    #[test]
    fn flags_nested_calls() {
        let src = "package a\n\nimport \"fmt\"\n\nfunc g() {\n\twrap(fmt.Errorf(\"x\"))\n}\n";
        let found = check(&PkgErrorsRule, src);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position.to_string(), "a.go:6:7");
    }
}
