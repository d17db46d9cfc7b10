//! Built-in policy rules.
//!
//! - [`PkgErrorsRule`] (`pkgerrors`) - errors must come from `github.com/pkg/errors`
//! - [`NoCommentsRule`] (`nocomments`) - only documentation and marked notes

mod no_comments;
mod pkg_errors;

#[cfg(test)]
pub(crate) mod testing;

pub use no_comments::{NoCommentsRule, MSG_NO_COMMENTS, NOTE_PREFIXES};
pub use pkg_errors::{PkgErrorsRule, MSG_PKG_ERRORS};
