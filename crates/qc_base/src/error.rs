//! Error types with source location tracking.
//!
//! The interpreter distinguishes two error kinds, both carrying a
//! [`SourceContext`] so the failure can be rendered pointing at the exact
//! token that triggered it:
//!
//! - [`Error::Parse`] — raised by the tokenizer or the grammar engine.
//! - [`Error::Exec`] — raised by the evaluator.
//!
//! # Example
//!
//! ```
//! use qc_base::{Error, SourceContext};
//!
//! let ctx = SourceContext::new("a", "a;", 1, 0);
//! let err = Error::exec(ctx, "Undefined variable a");
//! assert!(err.to_string().contains("Undefined variable a"));
//! ```

use crate::context::SourceContext;
use std::fmt;

/// A parse- or exec-time failure, annotated with the source position of the
/// token that raised it.
#[derive(Debug, Clone)]
pub enum Error {
    /// Raised by the tokenizer (e.g. `"Missing exponent"`) or the parser
    /// (e.g. `"Missing <rule>"`, arity mismatches).
    Parse {
        context: SourceContext,
        message: String,
    },
    /// Raised by the evaluator (undefined variables, sort mismatches, shape
    /// failures surfaced from the matrix layer).
    Exec {
        context: SourceContext,
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::Parse`].
    pub fn parse(context: SourceContext, message: impl Into<String>) -> Self {
        Error::Parse {
            context,
            message: message.into(),
        }
    }

    /// Builds a [`Error::Exec`].
    pub fn exec(context: SourceContext, message: impl Into<String>) -> Self {
        Error::Exec {
            context,
            message: message.into(),
        }
    }

    /// The source context the error was raised from.
    pub fn context(&self) -> &SourceContext {
        match self {
            Error::Parse { context, .. } => context,
            Error::Exec { context, .. } => context,
        }
    }

    /// The bare error message, without the rendered context.
    pub fn message(&self) -> &str {
        match self {
            Error::Parse { message, .. } => message,
            Error::Exec { message, .. } => message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.context().render(self.message()))
    }
}

impl std::error::Error for Error {}

/// Alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SourceContext {
        SourceContext::new("a", "a;", 1, 0)
    }

    #[test]
    fn parse_error_renders_context() {
        let err = Error::parse(ctx(), "Missing exponent");
        let rendered = err.to_string();
        assert!(rendered.contains("Missing exponent"));
        assert!(rendered.contains("a;"));
    }

    #[test]
    fn exec_error_exposes_message_and_context() {
        let err = Error::exec(ctx(), "Undefined variable a");
        assert_eq!(err.message(), "Undefined variable a");
        assert_eq!(err.context().line(), "a;");
    }
}
