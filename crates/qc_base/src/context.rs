//! Source location tracking for tokens, commands, values, and errors.
//!
//! Unlike a byte-offset span, a [`SourceContext`] carries the actual line
//! text alongside the column so a diagnostic can be rendered without going
//! back to the original input buffer.
//!
//! # Example
//!
//! ```
//! use qc_base::SourceContext;
//!
//! let ctx = SourceContext::new("let", "let a = 1;", 1, 0);
//! let rendered = ctx.render("Undefined variable a");
//! assert!(rendered.contains("let a = 1;"));
//! ```

use std::fmt;

/// The position of a token (or the node/value/error derived from it) within
/// the source text: the matched text, the full line it appears on, the
/// 1-based line number, and the 0-based column of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    token: String,
    line: String,
    line_number: usize,
    column: usize,
}

impl SourceContext {
    /// Creates a new source context.
    pub fn new(token: impl Into<String>, line: impl Into<String>, line_number: usize, column: usize) -> Self {
        SourceContext {
            token: token.into(),
            line: line.into(),
            line_number,
            column,
        }
    }

    /// The exact text of the token this context was captured from.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The full source line the token appears on, without the trailing newline.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 0-based column of the token's first character.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Renders a diagnostic message pointing at this context:
    ///
    /// ```text
    /// 3:let a = 1;
    ///  :----^ message
    /// ```
    pub fn render(&self, message: &str) -> String {
        let line_num = self.line_number.to_string();
        let filler = " ".repeat(line_num.len());
        let dashes = "-".repeat(self.column);
        format!("{line_num}:{}\n{filler}:{dashes}^ {message}", self.line)
    }
}

impl fmt::Display for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_number, self.column)
    }
}
