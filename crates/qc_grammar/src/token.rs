//! The token alphabet shared by every tokenizer that drives this grammar
//! engine.

use qc_base::SourceContext;

/// The four lexical categories a tokenizer may emit, plus end-of-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Integer,
    Real,
    Identifier,
    Operator,
}

/// A single lexical token: its category, exact source text, and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    context: SourceContext,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, context: SourceContext) -> Self {
        Token {
            kind,
            text: text.into(),
            context,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &SourceContext {
        &self.context
    }

    /// Parses the token text as an integer literal. Only meaningful for
    /// [`TokenKind::Integer`] tokens.
    pub fn int_value(&self) -> Option<i32> {
        self.text.parse().ok()
    }

    /// Parses the token text as a real literal. Only meaningful for
    /// [`TokenKind::Real`] tokens.
    pub fn real_value(&self) -> Option<f64> {
        self.text.parse().ok()
    }
}
