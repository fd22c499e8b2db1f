//! The interface between the grammar engine and whatever supplies tokens.

use crate::token::Token;
use qc_base::Result;

/// A pull-based source of tokens. The engine only ever looks at the current
/// token and asks to advance past it; tokenization itself (and any
/// tokenizer-level failure, such as a malformed exponent) happens lazily
/// inside [`TokenProducer::pop_token`].
pub trait TokenProducer {
    /// The token the engine is currently positioned on.
    fn current_token(&self) -> &Token;

    /// Advances past the current token, lexing the next one.
    fn pop_token(&mut self) -> Result<()>;
}
