//! # qc-grammar
//!
//! A generic, data-driven recursive-descent grammar engine: a small algebra
//! of rule combinators (terminal matchers, sequence, alternation, option,
//! repetition), a two-pass builder that lets rules reference each other
//! cyclically by id, and a listener-driven driver that calls back into a
//! client-supplied [`Listener`] every time a non-skipping rule matches.
//!
//! This crate knows nothing about the `qc` language specifically — the
//! grammar itself, the tokens, and the semantic actions all live upstream.

pub mod builder;
pub mod producer;
pub mod rule;
pub mod token;

#[cfg(test)]
mod tests;

pub use builder::{BuildError, BuildResult, RuleMap, SyntaxBuilder};
pub use producer::TokenProducer;
pub use rule::{Listener, Rule, RuleKind};
pub use token::{Token, TokenKind};
