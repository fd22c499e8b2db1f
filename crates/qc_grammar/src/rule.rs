//! The rule algebra: terminal matchers plus the four non-terminal
//! combinators (`Require`, `Opt`, `Options`, `Repeat`).
//!
//! A [`Rule`] never owns its children — they are arena-backed references
//! resolved once by [`crate::builder::SyntaxBuilder::build`] — so rule
//! graphs may be cyclic without any shared-ownership cycle.

use crate::producer::TokenProducer;
use crate::token::{Token, TokenKind};
use qc_base::Error;
use std::cell::RefCell;
use std::collections::HashSet;

/// What a rule matches and, for non-terminals, how many/which children it binds.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Matches without consuming, true iff the current token is EOF.
    Eof,
    /// Matches without consuming, always true.
    Empty,
    Int,
    Real,
    Oper(String),
    Id(String),
    IdIn(HashSet<String>),
    IdNotIn(HashSet<String>),
    /// All children must match in order, or the current token's context
    /// raises `"Missing <child.id>"`.
    Require,
    /// First child is the condition; if it fails, the whole rule fails with
    /// no join. Otherwise the remaining children must all match.
    Opt,
    /// First child that matches wins.
    Options,
    /// Re-invokes its single child until it fails; always succeeds.
    Repeat,
}

impl RuleKind {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            RuleKind::Eof
                | RuleKind::Empty
                | RuleKind::Int
                | RuleKind::Real
                | RuleKind::Oper(_)
                | RuleKind::Id(_)
                | RuleKind::IdIn(_)
                | RuleKind::IdNotIn(_)
        )
    }
}

/// A listener receiving `join(token, rule)` callbacks every time a
/// non-skipping rule matches. The grammar engine holds no semantic state of
/// its own; a [`Listener`] (the compiler, in this crate's client) is the
/// only place meaning accumulates.
pub trait Listener {
    fn join(&mut self, token: &Token, rule: &Rule<'_>) -> qc_base::Result<()>;
}

/// One node of the grammar, addressable by `id` and (for non-terminals)
/// bound to its children after [`crate::builder::SyntaxBuilder::build`].
pub struct Rule<'a> {
    id: String,
    kind: RuleKind,
    children: RefCell<Vec<&'a Rule<'a>>>,
}

impl<'a> Rule<'a> {
    pub(crate) fn new(id: String, kind: RuleKind) -> Self {
        Rule {
            id,
            kind,
            children: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn bind(&self, children: Vec<&'a Rule<'a>>) {
        *self.children.borrow_mut() = children;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn matches_terminal(&self, token: &Token) -> bool {
        match &self.kind {
            RuleKind::Int => token.kind() == TokenKind::Integer,
            RuleKind::Real => token.kind() == TokenKind::Real,
            RuleKind::Oper(lit) => token.kind() == TokenKind::Operator && token.text() == lit,
            RuleKind::Id(lit) => token.kind() == TokenKind::Identifier && token.text() == lit,
            RuleKind::IdIn(set) => token.kind() == TokenKind::Identifier && set.contains(token.text()),
            RuleKind::IdNotIn(set) => token.kind() == TokenKind::Identifier && !set.contains(token.text()),
            _ => unreachable!("matches_terminal called on non-terminal rule {}", self.id),
        }
    }

    /// Attempts to match this rule against the current token(s), advancing
    /// `tokenizer` as it consumes and calling `listener.join` per the table
    /// in the grammar engine's design: terminals join on match; `Require`
    /// and `Opt` join the pre-entry token after every child succeeds;
    /// `Options` joins the pre-entry token after the first success;
    /// `Repeat` never joins itself.
    pub fn parse(&'a self, tokenizer: &mut dyn TokenProducer, listener: &mut dyn Listener) -> qc_base::Result<bool> {
        match &self.kind {
            RuleKind::Eof => Ok(tokenizer.current_token().kind() == TokenKind::Eof),
            RuleKind::Empty => {
                listener.join(tokenizer.current_token(), self)?;
                Ok(true)
            }
            _ if self.kind.is_terminal() => {
                let token = tokenizer.current_token().clone();
                if self.matches_terminal(&token) {
                    tokenizer.pop_token()?;
                    listener.join(&token, self)?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            RuleKind::Require => {
                let rule_token = tokenizer.current_token().clone();
                for child in self.children.borrow().iter() {
                    let failure_context = tokenizer.current_token().context().clone();
                    if !child.parse(tokenizer, listener)? {
                        return Err(Error::parse(failure_context, format!("Missing {}", child.id())));
                    }
                }
                listener.join(&rule_token, self)?;
                Ok(true)
            }
            RuleKind::Opt => {
                let rule_token = tokenizer.current_token().clone();
                let children = self.children.borrow();
                let (cond, rest) = children.split_first().expect("Opt rule must bind a condition child");
                if !cond.parse(tokenizer, listener)? {
                    return Ok(false);
                }
                for child in rest {
                    let failure_context = tokenizer.current_token().context().clone();
                    if !child.parse(tokenizer, listener)? {
                        return Err(Error::parse(failure_context, format!("Missing {}", child.id())));
                    }
                }
                listener.join(&rule_token, self)?;
                Ok(true)
            }
            RuleKind::Options => {
                let rule_token = tokenizer.current_token().clone();
                for child in self.children.borrow().iter() {
                    if child.parse(tokenizer, listener)? {
                        listener.join(&rule_token, self)?;
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            RuleKind::Repeat => {
                let children = self.children.borrow();
                let cond = children.first().expect("Repeat rule must bind one child");
                while cond.parse(tokenizer, listener)? {}
                Ok(true)
            }
        }
    }
}
