//! Engine-level tests using a tiny identifier-only grammar, independent of
//! any concrete language.

use crate::builder::SyntaxBuilder;
use crate::producer::TokenProducer;
use crate::rule::Listener;
use crate::rule::Rule;
use crate::token::{Token, TokenKind};
use qc_base::{Arena, SourceContext};
use std::collections::HashSet;

struct VecTokenizer {
    tokens: Vec<Token>,
    pos: usize,
}

impl VecTokenizer {
    fn from_words(words: &[&str]) -> Self {
        let mut tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(TokenKind::Identifier, *w, SourceContext::new(*w, words.join(" "), 1, i)))
            .collect();
        tokens.push(Token::new(TokenKind::Eof, "", SourceContext::new("", "", 1, words.len())));
        VecTokenizer { tokens, pos: 0 }
    }
}

impl TokenProducer for VecTokenizer {
    fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn pop_token(&mut self) -> qc_base::Result<()> {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        Ok(())
    }
}

struct RecordingListener {
    joined: Vec<String>,
}

impl Listener for RecordingListener {
    fn join(&mut self, token: &Token, rule: &Rule<'_>) -> qc_base::Result<()> {
        self.joined.push(format!("{}:{}", rule.id(), token.text()));
        Ok(())
    }
}

#[test]
fn opt_returns_false_iff_condition_fails() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.keyword("let").unwrap();
    builder.keyword("x").unwrap();
    builder.opt("assign", &["let", "x"]).unwrap();
    let grammar = builder.build(&arena).unwrap();
    let rule = grammar.require("assign");

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["nope"]);
    assert!(!rule.parse(&mut tokenizer, &mut listener).unwrap());
    assert!(listener.joined.is_empty());

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["let", "x"]);
    assert!(rule.parse(&mut tokenizer, &mut listener).unwrap());
    assert_eq!(listener.joined, vec!["assign:let"]);
}

#[test]
fn opt_missing_required_tail_is_a_parse_error() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.keyword("let").unwrap();
    builder.keyword("x").unwrap();
    builder.opt("assign", &["let", "x"]).unwrap();
    let grammar = builder.build(&arena).unwrap();
    let rule = grammar.require("assign");

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["let", "nope"]);
    let err = rule.parse(&mut tokenizer, &mut listener).unwrap_err();
    assert!(err.to_string().contains("Missing x"));
}

#[test]
fn options_returns_true_iff_some_child_matches() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.keyword("a").unwrap();
    builder.keyword("b").unwrap();
    builder.options("a-or-b", &["a", "b"]).unwrap();
    let grammar = builder.build(&arena).unwrap();
    let rule = grammar.require("a-or-b");

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["b"]);
    assert!(rule.parse(&mut tokenizer, &mut listener).unwrap());

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["c"]);
    assert!(!rule.parse(&mut tokenizer, &mut listener).unwrap());
}

#[test]
fn repeat_always_succeeds_and_joins_zero_or_more_times() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.keyword("a").unwrap();
    builder.repeat("as", "a").unwrap();
    let grammar = builder.build(&arena).unwrap();
    let rule = grammar.require("as");

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["a", "a", "a", "b"]);
    assert!(rule.parse(&mut tokenizer, &mut listener).unwrap());
    assert_eq!(listener.joined, vec!["a:a", "a:a", "a:a"]);

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["b"]);
    assert!(rule.parse(&mut tokenizer, &mut listener).unwrap());
    assert!(listener.joined.is_empty());
}

#[test]
fn require_joins_pre_entry_token_after_all_children_succeed() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.keyword("a").unwrap();
    builder.keyword("b").unwrap();
    builder.require("ab", &["a", "b"]).unwrap();
    let grammar = builder.build(&arena).unwrap();
    let rule = grammar.require("ab");

    let mut listener = RecordingListener { joined: vec![] };
    let mut tokenizer = VecTokenizer::from_words(&["a", "b"]);
    assert!(rule.parse(&mut tokenizer, &mut listener).unwrap());
    // The composite rule joins with the *first* token of the sequence, not the last.
    assert_eq!(listener.joined, vec!["a:a", "b:b", "ab:a"]);
}

#[test]
fn build_rejects_duplicate_ids() {
    let mut builder = SyntaxBuilder::new();
    builder.keyword("x").unwrap();
    let err = builder.keyword("x").unwrap_err();
    assert!(err.to_string().contains("already defined"));
}

#[test]
fn build_rejects_unknown_dependency() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    builder.require("r", &["missing"]).unwrap();
    let err = builder.build(&arena).unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn cyclic_rules_build_successfully() {
    let arena = Arena::new();
    let mut builder = SyntaxBuilder::new();
    // "even" and "odd" reference each other before either is bound.
    builder.keyword("a").unwrap();
    builder.opt("odd", &["a", "even"]).unwrap();
    builder.options("even", &["odd"]).unwrap();
    let idents: HashSet<String> = HashSet::new();
    builder.id_not_in("anything", idents).unwrap();
    let grammar = builder.build(&arena);
    assert!(grammar.is_ok());
}
