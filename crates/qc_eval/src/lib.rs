//! # qc-eval
//!
//! The dynamically-typed value domain, operator dispatch, the evaluator
//! (`Processor`), and the built-in function registry.
//!
//! This crate has no knowledge of the `qc` language's grammar, tokens, or
//! AST — `qc_lang` depends on it (for `Processor` and the builtin
//! registry's name/arity data), never the other way around.

pub mod builtins;
pub mod ops;
pub mod processor;
pub mod value;

pub use processor::Processor;
pub use value::Value;
