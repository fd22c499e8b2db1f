//! # qc-lang
//!
//! Front end for the `qc` language: the [`tokenizer::Tokenizer`], the
//! concrete [`grammar`], the compiled [`command::Command`] tree, and the
//! [`compiler::Compiler`] that turns a parse into one.
//!
//! [`compile`] is the single entry point the rest of the workspace needs —
//! everything else here is plumbing in support of it.

pub mod command;
pub mod compiler;
pub mod grammar;
pub mod tokenizer;

pub use command::Command;
pub use compiler::Compiler;
pub use tokenizer::Tokenizer;

use qc_base::{Arena, Interner, Result};
use qc_grammar::Rule;
use std::io::BufRead;

/// Parses and compiles `source` into a single root [`Command`], interning
/// every identifier it sees into `interner`.
pub fn compile<R: BufRead>(source: R, interner: &mut Interner) -> Result<Command> {
    let arena = Arena::new();
    let rules = grammar::build(&arena);
    let mut tokenizer = Tokenizer::new(source)?;
    let mut compiler = Compiler::new(interner);

    log::trace!("qc-lang: tokenizer primed, starting parse");
    let root: &Rule<'_> = rules.require("code_unit");
    root.parse(&mut tokenizer, &mut compiler)?;
    log::debug!("qc-lang: parse complete");

    Ok(compiler.into_root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_eval::{Processor, Value};
    use std::io::Cursor;

    fn run(src: &str) -> Vec<Value> {
        let mut interner = Interner::new();
        let root = compile(Cursor::new(src.as_bytes()), &mut interner).unwrap();
        let mut proc = Processor::new();
        match root.eval(&mut proc).unwrap() {
            Value::List(items, _) => items,
            other => vec![other],
        }
    }

    #[test]
    fn compiles_and_evaluates_an_integer_assignment() {
        let values = run("let a = 1; a;");
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].as_int(), Some(1));
    }

    #[test]
    fn compiles_arithmetic_with_precedence() {
        let values = run("1 + 2 * 3;");
        assert_eq!(values[0].as_int(), Some(7));
    }

    #[test]
    fn clear_resets_state_to_zero() {
        let values = run("clear();");
        assert_eq!(values[0].as_int(), Some(0));
    }

    #[test]
    fn unknown_identifier_is_an_exec_error() {
        let mut interner = Interner::new();
        let root = compile(Cursor::new("zz;".as_bytes()), &mut interner).unwrap();
        let mut proc = Processor::new();
        let err = root.eval(&mut proc).unwrap_err();
        assert!(err.to_string().contains("Undefined variable zz"));
    }

    #[test]
    fn function_call_with_wrong_arity_is_a_parse_error() {
        let mut interner = Interner::new();
        let err = compile(Cursor::new("sqrt();".as_bytes()), &mut interner).unwrap_err();
        assert!(err.to_string().contains("sqrt requires 1 arguments: actual (0)"));
    }
}
