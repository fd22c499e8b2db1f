//! The concrete grammar, rule for rule against
//! `original_source/src/qusyntax.cpp`'s `Syntax::build`. Rule ids trade the
//! original's angle-bracket literal style (`<code-unit-head>`) for
//! Rust-idiomatic snake_case, but every `require`/`opt`/`options`/`repeat`
//! shape and join point is reproduced unchanged — the grammar is the
//! contract the compiler's `match rule.id()` table (`qc_lang::compiler`)
//! depends on.

use qc_base::Arena;
use qc_eval::builtins;
use qc_grammar::{BuildResult, Rule, RuleMap, SyntaxBuilder};
use std::collections::HashSet;

fn declare(b: &mut SyntaxBuilder) -> BuildResult<()> {
    let function_id: HashSet<String> = builtins::names().map(str::to_string).collect();

    let mut keywords = function_id.clone();
    for kw in [
        "clear", "let", "i", "e", "pi", "x",
        // Reserved for future built-ins: not usable as variable names even
        // though nothing in the function registry implements them yet.
        "exp", "pow", "sin", "cos", "tan", "acos", "asin", "atan", "arg", "sinh", "cosh", "tanh",
    ] {
        keywords.insert(kw.to_string());
    }

    b.require("code_unit", &["code_unit_head", "statement_list", "eof"])?;
    b.repeat("statement_list", "stm")?;
    b.opt("stm", &["stm_opt", ";"])?;
    b.options("stm_opt", &["clear_stm", "assign_stm", "exp_opt"])?;
    b.require("eof", &["end"])?;
    b.eof("end")?;
    b.empty("code_unit_head")?;

    b.opt("clear_stm", &["clear", "(", ")"])?;
    b.opt("assign_stm", &["let", "assign_var_identifier", "=", "exp"])?;

    b.require("exp", &["exp_opt"])?;
    b.opt("exp_opt", &["add_exp"])?;

    b.opt("add_exp", &["multiply_exp", "add_tail"])?;
    b.repeat("add_tail", "add_tail_opt")?;
    b.options("add_tail_opt", &["plus_tail", "minus_tail"])?;
    b.opt("plus_tail", &["+", "multiply_exp"])?;
    b.opt("minus_tail", &["-", "multiply_exp"])?;

    b.opt("multiply_exp", &["cross_exp", "mul_tail"])?;
    b.repeat("mul_tail", "mul_tail_opt")?;
    b.options("mul_tail_opt", &["multiply_tail", "multiply_tail_star", "divide_tail"])?;
    b.opt("multiply_tail", &[".", "cross_exp"])?;
    b.opt("multiply_tail_star", &["*", "cross_exp"])?;
    b.opt("divide_tail", &["/", "cross_exp"])?;

    b.opt("cross_exp", &["unary_exp", "cross_tail"])?;
    b.repeat("cross_tail", "cross_tail_opt")?;
    b.opt("cross_tail_opt", &["x", "unary_exp"])?;

    b.options("unary_exp", &["plus_exp", "negate_exp", "conj"])?;
    b.opt("plus_exp", &["+", "unary_exp"])?;
    b.opt("negate_exp", &["-", "unary_exp"])?;

    b.opt("conj", &["primary_exp", "conj_tail"])?;
    b.repeat("conj_tail", "^")?;

    b.options(
        "primary_exp",
        &[
            "priority_exp",
            "bra",
            "ket",
            "im_unit",
            "pi",
            "e",
            "function",
            "var_identifier",
            "int_literal",
            "real_literal",
        ],
    )?;

    b.opt("priority_exp", &["(", "exp", ")"])?;
    b.opt("bra", &["<", "state_exp", "|"])?;
    b.opt("ket", &["|", "state_exp", ">"])?;

    b.require("state_exp", &["state_exp_opt"])?;
    b.options("state_exp_opt", &["im_state", "plus_state", "minus_state_exp", "int_state"])?;
    b.opt("minus_state_exp", &["-", "minus_state_exp_opt"])?;
    b.options("minus_state_exp_opt", &["minus_im_state", "minus_state"])?;
    b.empty("minus_state")?;

    b.require("int_state", &["exp_opt"])?;

    b.opt("im_unit", &["i"])?;
    b.opt("im_state", &["i"])?;
    b.opt("minus_im_state", &["i"])?;
    b.opt("plus_state", &["+"])?;

    b.opt("function", &["function_id", "args_exp"])?;
    b.require("args_exp", &["(", "arg_list", ")"])?;
    b.options("arg_list", &["arg_list_opt", "empty_arg"])?;
    b.opt("arg_list_opt", &["arg", "arg_list_tail"])?;
    b.repeat("arg_list_tail", "arg_tail")?;
    b.opt("arg_tail", &[",", "exp"])?;
    b.empty("empty_arg")?;
    b.opt("arg", &["exp_opt"])?;

    b.id_not_in("var_identifier", keywords.clone())?;
    b.id_not_in("assign_var_identifier", keywords)?;

    b.id_in("function_id", function_id)?;

    b.keyword("let")?;
    b.keyword("clear")?;

    b.keyword("e")?;
    b.keyword("pi")?;
    b.keyword("i")?;
    b.int_literal("int_literal")?;
    b.real_literal("real_literal")?;

    b.keyword("x")?;
    b.oper("+")?;
    b.oper("-")?;
    b.oper("<")?;
    b.oper("|")?;
    b.oper(">")?;
    b.oper("(")?;
    b.oper(")")?;
    b.oper(",")?;
    b.oper("^")?;
    b.oper("*")?;
    b.oper("/")?;
    b.oper("=")?;
    b.oper(";")?;
    b.oper(".")?;

    Ok(())
}

/// Builds the full rule graph into `arena`. A [`qc_grammar::BuildError`]
/// here means a fixed rule declared above has a typo'd id — a programming
/// error, not something a caller can recover from.
pub fn build<'a>(arena: &'a Arena<Rule<'a>>) -> RuleMap<'a> {
    let mut b = SyntaxBuilder::new();
    declare(&mut b).expect("grammar declaration is internally inconsistent");
    b.build(arena).expect("grammar has an unresolved rule reference")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_panicking_and_exposes_the_root() {
        let arena = Arena::new();
        let rules = build(&arena);
        assert!(rules.get("code_unit").is_some());
    }

    #[test]
    fn function_id_rule_accepts_registered_builtins() {
        let arena = Arena::new();
        let rules = build(&arena);
        assert!(rules.get("function_id").is_some());
        assert!(builtins::arity_of("sqrt").is_some());
    }

    #[test]
    fn reserved_for_future_names_are_rejected_as_variable_identifiers() {
        use qc_base::{Error, Interner};
        use std::io::Cursor;

        for name in ["sin", "cos", "exp", "pow", "arg"] {
            assert!(builtins::arity_of(name).is_none(), "{name} is already a builtin");
            let src = format!("let {name} = 1;");
            let mut interner = Interner::new();
            let err = crate::compile(Cursor::new(src.as_bytes()), &mut interner)
                .expect_err(&format!("{name} should not be a usable variable name"));
            assert!(matches!(err, Error::Parse { .. }));
        }
    }
}
