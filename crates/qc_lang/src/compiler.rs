//! The semantic action layer: a [`qc_grammar::Listener`] that turns grammar
//! `join` events into a [`Command`] tree, built up on an explicit stack —
//! exactly the reference compiler's `_stack`/`popCommand`/`pushCommand`
//! discipline, just dispatched through one `match` on the rule id instead of
//! a `rule id -> closure` table.

use crate::command::Command;
use qc_base::{Error, Interner, Result, SourceContext};
use qc_eval::builtins;
use qc_grammar::{Listener, Rule, Token};
use qc_mx::{gates, C64};

/// Accumulates a [`Command`] tree while walking a parse, interning
/// identifiers into the caller-owned `interner` as they're seen.
pub struct Compiler<'i> {
    interner: &'i mut Interner,
    stack: Vec<Command>,
}

impl<'i> Compiler<'i> {
    pub fn new(interner: &'i mut Interner) -> Self {
        Compiler { interner, stack: Vec::new() }
    }

    /// Consumes the compiler, returning the single root command left on the
    /// stack once a full `<code-unit>` has parsed.
    pub fn into_root(mut self) -> Command {
        assert_eq!(self.stack.len(), 1, "compiler ended with {} commands on the stack, expected 1", self.stack.len());
        self.stack.pop().unwrap()
    }

    fn push(&mut self, cmd: Command) {
        self.stack.push(cmd);
    }

    fn pop(&mut self) -> Command {
        self.stack.pop().expect("compiler stack underflow")
    }
}

impl<'i> Listener for Compiler<'i> {
    fn join(&mut self, token: &Token, rule: &Rule<'_>) -> Result<()> {
        let ctx: SourceContext = token.context().clone();
        match rule.id() {
            "code_unit_head" => self.push(Command::List { source: ctx, items: Vec::new() }),

            "stm" => {
                let stm = self.pop();
                let mut list = self.pop();
                match &mut list {
                    Command::List { items, .. } => items.push(stm),
                    _ => panic!("stm action expected a List on the stack"),
                }
                self.push(list);
            }

            "clear_stm" => self.push(Command::Clear { source: ctx }),

            "int_literal" => {
                let value = token
                    .int_value()
                    .ok_or_else(|| Error::parse(ctx.clone(), format!("Invalid integer literal {}", token.text())))?;
                self.push(Command::Int { source: ctx, value });
            }

            "real_literal" => {
                let value = token
                    .real_value()
                    .ok_or_else(|| Error::parse(ctx.clone(), format!("Invalid real literal {}", token.text())))?;
                self.push(Command::Complex { source: ctx, value: C64::new(value, 0.0) });
            }

            "im_unit" => self.push(Command::Complex { source: ctx, value: C64::new(0.0, 1.0) }),
            "pi" => self.push(Command::Complex { source: ctx, value: C64::new(std::f64::consts::PI, 0.0) }),
            "e" => self.push(Command::Complex { source: ctx, value: C64::new(std::f64::consts::E, 0.0) }),

            "plus_state" => self.push(Command::Matrix { source: ctx, value: gates::plus() }),
            "minus_state" => self.push(Command::Matrix { source: ctx, value: gates::minus() }),
            "im_state" => self.push(Command::Matrix { source: ctx, value: gates::i_state() }),
            "minus_im_state" => self.push(Command::Matrix { source: ctx, value: gates::minus_i_state() }),

            "int_state" => {
                let arg = self.pop();
                self.push(Command::Int2State { source: ctx, arg: Box::new(arg) });
            }

            "^" | "bra" => {
                let arg = self.pop();
                self.push(Command::Dagger { source: ctx, arg: Box::new(arg) });
            }

            "negate_exp" => {
                let arg = self.pop();
                self.push(Command::Negate { source: ctx, arg: Box::new(arg) });
            }

            "cross_tail_opt" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::Cross { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "multiply_tail" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::Multiply { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "multiply_tail_star" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::MultiplyStar { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "divide_tail" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::Divide { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "plus_tail" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::Add { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "minus_tail" => {
                let right = self.pop();
                let left = self.pop();
                self.push(Command::Sub { source: ctx, left: Box::new(left), right: Box::new(right) });
            }

            "var_identifier" => {
                let symbol = self.interner.intern(token.text());
                self.push(Command::RetrieveVar { source: ctx, symbol, name: token.text().to_string() });
            }

            "assign_var_identifier" => {
                let symbol = self.interner.intern(token.text());
                self.push(Command::Assign { source: ctx, symbol, name: token.text().to_string(), value: None });
            }

            "assign_stm" => {
                let value = self.pop();
                let mut assign = self.pop();
                match &mut assign {
                    Command::Assign { value: slot, .. } => *slot = Some(Box::new(value)),
                    _ => panic!("assign_stm action expected an Assign shell on the stack"),
                }
                self.push(assign);
            }

            "function_id" => self.push(Command::CallFunction { source: ctx, name: token.text().to_string(), args: Vec::new() }),

            "arg" | "arg_tail" => {
                let arg = self.pop();
                let mut call = self.pop();
                match &mut call {
                    Command::CallFunction { args, .. } => args.push(arg),
                    _ => panic!("arg action expected a CallFunction on the stack"),
                }
                self.push(call);
            }

            "function" => {
                let call = self.pop();
                if let Command::CallFunction { name, args, .. } = &call {
                    let expected = builtins::arity_of(name).unwrap_or_else(|| panic!("grammar allowed unknown function {name}"));
                    let actual = args.len();
                    if expected != actual {
                        return Err(Error::parse(ctx, format!("{name} requires {expected} arguments: actual ({actual})")));
                    }
                }
                self.push(call);
            }

            _ => {}
        }
        Ok(())
    }
}
