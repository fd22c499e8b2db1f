//! The compiled program representation: a tagged enum collapsing the
//! reference's `NodeCommand` class hierarchy (`IntCommand`, `DaggerCommand`,
//! `CrossCommand`, ... all the way down to `CompositeCommand`'s children)
//! into one type, each variant evaluating itself against a [`Processor`].

use qc_base::{SourceContext, Symbol};
use qc_eval::{Processor, Value};
use qc_mx::{Matrix, C64};
use std::fmt;

/// One node of a compiled program. A whole program compiles to a single
/// `List` of top-level statement commands.
pub enum Command {
    Int {
        source: SourceContext,
        value: i32,
    },
    Complex {
        source: SourceContext,
        value: C64,
    },
    Matrix {
        source: SourceContext,
        value: Matrix,
    },
    RetrieveVar {
        source: SourceContext,
        symbol: Symbol,
        name: String,
    },
    Clear {
        source: SourceContext,
    },
    Dagger {
        source: SourceContext,
        arg: Box<Command>,
    },
    Negate {
        source: SourceContext,
        arg: Box<Command>,
    },
    Int2State {
        source: SourceContext,
        arg: Box<Command>,
    },
    Cross {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    Multiply {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    MultiplyStar {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    Divide {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    Add {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    Sub {
        source: SourceContext,
        left: Box<Command>,
        right: Box<Command>,
    },
    List {
        source: SourceContext,
        items: Vec<Command>,
    },
    CallFunction {
        source: SourceContext,
        name: String,
        args: Vec<Command>,
    },
    /// `value` is filled in by the compiler once the right-hand side has
    /// been compiled; `None` only between the `<assign-var-identifier>`
    /// action and the `<assign-stm>` action that completes it.
    Assign {
        source: SourceContext,
        symbol: Symbol,
        name: String,
        value: Option<Box<Command>>,
    },
}

impl Command {
    pub fn source(&self) -> &SourceContext {
        match self {
            Command::Int { source, .. }
            | Command::Complex { source, .. }
            | Command::Matrix { source, .. }
            | Command::RetrieveVar { source, .. }
            | Command::Clear { source, .. }
            | Command::Dagger { source, .. }
            | Command::Negate { source, .. }
            | Command::Int2State { source, .. }
            | Command::Cross { source, .. }
            | Command::Multiply { source, .. }
            | Command::MultiplyStar { source, .. }
            | Command::Divide { source, .. }
            | Command::Add { source, .. }
            | Command::Sub { source, .. }
            | Command::List { source, .. }
            | Command::CallFunction { source, .. }
            | Command::Assign { source, .. } => source,
        }
    }

    /// Evaluates this command against `proc`, recursing into children first.
    pub fn eval(&self, proc: &mut Processor) -> qc_base::Result<Value> {
        match self {
            Command::Int { source, value } => Ok(Value::Int(*value, source.clone())),
            Command::Complex { source, value } => Ok(Value::Complex(*value, source.clone())),
            Command::Matrix { source, value } => Ok(Value::Matrix(value.clone(), source.clone())),
            Command::RetrieveVar { source, symbol, name } => proc.retrieve_var(source, *symbol, name),
            Command::Clear { source } => Ok(proc.clear(source)),
            Command::Dagger { source, arg } => {
                let v = arg.eval(proc)?;
                proc.dagger(source, v)
            }
            Command::Negate { source, arg } => {
                let v = arg.eval(proc)?;
                proc.neg(source, v)
            }
            Command::Int2State { source, arg } => {
                let v = arg.eval(proc)?;
                proc.int2_ket(source, v)
            }
            Command::Cross { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.cross(source, l, r)
            }
            Command::Multiply { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.mul(source, l, r)
            }
            Command::MultiplyStar { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.mul_star(source, l, r)
            }
            Command::Divide { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.div(source, l, r)
            }
            Command::Add { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.add(source, l, r)
            }
            Command::Sub { source, left, right } => {
                let l = left.eval(proc)?;
                let r = right.eval(proc)?;
                proc.sub(source, l, r)
            }
            Command::List { source, items } => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.eval(proc)?);
                }
                Ok(Value::List(out, source.clone()))
            }
            Command::CallFunction { source, name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.eval(proc)?);
                }
                proc.call_function(name, source, &values)
            }
            Command::Assign { source, symbol, value, .. } => {
                let value = value.as_ref().expect("Assign command finalized before eval");
                let v = value.eval(proc)?;
                Ok(proc.assign(source, *symbol, v))
            }
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, items: &[Command]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Int { value, .. } => write!(f, "{value}"),
            Command::Complex { value, .. } => write!(f, "{value}"),
            Command::Matrix { .. } => write!(f, "<matrix>"),
            Command::RetrieveVar { name, .. } => write!(f, "{name}"),
            Command::Clear { .. } => write!(f, "clear"),
            Command::Dagger { arg, .. } => write!(f, "^({arg})"),
            Command::Negate { arg, .. } => write!(f, "neg({arg})"),
            Command::Int2State { arg, .. } => write!(f, "i2s({arg})"),
            Command::Cross { left, right, .. } => write!(f, "x({left},{right})"),
            Command::Multiply { left, right, .. } => write!(f, "mul({left},{right})"),
            Command::MultiplyStar { left, right, .. } => write!(f, "mulStar({left},{right})"),
            Command::Divide { left, right, .. } => write!(f, "div({left},{right})"),
            Command::Add { left, right, .. } => write!(f, "add({left},{right})"),
            Command::Sub { left, right, .. } => write!(f, "sub({left},{right})"),
            Command::List { items, .. } => {
                write!(f, "list(")?;
                write_args(f, items)?;
                write!(f, ")")
            }
            Command::CallFunction { name, args, .. } => {
                write!(f, "{name}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Command::Assign { name, value, .. } => match value {
                Some(v) => write!(f, "let({name},{v})"),
                None => write!(f, "let({name},?)"),
            },
        }
    }
}
