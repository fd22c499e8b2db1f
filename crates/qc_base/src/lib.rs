#![cfg_attr(docsrs, feature(doc_cfg))]

//! # qc-base
//!
//! Pure structural atoms shared by every crate in the `qc` interpreter.
//!
//! - [`Arena`] — bump allocation for stable references into structures with
//!   cyclic back-references (the grammar engine's rule map).
//! - [`Interner`]/[`Symbol`] — string interning for O(1) equality.
//! - [`SourceContext`] — line/column provenance attached to every token,
//!   command, value, and error.
//! - [`Error`]/[`Result`] — the two error kinds (`Parse`, `Exec`), both
//!   rendered against their `SourceContext`.
//!
//! # Design Principles
//!
//! This crate has no knowledge of the `qc` language's grammar or evaluation
//! rules. It provides only generic, reusable infrastructure that higher-level
//! crates build upon.

pub mod arena;
pub mod context;
pub mod error;
pub mod intern;

pub use arena::Arena;
pub use context::SourceContext;
pub use error::{Error, Result};
pub use intern::{Interner, Symbol, SymbolEq};
