//! Two-pass rule-map builder: declare every rule as a leaf, then bind each
//! non-terminal's children by id. Because binding is a second pass over an
//! already-complete id→rule index, rules may reference each other cyclically.

use crate::rule::{Rule, RuleKind};
use qc_base::Arena;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone)]
pub enum BuildError {
    DuplicateRule(String),
    MissingCondition(String),
    MissingDependency { rule: String, dep: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateRule(id) => write!(f, "Rule {id} already defined"),
            BuildError::MissingCondition(id) => write!(f, "Missing condition for rule {id}"),
            BuildError::MissingDependency { rule, dep } => write!(f, "Missing dependant rule {dep} for rule {rule}"),
        }
    }
}

impl std::error::Error for BuildError {}

pub type BuildResult<T> = Result<T, BuildError>;

struct RuleSpec {
    id: String,
    kind: RuleKind,
    deps: Vec<String>,
}

/// Accumulates rule declarations, then resolves them into a [`RuleMap`].
#[derive(Default)]
pub struct SyntaxBuilder {
    specs: Vec<RuleSpec>,
    seen: HashSet<String>,
}

impl SyntaxBuilder {
    pub fn new() -> Self {
        SyntaxBuilder::default()
    }

    fn declare(&mut self, id: &str, kind: RuleKind, deps: Vec<String>) -> BuildResult<()> {
        if !self.seen.insert(id.to_string()) {
            return Err(BuildError::DuplicateRule(id.to_string()));
        }
        self.specs.push(RuleSpec {
            id: id.to_string(),
            kind,
            deps,
        });
        Ok(())
    }

    pub fn empty(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Empty, vec![])
    }

    pub fn eof(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Eof, vec![])
    }

    pub fn int_literal(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Int, vec![])
    }

    pub fn real_literal(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Real, vec![])
    }

    /// Declares an operator terminal; `id` doubles as the literal it matches.
    pub fn oper(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Oper(id.to_string()), vec![])
    }

    /// Declares an identifier terminal matching only the literal `id`
    /// (used for keywords like `let`, `clear`, `pi`).
    pub fn keyword(&mut self, id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Id(id.to_string()), vec![])
    }

    pub fn id_in(&mut self, id: &str, idents: HashSet<String>) -> BuildResult<()> {
        self.declare(id, RuleKind::IdIn(idents), vec![])
    }

    pub fn id_not_in(&mut self, id: &str, idents: HashSet<String>) -> BuildResult<()> {
        self.declare(id, RuleKind::IdNotIn(idents), vec![])
    }

    pub fn require(&mut self, id: &str, rule_ids: &[&str]) -> BuildResult<()> {
        self.declare(id, RuleKind::Require, rule_ids.iter().map(|s| s.to_string()).collect())
    }

    /// `rule_ids[0]` is the condition; the rest must all match once the
    /// condition does.
    pub fn opt(&mut self, id: &str, rule_ids: &[&str]) -> BuildResult<()> {
        if rule_ids.is_empty() {
            return Err(BuildError::MissingCondition(id.to_string()));
        }
        self.declare(id, RuleKind::Opt, rule_ids.iter().map(|s| s.to_string()).collect())
    }

    pub fn options(&mut self, id: &str, rule_ids: &[&str]) -> BuildResult<()> {
        self.declare(id, RuleKind::Options, rule_ids.iter().map(|s| s.to_string()).collect())
    }

    pub fn repeat(&mut self, id: &str, rule_id: &str) -> BuildResult<()> {
        self.declare(id, RuleKind::Repeat, vec![rule_id.to_string()])
    }

    /// Pass 1: allocates every declared rule into `arena` as a childless
    /// leaf. Pass 2: resolves each rule's dependency ids against the now-
    /// complete index and binds the children in place.
    pub fn build<'a>(self, arena: &'a Arena<Rule<'a>>) -> BuildResult<RuleMap<'a>> {
        let mut index: HashMap<String, &'a Rule<'a>> = HashMap::with_capacity(self.specs.len());
        for spec in &self.specs {
            let rule = arena.alloc(Rule::new(spec.id.clone(), spec.kind.clone()));
            index.insert(spec.id.clone(), rule);
        }
        for spec in &self.specs {
            let mut children = Vec::with_capacity(spec.deps.len());
            for dep in &spec.deps {
                let resolved = *index.get(dep).ok_or_else(|| BuildError::MissingDependency {
                    rule: spec.id.clone(),
                    dep: dep.clone(),
                })?;
                children.push(resolved);
            }
            index[&spec.id].bind(children);
        }
        Ok(RuleMap { index })
    }
}

/// The fully-bound id→rule index produced by [`SyntaxBuilder::build`].
pub struct RuleMap<'a> {
    index: HashMap<String, &'a Rule<'a>>,
}

impl<'a> RuleMap<'a> {
    pub fn get(&self, id: &str) -> Option<&'a Rule<'a>> {
        self.index.get(id).copied()
    }

    /// Looks up `id`, panicking if the grammar wasn't built with that root —
    /// a programming error, not a runtime/user failure.
    pub fn require(&self, id: &str) -> &'a Rule<'a> {
        self.get(id).unwrap_or_else(|| panic!("rule {id} not found in grammar"))
    }
}
