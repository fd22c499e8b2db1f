//! End-to-end and property tests across the full `qc` pipeline.
//!
//! This crate has no production code of its own — it exists purely as a
//! home for `tests/`, matching how `logicaffeine_tests` is used in the rest
//! of the workspace.
