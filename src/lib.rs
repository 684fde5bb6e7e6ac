//! Definition, validation, and simulation engines for four classical
//! computation models: deterministic finite automata, non-deterministic
//! finite automata with ε-transitions, pushdown automata, and Turing
//! machines.
//!
//! The pipeline is definition → validation → simulation: tokenized field
//! values go through the [`builder`] functions, which either reject the
//! definition with a descriptive [`AutomatonError`] or produce an immutable
//! automaton; simulating it against an input string yields a [`Run`] with the
//! verdict and a step-by-step trace.

pub mod analyzer;
pub mod automaton;
pub mod builder;
pub mod catalog;
pub mod machine;
pub mod types;

/// Re-exports the advisory analysis entry point and its findings.
pub use analyzer::{analyze, Finding};
/// Re-exports the definition structs and the closed variant over them.
pub use automaton::{Automaton, Dfa, Nfa, Pda, TuringMachine};
/// Re-exports the builder/validator functions.
pub use builder::{build_dfa, build_nfa, build_pda, build_tm};
/// Re-exports the built-in example registry.
pub use catalog::{Catalog, CatalogEntry, CatalogInfo};
/// Re-exports the shared vocabulary types and constants.
pub use types::{
    AutomatonError, Direction, Run, DEFAULT_BLANK_SYMBOL, DEFAULT_STACK_SYMBOL,
    MAX_EXECUTION_STEPS,
};
