//! Immutable automaton definitions for the four supported models.
//!
//! Each definition owns its declared state set, alphabet(s), and a
//! model-specific transition table keyed by source state. Definitions are
//! produced by the builder, never mutated afterwards, and may be simulated
//! any number of times; every simulation call owns its own ephemeral
//! execution state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::types::Direction;

/// A deterministic finite automaton.
///
/// The transition table is a partial function: the builder guarantees at most
/// one entry per (state, symbol) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dfa {
    /// Declared state labels.
    pub states: BTreeSet<String>,
    /// Declared input symbols.
    pub input_alphabet: BTreeSet<String>,
    /// Transition rows grouped by source state.
    pub rules: HashMap<String, Vec<DfaTransition>>,
    /// The state the simulation starts in.
    pub initial_state: String,
    /// Accepting states; may be empty.
    pub accepting_states: BTreeSet<String>,
}

/// One DFA transition: on `symbol`, move to `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaTransition {
    pub symbol: String,
    pub next_state: String,
}

impl Dfa {
    /// Looks up δ(state, symbol), if defined.
    pub fn transition(&self, state: &str, symbol: &str) -> Option<&DfaTransition> {
        self.rules
            .get(state)
            .and_then(|rows| rows.iter().find(|t| t.symbol == symbol))
    }

    /// Total number of transition rows.
    pub fn transition_count(&self) -> usize {
        self.rules.values().map(|rows| rows.len()).sum()
    }
}

/// A non-deterministic finite automaton with epsilon transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nfa {
    pub states: BTreeSet<String>,
    pub input_alphabet: BTreeSet<String>,
    /// Transition rows grouped by source state. Rows sharing a symbol are
    /// merged into one destination set by the builder.
    pub rules: HashMap<String, Vec<NfaTransition>>,
    pub initial_state: String,
    pub accepting_states: BTreeSet<String>,
}

/// One NFA transition: on `symbol` (`None` = epsilon), move to any of
/// `targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaTransition {
    pub symbol: Option<String>,
    pub targets: BTreeSet<String>,
}

impl Nfa {
    /// Destination set for δ(state, symbol); empty if undefined. Pass `None`
    /// for epsilon.
    pub fn targets(&self, state: &str, symbol: Option<&str>) -> Option<&BTreeSet<String>> {
        self.rules
            .get(state)
            .and_then(|rows| rows.iter().find(|t| t.symbol.as_deref() == symbol))
            .map(|t| &t.targets)
    }

    pub fn transition_count(&self) -> usize {
        self.rules.values().map(|rows| rows.len()).sum()
    }
}

/// A pushdown automaton.
///
/// Rows for a state keep their declared order; when several rows match the
/// same (input, stack-top) configuration the engine takes the first one and
/// never backtracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pda {
    pub states: BTreeSet<String>,
    pub input_alphabet: BTreeSet<String>,
    /// Symbols that may occupy stack cells.
    pub stack_alphabet: BTreeSet<String>,
    pub rules: HashMap<String, Vec<PdaTransition>>,
    pub initial_state: String,
    pub accepting_states: BTreeSet<String>,
    /// The single symbol the stack holds before the first step.
    pub initial_stack_symbol: String,
}

/// One PDA transition: on `input` (`None` = epsilon) with `stack_top` on top,
/// pop the top, push `push` in order (its last element becomes the new top),
/// and move to `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaTransition {
    pub input: Option<String>,
    pub stack_top: String,
    pub next_state: String,
    pub push: Vec<String>,
}

impl Pda {
    /// First declared transition matching the configuration, if any. An empty
    /// stack (`top = None`) matches no row, since every row names a declared
    /// stack symbol.
    pub fn transition(
        &self,
        state: &str,
        input: Option<&str>,
        top: Option<&str>,
    ) -> Option<&PdaTransition> {
        self.rules.get(state).and_then(|rows| {
            rows.iter()
                .find(|t| t.input.as_deref() == input && Some(t.stack_top.as_str()) == top)
        })
    }

    pub fn transition_count(&self) -> usize {
        self.rules.values().map(|rows| rows.len()).sum()
    }
}

/// A single-tape Turing machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuringMachine {
    pub states: BTreeSet<String>,
    pub input_alphabet: BTreeSet<String>,
    /// Symbols that may appear on the tape; a superset of the input alphabet
    /// that also contains the blank.
    pub tape_alphabet: BTreeSet<String>,
    pub rules: HashMap<String, Vec<TmTransition>>,
    pub initial_state: String,
    pub accepting_states: BTreeSet<String>,
    /// Symbol read from tape cells that were never written.
    pub blank: String,
}

/// One TM transition: reading `read`, write `write`, move the head in
/// `direction`, and enter `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmTransition {
    pub read: String,
    pub next_state: String,
    pub write: String,
    pub direction: Direction,
}

impl TuringMachine {
    /// Looks up δ(state, read), if defined. The builder keeps at most one row
    /// per (state, read) pair.
    pub fn transition(&self, state: &str, read: &str) -> Option<&TmTransition> {
        self.rules
            .get(state)
            .and_then(|rows| rows.iter().find(|t| t.read == read))
    }

    pub fn transition_count(&self) -> usize {
        self.rules.values().map(|rows| rows.len()).sum()
    }
}

/// A validated automaton of any of the four supported models.
///
/// Closed tagged variant: simulation dispatches on the tag at one call site
/// instead of going through trait objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Automaton {
    Dfa(Dfa),
    Nfa(Nfa),
    Pda(Pda),
    Tm(TuringMachine),
}

impl Automaton {
    /// Short human-readable model name.
    pub fn kind(&self) -> &'static str {
        match self {
            Automaton::Dfa(_) => "DFA",
            Automaton::Nfa(_) => "NFA",
            Automaton::Pda(_) => "PDA",
            Automaton::Tm(_) => "TM",
        }
    }

    /// Declared state labels of the underlying definition.
    pub fn states(&self) -> &BTreeSet<String> {
        match self {
            Automaton::Dfa(a) => &a.states,
            Automaton::Nfa(a) => &a.states,
            Automaton::Pda(a) => &a.states,
            Automaton::Tm(a) => &a.states,
        }
    }

    /// The state the simulation starts in.
    pub fn initial_state(&self) -> &str {
        match self {
            Automaton::Dfa(a) => &a.initial_state,
            Automaton::Nfa(a) => &a.initial_state,
            Automaton::Pda(a) => &a.initial_state,
            Automaton::Tm(a) => &a.initial_state,
        }
    }

    /// Accepting states of the underlying definition.
    pub fn accepting_states(&self) -> &BTreeSet<String> {
        match self {
            Automaton::Dfa(a) => &a.accepting_states,
            Automaton::Nfa(a) => &a.accepting_states,
            Automaton::Pda(a) => &a.accepting_states,
            Automaton::Tm(a) => &a.accepting_states,
        }
    }

    /// Total number of transition rows in the underlying definition.
    pub fn transition_count(&self) -> usize {
        match self {
            Automaton::Dfa(a) => a.transition_count(),
            Automaton::Nfa(a) => a.transition_count(),
            Automaton::Pda(a) => a.transition_count(),
            Automaton::Tm(a) => a.transition_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_dfa() -> Dfa {
        let mut rules = HashMap::new();
        rules.insert(
            "q0".to_string(),
            vec![DfaTransition {
                symbol: "a".to_string(),
                next_state: "q1".to_string(),
            }],
        );

        Dfa {
            states: ["q0", "q1"].iter().map(|s| s.to_string()).collect(),
            input_alphabet: ["a"].iter().map(|s| s.to_string()).collect(),
            rules,
            initial_state: "q0".to_string(),
            accepting_states: ["q1"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_dfa_transition_lookup() {
        let dfa = two_state_dfa();

        let t = dfa.transition("q0", "a").unwrap();
        assert_eq!(t.next_state, "q1");

        assert!(dfa.transition("q0", "b").is_none());
        assert!(dfa.transition("q1", "a").is_none());
    }

    #[test]
    fn test_pda_first_match_wins() {
        let mut rules = HashMap::new();
        rules.insert(
            "q0".to_string(),
            vec![
                PdaTransition {
                    input: Some("a".to_string()),
                    stack_top: "Z".to_string(),
                    next_state: "q1".to_string(),
                    push: vec!["Z".to_string()],
                },
                PdaTransition {
                    input: Some("a".to_string()),
                    stack_top: "Z".to_string(),
                    next_state: "q2".to_string(),
                    push: vec![],
                },
            ],
        );

        let pda = Pda {
            states: ["q0", "q1", "q2"].iter().map(|s| s.to_string()).collect(),
            input_alphabet: ["a"].iter().map(|s| s.to_string()).collect(),
            stack_alphabet: ["Z"].iter().map(|s| s.to_string()).collect(),
            rules,
            initial_state: "q0".to_string(),
            accepting_states: BTreeSet::new(),
            initial_stack_symbol: "Z".to_string(),
        };

        // Both rows match, but only the first listed one is ever taken.
        let t = pda.transition("q0", Some("a"), Some("Z")).unwrap();
        assert_eq!(t.next_state, "q1");

        // An empty stack never matches a row.
        assert!(pda.transition("q0", Some("a"), None).is_none());
    }

    #[test]
    fn test_automaton_kind_and_accessors() {
        let automaton = Automaton::Dfa(two_state_dfa());

        assert_eq!(automaton.kind(), "DFA");
        assert_eq!(automaton.initial_state(), "q0");
        assert_eq!(automaton.transition_count(), 1);
        assert!(automaton.accepting_states().contains("q1"));
    }
}
