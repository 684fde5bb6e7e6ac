//! Advisory pre-execution analysis for validated automata.
//!
//! The builder already rejected anything inconsistent; the checks here flag
//! definitions that are valid but probably not what the author meant: states
//! no input can ever reach, non-accepting states the run can only get stuck
//! in, and input symbols no transition ever reads. Findings are reports, not
//! errors, and never block simulation.

use std::collections::HashSet;
use std::fmt;

use crate::automaton::Automaton;

/// One advisory finding about a validated definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// States that cannot be reached from the initial state through any
    /// sequence of transitions.
    UnreachableStates(Vec<String>),
    /// Non-accepting states with no outgoing transitions; a run entering one
    /// can only reject.
    DeadEndStates(Vec<String>),
    /// Declared input symbols no transition ever reads.
    UnusedInputSymbols(Vec<String>),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnreachableStates(states) => {
                write!(f, "Unreachable states: {}", states.join(", "))
            }
            Finding::DeadEndStates(states) => {
                write!(f, "Non-accepting dead-end states: {}", states.join(", "))
            }
            Finding::UnusedInputSymbols(symbols) => {
                write!(f, "Input symbols never read: {}", symbols.join(", "))
            }
        }
    }
}

/// Analyzes a validated automaton and returns every finding, in a fixed
/// order. An empty vector means nothing looked suspicious.
pub fn analyze(automaton: &Automaton) -> Vec<Finding> {
    [
        check_unreachable_states,
        check_dead_end_states,
        check_unused_symbols,
    ]
    .iter()
    .filter_map(|check| check(automaton))
    .collect()
}

/// Source states that have at least one outgoing transition.
fn states_with_rules(automaton: &Automaton) -> HashSet<&str> {
    match automaton {
        Automaton::Dfa(a) => a.rules.keys().map(String::as_str).collect(),
        Automaton::Nfa(a) => a.rules.keys().map(String::as_str).collect(),
        Automaton::Pda(a) => a.rules.keys().map(String::as_str).collect(),
        Automaton::Tm(a) => a.rules.keys().map(String::as_str).collect(),
    }
}

/// All states directly reachable from `state` in one transition.
fn successors<'a>(automaton: &'a Automaton, state: &str) -> Vec<&'a str> {
    match automaton {
        Automaton::Dfa(a) => a
            .rules
            .get(state)
            .into_iter()
            .flatten()
            .map(|t| t.next_state.as_str())
            .collect(),
        Automaton::Nfa(a) => a
            .rules
            .get(state)
            .into_iter()
            .flatten()
            .flat_map(|t| t.targets.iter().map(String::as_str))
            .collect(),
        Automaton::Pda(a) => a
            .rules
            .get(state)
            .into_iter()
            .flatten()
            .map(|t| t.next_state.as_str())
            .collect(),
        Automaton::Tm(a) => a
            .rules
            .get(state)
            .into_iter()
            .flatten()
            .map(|t| t.next_state.as_str())
            .collect(),
    }
}

/// Breadth-first traversal from the initial state; anything declared but
/// never visited is unreachable.
fn check_unreachable_states(automaton: &Automaton) -> Option<Finding> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = vec![automaton.initial_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }
        for next in successors(automaton, state) {
            if !visited.contains(next) {
                queue.push(next);
            }
        }
    }

    let mut unreachable: Vec<String> = automaton
        .states()
        .iter()
        .filter(|s| !visited.contains(s.as_str()))
        .cloned()
        .collect();

    if unreachable.is_empty() {
        return None;
    }
    unreachable.sort();
    Some(Finding::UnreachableStates(unreachable))
}

fn check_dead_end_states(automaton: &Automaton) -> Option<Finding> {
    let with_rules = states_with_rules(automaton);

    let mut dead_ends: Vec<String> = automaton
        .states()
        .iter()
        .filter(|s| !with_rules.contains(s.as_str()) && !automaton.accepting_states().contains(*s))
        .cloned()
        .collect();

    if dead_ends.is_empty() {
        return None;
    }
    dead_ends.sort();
    Some(Finding::DeadEndStates(dead_ends))
}

fn check_unused_symbols(automaton: &Automaton) -> Option<Finding> {
    let (alphabet, used): (&std::collections::BTreeSet<String>, HashSet<&str>) = match automaton {
        Automaton::Dfa(a) => (
            &a.input_alphabet,
            a.rules
                .values()
                .flatten()
                .map(|t| t.symbol.as_str())
                .collect(),
        ),
        Automaton::Nfa(a) => (
            &a.input_alphabet,
            a.rules
                .values()
                .flatten()
                .filter_map(|t| t.symbol.as_deref())
                .collect(),
        ),
        Automaton::Pda(a) => (
            &a.input_alphabet,
            a.rules
                .values()
                .flatten()
                .filter_map(|t| t.input.as_deref())
                .collect(),
        ),
        Automaton::Tm(a) => (
            &a.input_alphabet,
            a.rules
                .values()
                .flatten()
                .map(|t| t.read.as_str())
                .collect(),
        ),
    };

    let unused: Vec<String> = alphabet
        .iter()
        .filter(|s| !used.contains(s.as_str()))
        .cloned()
        .collect();

    if unused.is_empty() {
        return None;
    }
    Some(Finding::UnusedInputSymbols(unused))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_dfa, build_nfa};

    #[test]
    fn test_clean_dfa_has_no_findings() {
        let dfa = build_dfa(
            &["q0", "q1"],
            &["0", "1"],
            "q0",
            &["q1"],
            &[
                vec!["q0", "0", "q1"],
                vec!["q0", "1", "q0"],
                vec!["q1", "0", "q1"],
                vec!["q1", "1", "q0"],
            ],
        )
        .unwrap();

        assert!(analyze(&Automaton::Dfa(dfa)).is_empty());
    }

    #[test]
    fn test_detects_unreachable_state() {
        // q2 is declared and has rules, but no path from q0 reaches it.
        let dfa = build_dfa(
            &["q0", "q1", "q2"],
            &["0"],
            "q0",
            &["q1"],
            &[vec!["q0", "0", "q1"], vec!["q2", "0", "q1"]],
        )
        .unwrap();

        let findings = analyze(&Automaton::Dfa(dfa));
        assert!(findings.contains(&Finding::UnreachableStates(vec!["q2".to_string()])));
    }

    #[test]
    fn test_detects_dead_end_state() {
        // q1 is non-accepting and has no outgoing rules.
        let dfa = build_dfa(
            &["q0", "q1"],
            &["0"],
            "q0",
            &[],
            &[vec!["q0", "0", "q1"]],
        )
        .unwrap();

        let findings = analyze(&Automaton::Dfa(dfa));
        assert!(findings.contains(&Finding::DeadEndStates(vec!["q1".to_string()])));
    }

    #[test]
    fn test_accepting_dead_end_is_fine() {
        let dfa = build_dfa(
            &["q0", "q1"],
            &["0"],
            "q0",
            &["q1"],
            &[vec!["q0", "0", "q1"]],
        )
        .unwrap();

        let findings = analyze(&Automaton::Dfa(dfa));
        assert!(!findings
            .iter()
            .any(|f| matches!(f, Finding::DeadEndStates(_))));
    }

    #[test]
    fn test_detects_unused_symbol() {
        let nfa = build_nfa(
            &["q0", "q1"],
            &["a", "b"],
            "q0",
            &["q1"],
            &[vec!["q0", "a", "q1"], vec!["q1", "", "q0"]],
        )
        .unwrap();

        let findings = analyze(&Automaton::Nfa(nfa));
        assert!(findings.contains(&Finding::UnusedInputSymbols(vec!["b".to_string()])));
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::UnreachableStates(vec!["q3".to_string(), "q4".to_string()]);
        assert_eq!(finding.to_string(), "Unreachable states: q3, q4");
    }
}
