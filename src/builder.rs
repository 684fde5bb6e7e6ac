//! Construction and validation of automaton definitions from raw tokenized
//! field values.
//!
//! The presentation layer is expected to have already split the user's text
//! into token lists and transition rows; this module only checks consistency
//! and assembles the immutable definition structures. An empty string in a
//! symbol field denotes epsilon where the model permits it. Construction is
//! atomic: on any validation error no partial automaton is returned.
//!
//! Transition row layouts (fields in order):
//! - DFA: `state, symbol, target`
//! - NFA: `state, symbol, target1, target2, ...` (empty symbol = epsilon)
//! - PDA: `state, symbol, stack-top, next-state, push` (empty symbol or
//!   missing push field = epsilon; the push field's characters are pushed in
//!   order, so its last character becomes the new stack top)
//! - TM:  `state, read, next-state, write, direction`

use std::collections::{BTreeSet, HashMap};

use crate::automaton::{
    Dfa, DfaTransition, Nfa, NfaTransition, Pda, PdaTransition, TmTransition, TuringMachine,
};
use crate::types::{AutomatonError, Direction};

/// Collects a token list into a label set, skipping empty tokens.
fn collect_labels(tokens: &[&str]) -> BTreeSet<String> {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Checks the rules common to every variant: a non-empty state set, a
/// declared initial state, and declared accepting states.
fn check_base(
    states: &BTreeSet<String>,
    initial_state: &str,
    accepting_states: &BTreeSet<String>,
) -> Result<(), AutomatonError> {
    if states.is_empty() {
        return Err(AutomatonError::NoStates);
    }

    if !states.contains(initial_state) {
        return Err(AutomatonError::InvalidInitialState(
            initial_state.to_string(),
        ));
    }

    for accepting in accepting_states {
        if !states.contains(accepting) {
            return Err(AutomatonError::InvalidAcceptingState(accepting.clone()));
        }
    }

    Ok(())
}

fn check_state(
    states: &BTreeSet<String>,
    state: &str,
    row: usize,
) -> Result<(), AutomatonError> {
    if !states.contains(state) {
        return Err(AutomatonError::UndeclaredState {
            row,
            state: state.to_string(),
        });
    }

    Ok(())
}

/// Builds and validates a DFA from tokenized fields.
///
/// Each row must have exactly three fields, and a (state, symbol) pair may
/// appear in at most one row.
pub fn build_dfa(
    states: &[&str],
    alphabet: &[&str],
    initial_state: &str,
    accepting_states: &[&str],
    rows: &[Vec<&str>],
) -> Result<Dfa, AutomatonError> {
    let states = collect_labels(states);
    let input_alphabet = collect_labels(alphabet);
    let accepting_states = collect_labels(accepting_states);

    check_base(&states, initial_state, &accepting_states)?;

    let mut rules: HashMap<String, Vec<DfaTransition>> = HashMap::new();

    for (i, fields) in rows.iter().enumerate() {
        let row = i + 1;
        let [from, symbol, to] = fields.as_slice() else {
            return Err(AutomatonError::MalformedRow {
                row,
                expected: "state,symbol,target",
            });
        };

        check_state(&states, from, row)?;
        check_state(&states, to, row)?;

        if !input_alphabet.contains(*symbol) {
            return Err(AutomatonError::UndeclaredSymbol {
                row,
                symbol: symbol.to_string(),
            });
        }

        let entries = rules.entry(from.to_string()).or_default();
        if entries.iter().any(|t| t.symbol == *symbol) {
            return Err(AutomatonError::DuplicateTransition {
                row,
                state: from.to_string(),
                symbol: symbol.to_string(),
            });
        }

        entries.push(DfaTransition {
            symbol: symbol.to_string(),
            next_state: to.to_string(),
        });
    }

    if rules.is_empty() {
        return Err(AutomatonError::EmptyTransitions);
    }

    Ok(Dfa {
        states,
        input_alphabet,
        rules,
        initial_state: initial_state.to_string(),
        accepting_states,
    })
}

/// Builds and validates an NFA from tokenized fields.
///
/// An empty symbol field denotes an epsilon transition. Rows sharing a
/// (state, symbol) pair accumulate into a single destination set.
pub fn build_nfa(
    states: &[&str],
    alphabet: &[&str],
    initial_state: &str,
    accepting_states: &[&str],
    rows: &[Vec<&str>],
) -> Result<Nfa, AutomatonError> {
    let states = collect_labels(states);
    let input_alphabet = collect_labels(alphabet);
    let accepting_states = collect_labels(accepting_states);

    check_base(&states, initial_state, &accepting_states)?;

    let mut rules: HashMap<String, Vec<NfaTransition>> = HashMap::new();

    for (i, fields) in rows.iter().enumerate() {
        let row = i + 1;
        if fields.len() < 3 {
            return Err(AutomatonError::MalformedRow {
                row,
                expected: "state,symbol,target1,target2,...",
            });
        }

        let from = fields[0];
        let symbol = (!fields[1].is_empty()).then(|| fields[1].to_string());
        let targets = &fields[2..];

        check_state(&states, from, row)?;
        for target in targets {
            check_state(&states, target, row)?;
        }

        if let Some(symbol) = &symbol {
            if !input_alphabet.contains(symbol) {
                return Err(AutomatonError::UndeclaredSymbol {
                    row,
                    symbol: symbol.clone(),
                });
            }
        }

        let entries = rules.entry(from.to_string()).or_default();
        match entries.iter().position(|t| t.symbol == symbol) {
            Some(index) => entries[index]
                .targets
                .extend(targets.iter().map(|t| t.to_string())),
            None => entries.push(NfaTransition {
                symbol,
                targets: targets.iter().map(|t| t.to_string()).collect(),
            }),
        }
    }

    if rules.is_empty() {
        return Err(AutomatonError::EmptyTransitions);
    }

    Ok(Nfa {
        states,
        input_alphabet,
        rules,
        initial_state: initial_state.to_string(),
        accepting_states,
    })
}

/// Builds and validates a PDA from tokenized fields.
///
/// The stack-top field of every row and every symbol of the push field must
/// name declared stack symbols; the initial stack symbol must as well. Rows
/// keep their declared order, which the engine honors when several rows match
/// a configuration.
pub fn build_pda(
    states: &[&str],
    alphabet: &[&str],
    stack_alphabet: &[&str],
    initial_state: &str,
    accepting_states: &[&str],
    rows: &[Vec<&str>],
    initial_stack_symbol: &str,
) -> Result<Pda, AutomatonError> {
    let states = collect_labels(states);
    let input_alphabet = collect_labels(alphabet);
    let stack_alphabet = collect_labels(stack_alphabet);
    let accepting_states = collect_labels(accepting_states);

    check_base(&states, initial_state, &accepting_states)?;

    if !stack_alphabet.contains(initial_stack_symbol) {
        return Err(AutomatonError::InvalidStackSymbol(
            initial_stack_symbol.to_string(),
        ));
    }

    let mut rules: HashMap<String, Vec<PdaTransition>> = HashMap::new();

    for (i, fields) in rows.iter().enumerate() {
        let row = i + 1;
        if fields.len() < 4 {
            return Err(AutomatonError::MalformedRow {
                row,
                expected: "state,symbol,stack-top,next-state,push",
            });
        }

        let from = fields[0];
        let input = (!fields[1].is_empty()).then(|| fields[1].to_string());
        let stack_top = fields[2];
        let next_state = fields[3];
        let push: Vec<String> = fields
            .get(4)
            .map(|field| field.chars().map(|c| c.to_string()).collect())
            .unwrap_or_default();

        check_state(&states, from, row)?;
        check_state(&states, next_state, row)?;

        if !stack_alphabet.contains(stack_top) {
            return Err(AutomatonError::UndeclaredStackSymbol {
                row,
                symbol: stack_top.to_string(),
            });
        }

        if let Some(input) = &input {
            if !input_alphabet.contains(input) {
                return Err(AutomatonError::UndeclaredSymbol {
                    row,
                    symbol: input.clone(),
                });
            }
        }

        for symbol in &push {
            if !stack_alphabet.contains(symbol) {
                return Err(AutomatonError::UndeclaredStackSymbol {
                    row,
                    symbol: symbol.clone(),
                });
            }
        }

        rules.entry(from.to_string()).or_default().push(PdaTransition {
            input,
            stack_top: stack_top.to_string(),
            next_state: next_state.to_string(),
            push,
        });
    }

    if rules.is_empty() {
        return Err(AutomatonError::EmptyTransitions);
    }

    Ok(Pda {
        states,
        input_alphabet,
        stack_alphabet,
        rules,
        initial_state: initial_state.to_string(),
        accepting_states,
        initial_stack_symbol: initial_stack_symbol.to_string(),
    })
}

/// Builds and validates a Turing machine from tokenized fields.
///
/// The tape alphabet must contain every input symbol plus the blank, and the
/// blank may not itself be an input symbol. A later row for the same
/// (state, read) pair replaces the earlier one, keeping δ a function.
pub fn build_tm(
    states: &[&str],
    alphabet: &[&str],
    tape_alphabet: &[&str],
    initial_state: &str,
    accepting_states: &[&str],
    rows: &[Vec<&str>],
    blank: &str,
) -> Result<TuringMachine, AutomatonError> {
    let states = collect_labels(states);
    let input_alphabet = collect_labels(alphabet);
    let tape_alphabet = collect_labels(tape_alphabet);
    let accepting_states = collect_labels(accepting_states);

    check_base(&states, initial_state, &accepting_states)?;

    if !tape_alphabet.contains(blank) {
        return Err(AutomatonError::InvalidBlankSymbol(format!(
            "'{blank}' is not in the tape alphabet"
        )));
    }
    if input_alphabet.contains(blank) {
        return Err(AutomatonError::InvalidBlankSymbol(format!(
            "'{blank}' is also an input symbol"
        )));
    }
    for symbol in &input_alphabet {
        if !tape_alphabet.contains(symbol) {
            return Err(AutomatonError::InputSymbolNotOnTape(symbol.clone()));
        }
    }

    let mut rules: HashMap<String, Vec<TmTransition>> = HashMap::new();

    for (i, fields) in rows.iter().enumerate() {
        let row = i + 1;
        let [from, read, next_state, write, direction] = fields.as_slice() else {
            return Err(AutomatonError::MalformedRow {
                row,
                expected: "state,read,next-state,write,direction",
            });
        };

        check_state(&states, from, row)?;
        check_state(&states, next_state, row)?;

        for symbol in [read, write] {
            if !tape_alphabet.contains(*symbol) {
                return Err(AutomatonError::UndeclaredTapeSymbol {
                    row,
                    symbol: symbol.to_string(),
                });
            }
        }

        let direction: Direction = direction
            .parse()
            .map_err(|token| AutomatonError::InvalidDirection { row, token })?;

        let transition = TmTransition {
            read: read.to_string(),
            next_state: next_state.to_string(),
            write: write.to_string(),
            direction,
        };

        let entries = rules.entry(from.to_string()).or_default();
        match entries.iter().position(|t| t.read == *read) {
            // Function semantics: the later row wins.
            Some(index) => entries[index] = transition,
            None => entries.push(transition),
        }
    }

    if rules.is_empty() {
        return Err(AutomatonError::EmptyTransitions);
    }

    Ok(TuringMachine {
        states,
        input_alphabet,
        tape_alphabet,
        rules,
        initial_state: initial_state.to_string(),
        accepting_states,
        blank: blank.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_BLANK_SYMBOL, DEFAULT_STACK_SYMBOL};

    fn ends_in_01_rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["q0", "0", "q1"],
            vec!["q0", "1", "q0"],
            vec!["q1", "0", "q1"],
            vec!["q1", "1", "q2"],
            vec!["q2", "0", "q1"],
            vec!["q2", "1", "q0"],
        ]
    }

    #[test]
    fn test_build_dfa() {
        let dfa = build_dfa(
            &["q0", "q1", "q2"],
            &["0", "1"],
            "q0",
            &["q2"],
            &ends_in_01_rows(),
        )
        .unwrap();

        assert_eq!(dfa.states.len(), 3);
        assert_eq!(dfa.transition_count(), 6);
        assert_eq!(dfa.transition("q1", "1").unwrap().next_state, "q2");
    }

    #[test]
    fn test_dfa_duplicate_transition() {
        let mut rows = ends_in_01_rows();
        rows.push(vec!["q0", "0", "q2"]);

        let err = build_dfa(&["q0", "q1", "q2"], &["0", "1"], "q0", &["q2"], &rows)
            .unwrap_err();

        assert_eq!(
            err,
            AutomatonError::DuplicateTransition {
                row: 7,
                state: "q0".to_string(),
                symbol: "0".to_string(),
            }
        );
    }

    #[test]
    fn test_dfa_undeclared_references() {
        let err = build_dfa(
            &["q0"],
            &["0"],
            "q0",
            &[],
            &[vec!["q0", "0", "q9"]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UndeclaredState {
                row: 1,
                state: "q9".to_string(),
            }
        );

        let err = build_dfa(
            &["q0"],
            &["0"],
            "q0",
            &[],
            &[vec!["q0", "x", "q0"]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UndeclaredSymbol {
                row: 1,
                symbol: "x".to_string(),
            }
        );
    }

    #[test]
    fn test_dfa_base_errors() {
        assert_eq!(
            build_dfa(&[], &["0"], "q0", &[], &[]).unwrap_err(),
            AutomatonError::NoStates
        );
        assert_eq!(
            build_dfa(&["q0"], &["0"], "q9", &[], &[]).unwrap_err(),
            AutomatonError::InvalidInitialState("q9".to_string())
        );
        assert_eq!(
            build_dfa(&["q0"], &["0"], "q0", &["q9"], &[]).unwrap_err(),
            AutomatonError::InvalidAcceptingState("q9".to_string())
        );
        assert_eq!(
            build_dfa(&["q0"], &["0"], "q0", &[], &[]).unwrap_err(),
            AutomatonError::EmptyTransitions
        );
    }

    #[test]
    fn test_dfa_malformed_row() {
        let err = build_dfa(&["q0"], &["0"], "q0", &[], &[vec!["q0", "0"]]).unwrap_err();
        assert!(matches!(err, AutomatonError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_build_nfa_accumulates_targets() {
        let nfa = build_nfa(
            &["q0", "q1", "q2"],
            &["a"],
            "q0",
            &["q2"],
            &[
                vec!["q0", "a", "q0", "q1"],
                vec!["q0", "a", "q2"],
                vec!["q0", "", "q1"],
            ],
        )
        .unwrap();

        // Two rows for (q0, a) merged into one destination set.
        let targets = nfa.targets("q0", Some("a")).unwrap();
        assert_eq!(targets.len(), 3);

        let epsilon = nfa.targets("q0", None).unwrap();
        assert!(epsilon.contains("q1"));
    }

    #[test]
    fn test_nfa_epsilon_field_skips_alphabet_check() {
        // An empty symbol field is epsilon, not an alphabet violation.
        let nfa = build_nfa(
            &["q0", "q1"],
            &["a"],
            "q0",
            &["q1"],
            &[vec!["q0", "", "q1"]],
        );
        assert!(nfa.is_ok());
    }

    #[test]
    fn test_build_pda() {
        let pda = build_pda(
            &["q0", "q1", "q2"],
            &["a", "b"],
            &["Z", "a"],
            "q0",
            &["q2"],
            &[
                vec!["q0", "a", "Z", "q0", "Za"],
                vec!["q0", "a", "a", "q0", "aa"],
                vec!["q0", "b", "a", "q1", ""],
                vec!["q1", "b", "a", "q1", ""],
                vec!["q1", "", "Z", "q2", "Z"],
            ],
            DEFAULT_STACK_SYMBOL,
        )
        .unwrap();

        // The push field's characters are pushed in order.
        let t = pda.transition("q0", Some("a"), Some("Z")).unwrap();
        assert_eq!(t.push, vec!["Z".to_string(), "a".to_string()]);

        // A missing push field means nothing is pushed.
        let t = pda.transition("q0", Some("b"), Some("a")).unwrap();
        assert!(t.push.is_empty());
    }

    #[test]
    fn test_pda_stack_symbol_errors() {
        let err = build_pda(
            &["q0"],
            &["a"],
            &["Z"],
            "q0",
            &[],
            &[vec!["q0", "a", "X", "q0", ""]],
            DEFAULT_STACK_SYMBOL,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UndeclaredStackSymbol {
                row: 1,
                symbol: "X".to_string(),
            }
        );

        let err = build_pda(
            &["q0"],
            &["a"],
            &["Z"],
            "q0",
            &[],
            &[vec!["q0", "a", "Z", "q0", "ZY"]],
            DEFAULT_STACK_SYMBOL,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UndeclaredStackSymbol {
                row: 1,
                symbol: "Y".to_string(),
            }
        );

        let err = build_pda(
            &["q0"],
            &["a"],
            &["X"],
            "q0",
            &[],
            &[vec!["q0", "a", "X", "q0", ""]],
            DEFAULT_STACK_SYMBOL,
        )
        .unwrap_err();
        assert_eq!(err, AutomatonError::InvalidStackSymbol("Z".to_string()));
    }

    #[test]
    fn test_build_tm() {
        let tm = build_tm(
            &["q0", "q1", "q2"],
            &["a", "b"],
            &["a", "b", "_"],
            "q0",
            &["q2"],
            &[
                vec!["q0", "a", "q0", "a", "R"],
                vec!["q0", "b", "q1", "b", "R"],
                vec!["q0", "_", "q2", "_", "R"],
                vec!["q1", "b", "q1", "b", "R"],
                vec!["q1", "_", "q2", "_", "R"],
            ],
            DEFAULT_BLANK_SYMBOL,
        )
        .unwrap();

        assert_eq!(tm.transition_count(), 5);
        let t = tm.transition("q0", "b").unwrap();
        assert_eq!(t.next_state, "q1");
        assert_eq!(t.direction, Direction::Right);
    }

    #[test]
    fn test_tm_duplicate_row_replaces() {
        let tm = build_tm(
            &["q0", "q1"],
            &["a"],
            &["a", "_"],
            "q0",
            &["q1"],
            &[
                vec!["q0", "a", "q0", "a", "R"],
                vec!["q0", "a", "q1", "_", "L"],
            ],
            DEFAULT_BLANK_SYMBOL,
        )
        .unwrap();

        assert_eq!(tm.transition_count(), 1);
        let t = tm.transition("q0", "a").unwrap();
        assert_eq!(t.next_state, "q1");
        assert_eq!(t.direction, Direction::Left);
    }

    #[test]
    fn test_tm_direction_and_blank_errors() {
        let err = build_tm(
            &["q0"],
            &["a"],
            &["a", "_"],
            "q0",
            &[],
            &[vec!["q0", "a", "q0", "a", "U"]],
            DEFAULT_BLANK_SYMBOL,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidDirection {
                row: 1,
                token: "U".to_string(),
            }
        );

        // Blank missing from the tape alphabet.
        let err = build_tm(&["q0"], &["a"], &["a"], "q0", &[], &[], DEFAULT_BLANK_SYMBOL)
            .unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidBlankSymbol(_)));

        // Blank colliding with the input alphabet.
        let err = build_tm(
            &["q0"],
            &["a", "_"],
            &["a", "_"],
            "q0",
            &[],
            &[],
            DEFAULT_BLANK_SYMBOL,
        )
        .unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidBlankSymbol(_)));

        // Input symbol missing from the tape alphabet.
        let err = build_tm(
            &["q0"],
            &["a", "b"],
            &["a", "_"],
            "q0",
            &[],
            &[],
            DEFAULT_BLANK_SYMBOL,
        )
        .unwrap_err();
        assert_eq!(err, AutomatonError::InputSymbolNotOnTape("b".to_string()));
    }
}
