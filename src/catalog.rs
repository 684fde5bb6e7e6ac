//! Built-in example automata, one per classic textbook language, ready to
//! simulate without typing in a definition first.

use crate::automaton::Automaton;
use crate::builder::{build_dfa, build_nfa, build_pda, build_tm};
use crate::types::{DEFAULT_BLANK_SYMBOL, DEFAULT_STACK_SYMBOL};

lazy_static::lazy_static! {
    /// The built-in catalog, constructed once on first access.
    pub static ref CATALOG: Vec<CatalogEntry> = build_catalog();
}

/// One named, ready-built example automaton.
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub automaton: Automaton,
}

/// Summary record for listing catalog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogInfo {
    pub index: usize,
    pub name: &'static str,
    pub kind: &'static str,
    pub state_count: usize,
    pub transition_count: usize,
}

/// Lookup surface over the built-in catalog.
pub struct Catalog;

impl Catalog {
    /// Number of built-in examples.
    pub fn count() -> usize {
        CATALOG.len()
    }

    /// Entry at `index`, if in range.
    pub fn get(index: usize) -> Option<&'static CatalogEntry> {
        CATALOG.get(index)
    }

    /// Entry with the exact given name.
    pub fn find(name: &str) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|entry| entry.name == name)
    }

    /// Names of all entries, in catalog order.
    pub fn names() -> Vec<&'static str> {
        CATALOG.iter().map(|entry| entry.name).collect()
    }

    /// Indexes of entries whose name contains `query`, case-insensitively.
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        CATALOG
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Summary of the entry at `index`, if in range.
    pub fn info(index: usize) -> Option<CatalogInfo> {
        Catalog::get(index).map(|entry| CatalogInfo {
            index,
            name: entry.name,
            kind: entry.automaton.kind(),
            state_count: entry.automaton.states().len(),
            transition_count: entry.automaton.transition_count(),
        })
    }
}

fn build_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            name: "Ends in 01",
            description: "DFA accepting binary strings ending in 01",
            automaton: Automaton::Dfa(
                build_dfa(
                    &["q0", "q1", "q2"],
                    &["0", "1"],
                    "q0",
                    &["q2"],
                    &[
                        vec!["q0", "0", "q1"],
                        vec!["q0", "1", "q0"],
                        vec!["q1", "0", "q1"],
                        vec!["q1", "1", "q2"],
                        vec!["q2", "0", "q1"],
                        vec!["q2", "1", "q0"],
                    ],
                )
                .expect("built-in definition is valid"),
            ),
        },
        CatalogEntry {
            name: "Even number of 0s",
            description: "DFA accepting binary strings with an even count of 0s",
            automaton: Automaton::Dfa(
                build_dfa(
                    &["q0", "q1"],
                    &["0", "1"],
                    "q0",
                    &["q0"],
                    &[
                        vec!["q0", "0", "q1"],
                        vec!["q0", "1", "q0"],
                        vec!["q1", "0", "q0"],
                        vec!["q1", "1", "q1"],
                    ],
                )
                .expect("built-in definition is valid"),
            ),
        },
        CatalogEntry {
            name: "a*b*c* with epsilon moves",
            description: "NFA accepting a's, then b's, then c's, linked by ε-transitions",
            automaton: Automaton::Nfa(
                build_nfa(
                    &["q0", "q1", "q2"],
                    &["a", "b", "c"],
                    "q0",
                    &["q2"],
                    &[
                        vec!["q0", "a", "q0", "q1"],
                        vec!["q0", "", "q1"],
                        vec!["q1", "b", "q1"],
                        vec!["q1", "", "q2"],
                        vec!["q2", "c", "q2"],
                    ],
                )
                .expect("built-in definition is valid"),
            ),
        },
        CatalogEntry {
            name: "Balanced a^n b^n",
            description: "PDA accepting equal runs of a's then b's by final state",
            automaton: Automaton::Pda(
                build_pda(
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
                .expect("built-in definition is valid"),
            ),
        },
        CatalogEntry {
            name: "a*b* (TM)",
            description: "Turing machine scanning left to right for a's then b's",
            automaton: Automaton::Tm(
                build_tm(
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
                .expect("built-in definition is valid"),
            ),
        },
        CatalogEntry {
            name: "0* (TM)",
            description: "Turing machine accepting any run of 0s, including none",
            automaton: Automaton::Tm(
                build_tm(
                    &["q0", "q1"],
                    &["0"],
                    &["0", "_"],
                    "q0",
                    &["q1"],
                    &[
                        vec!["q0", "0", "q0", "0", "R"],
                        vec!["q0", "_", "q1", "_", "R"],
                    ],
                    DEFAULT_BLANK_SYMBOL,
                )
                .expect("built-in definition is valid"),
            ),
        },
    ]
}
