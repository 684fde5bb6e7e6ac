//! Core data structures and types shared by every automaton variant:
//! direction tokens, simulation results, and the error taxonomy for
//! definition validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The maximum number of Turing Machine steps to execute before the run is
/// rejected as a possible infinite loop.
pub const MAX_EXECUTION_STEPS: usize = 10_000;
/// The default blank symbol for Turing Machine tapes.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// The default initial stack symbol for pushdown automata.
pub const DEFAULT_STACK_SYMBOL: &str = "Z";

/// How epsilon is rendered in traces and diagnostics.
pub const EPSILON: &str = "ε";

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Signed head displacement for this direction.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parses a direction token case-insensitively. Accepts `L`/`R` and the
    /// spelled-out `Left`/`Right` forms; anything else is an error carrying
    /// the offending token.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_uppercase().as_str() {
            "L" | "LEFT" => Ok(Direction::Left),
            "R" | "RIGHT" => Ok(Direction::Right),
            _ => Err(token.to_string()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "L"),
            Direction::Right => write!(f, "R"),
        }
    }
}

/// The outcome of one simulation call.
///
/// Every engine returns one of these: a definite verdict, the full
/// human-readable step trace built fresh for this call, and, for runs that
/// ended on a diagnostic (unknown symbol, missing transition, step bound),
/// the diagnostic itself. Simulation failures never surface as `Err` at the
/// call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Whether the input string was accepted.
    pub accepted: bool,
    /// Ordered, human-readable step records.
    pub trace: Vec<String>,
    /// Diagnostic for runs that stopped abnormally; `None` for an ordinary
    /// accept or reject verdict.
    pub error: Option<String>,
}

impl Run {
    /// A run that ended with a definite verdict and no diagnostic.
    pub fn verdict(accepted: bool, trace: Vec<String>) -> Self {
        Self {
            accepted,
            trace,
            error: None,
        }
    }

    /// A rejecting run that stopped on a diagnostic.
    pub fn rejected(trace: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            accepted: false,
            trace,
            error: Some(error.into()),
        }
    }
}

/// Errors reported while validating an automaton definition.
///
/// Row indices are 1-based, matching the order in which transition rows were
/// supplied. Construction is atomic: any of these means no automaton was
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// The definition declares no states.
    #[error("No states declared")]
    NoStates,
    /// The start state is not a declared state.
    #[error("Initial state '{0}' is not a declared state")]
    InvalidInitialState(String),
    /// An accepting state is not a declared state.
    #[error("Accepting state '{0}' is not a declared state")]
    InvalidAcceptingState(String),
    /// A transition row has the wrong number of fields.
    #[error("Row {row}: malformed transition, expected fields: {expected}")]
    MalformedRow { row: usize, expected: &'static str },
    /// A transition row references an undeclared state.
    #[error("Row {row}: state '{state}' is not a declared state")]
    UndeclaredState { row: usize, state: String },
    /// A transition row references a symbol outside the input alphabet.
    #[error("Row {row}: symbol '{symbol}' is not in the input alphabet")]
    UndeclaredSymbol { row: usize, symbol: String },
    /// A transition row references a symbol outside the stack alphabet.
    #[error("Row {row}: stack symbol '{symbol}' is not in the stack alphabet")]
    UndeclaredStackSymbol { row: usize, symbol: String },
    /// A transition row references a symbol outside the tape alphabet.
    #[error("Row {row}: tape symbol '{symbol}' is not in the tape alphabet")]
    UndeclaredTapeSymbol { row: usize, symbol: String },
    /// Two DFA rows define the same (state, symbol) pair.
    #[error("Row {row}: duplicate transition δ({state}, {symbol})")]
    DuplicateTransition {
        row: usize,
        state: String,
        symbol: String,
    },
    /// The definition contains no transition rows at all.
    #[error("No transitions defined")]
    EmptyTransitions,
    /// A direction token is not one of L/R.
    #[error("Row {row}: invalid direction '{token}', use L or R")]
    InvalidDirection { row: usize, token: String },
    /// The initial stack symbol is not in the stack alphabet.
    #[error("Initial stack symbol '{0}' is not in the stack alphabet")]
    InvalidStackSymbol(String),
    /// The blank symbol is missing from the tape alphabet or collides with
    /// the input alphabet.
    #[error("Invalid blank symbol: {0}")]
    InvalidBlankSymbol(String),
    /// The tape alphabet does not contain an input symbol.
    #[error("Input symbol '{0}' is missing from the tape alphabet")]
    InputSymbolNotOnTape(String),
}

/// Renders a state set as `{a, b, c}` in sorted order, `{}` when empty.
pub fn format_set(set: &BTreeSet<String>) -> String {
    let mut out = String::from("{");
    for (i, item) in set.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item);
    }
    out.push('}');
    out
}

/// Renders an epsilon-or-symbol field the way traces show it.
pub fn format_symbol(symbol: Option<&str>) -> &str {
    symbol.unwrap_or(EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("L".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("r".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("up".parse::<Direction>(), Err("up".to_string()));
    }

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        let right: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, Direction::Left);
        assert_eq!(right, Direction::Right);
    }

    #[test]
    fn test_format_set() {
        let mut set = BTreeSet::new();
        assert_eq!(format_set(&set), "{}");

        set.insert("q1".to_string());
        set.insert("q0".to_string());
        assert_eq!(format_set(&set), "{q0, q1}");
    }

    #[test]
    fn test_error_display() {
        let error = AutomatonError::DuplicateTransition {
            row: 3,
            state: "q0".to_string(),
            symbol: "1".to_string(),
        };

        let message = format!("{}", error);
        assert!(message.contains("Row 3"));
        assert!(message.contains("δ(q0, 1)"));
    }
}
