//! The four simulation engines: deterministic stepping (DFA), parallel
//! state-set simulation with epsilon-closure (NFA), single-path stack
//! stepping (PDA), and bounded tape stepping (TM).
//!
//! Every engine is a pure function of (definition, input): each call owns its
//! own execution state and builds its trace from scratch, so concurrent
//! simulations of the same definition need no synchronization. Run-time
//! failures (unknown symbol, missing transition, step bound) never surface as
//! `Err`; they come back inside the returned [`Run`].

use std::collections::{BTreeSet, HashMap};

use crate::automaton::{Automaton, Dfa, Nfa, Pda, TuringMachine};
use crate::types::{format_set, format_symbol, Run, MAX_EXECUTION_STEPS};

/// Cells shown on each side of the head in TM tape snapshots.
const TAPE_WINDOW: i64 = 10;

impl Dfa {
    /// Runs the DFA over `input`, one transition per symbol.
    ///
    /// Rejects at the first symbol outside the alphabet or the first
    /// undefined transition; otherwise accepts iff the last state reached is
    /// accepting. Terminates in at most `input.len()` steps by construction.
    pub fn simulate(&self, input: &str) -> Run {
        let mut trace = Vec::new();
        let mut current = self.initial_state.as_str();

        trace.push(format!("Initial state: {current}"));

        for (i, ch) in input.chars().enumerate() {
            let symbol = ch.to_string();

            if !self.input_alphabet.contains(&symbol) {
                let diagnostic = format!("Symbol '{symbol}' is not in the input alphabet");
                trace.push(format!("Error: {diagnostic}"));
                trace.push(format!(
                    "Valid alphabet: {}",
                    format_set(&self.input_alphabet)
                ));
                return Run::rejected(trace, diagnostic);
            }

            match self.transition(current, &symbol) {
                Some(t) => {
                    trace.push(format!(
                        "Step {}: δ({current}, '{symbol}') = {}",
                        i + 1,
                        t.next_state
                    ));
                    current = &t.next_state;
                }
                None => {
                    trace.push(format!("Step {}: δ({current}, '{symbol}') = undefined", i + 1));
                    trace.push("STRING REJECTED".to_string());
                    let diagnostic = format!("No transition defined for δ({current}, '{symbol}')");
                    return Run::rejected(trace, diagnostic);
                }
            }
        }

        trace.push(format!("Final state reached: {current}"));
        let accepted = self.accepting_states.contains(current);
        trace.push(
            if accepted {
                "Result: STRING ACCEPTED"
            } else {
                "Result: STRING REJECTED"
            }
            .to_string(),
        );

        Run::verdict(accepted, trace)
    }
}

impl Nfa {
    /// The smallest set containing `state` and closed under epsilon
    /// transitions, computed by worklist traversal. Terminates because the
    /// state set is finite.
    pub fn epsilon_closure(&self, state: &str) -> BTreeSet<String> {
        let mut closure = BTreeSet::new();
        closure.insert(state.to_string());
        let mut worklist = vec![state.to_string()];

        while let Some(state) = worklist.pop() {
            if let Some(targets) = self.targets(&state, None) {
                for next in targets {
                    if closure.insert(next.clone()) {
                        worklist.push(next.clone());
                    }
                }
            }
        }

        closure
    }

    /// Union of the epsilon-closures of the members of `states`.
    pub fn epsilon_closure_set(&self, states: &BTreeSet<String>) -> BTreeSet<String> {
        let mut closure = BTreeSet::new();
        for state in states {
            closure.extend(self.epsilon_closure(state));
        }
        closure
    }

    /// Runs the NFA over `input`, tracking every reachable state in
    /// parallel. Accepts iff the final active set intersects the accepting
    /// states.
    pub fn simulate(&self, input: &str) -> Run {
        let mut trace = Vec::new();
        let mut active = self.epsilon_closure(&self.initial_state);

        trace.push(format!(
            "Initial states (with ε-closure): {}",
            format_set(&active)
        ));

        for (i, ch) in input.chars().enumerate() {
            let symbol = ch.to_string();

            if !self.input_alphabet.contains(&symbol) {
                let diagnostic = format!("Symbol '{symbol}' is not in the input alphabet");
                trace.push(format!("Error: {diagnostic}"));
                return Run::rejected(trace, diagnostic);
            }

            let mut next = BTreeSet::new();
            for state in &active {
                if let Some(targets) = self.targets(state, Some(symbol.as_str())) {
                    next.extend(targets.iter().cloned());
                }
            }

            if next.is_empty() {
                let diagnostic = format!(
                    "No transition on '{symbol}' from {}",
                    format_set(&active)
                );
                trace.push(format!("Step {}: {diagnostic}", i + 1));
                trace.push("STRING REJECTED".to_string());
                return Run::rejected(trace, diagnostic);
            }

            active = self.epsilon_closure_set(&next);
            trace.push(format!("Step {}: '{symbol}' → {}", i + 1, format_set(&active)));
        }

        let reached: BTreeSet<String> = active
            .intersection(&self.accepting_states)
            .cloned()
            .collect();
        trace.push(format!("Accepting states reached: {}", format_set(&reached)));

        let accepted = !reached.is_empty();
        trace.push(
            if accepted {
                "Result: STRING ACCEPTED"
            } else {
                "Result: STRING REJECTED"
            }
            .to_string(),
        );

        Run::verdict(accepted, trace)
    }
}

impl Pda {
    /// Runs the PDA over `input`, single path, never backtracking: when
    /// several rows match a configuration only the first declared one is
    /// taken.
    ///
    /// The position advances by one on every step, epsilon steps included, so
    /// the loop runs at most `input.len() + 1` iterations; the iteration at
    /// end-of-string gives trailing epsilon moves a chance to fire. Accepts
    /// at loop exit if the current state is accepting or the stack is empty;
    /// either condition suffices.
    pub fn simulate(&self, input: &str) -> Run {
        let mut trace = Vec::new();
        let symbols: Vec<String> = input.chars().map(|c| c.to_string()).collect();
        let mut current = self.initial_state.clone();
        let mut stack = vec![self.initial_stack_symbol.clone()];
        let mut position = 0usize;

        trace.push(format!("Initial state: {current}"));
        trace.push(format!("Initial stack: {}", format_stack(&stack)));

        while position <= symbols.len() {
            let input_symbol = symbols.get(position).map(String::as_str);
            let input_display = format_symbol(input_symbol).to_string();
            let top_display = stack
                .last()
                .map(String::as_str)
                .unwrap_or("(empty)")
                .to_string();

            let transition = self
                .transition(&current, input_symbol, stack.last().map(String::as_str))
                .cloned();
            let Some(t) = transition else {
                trace.push(format!("Step {position}: no transition defined"));
                trace.push(format!("  State: {current}"));
                trace.push(format!("  Input: '{input_display}'"));
                trace.push(format!("  Stack top: {top_display}"));
                trace.push("STRING REJECTED".to_string());
                let diagnostic = format!(
                    "No transition for state {current}, input '{input_display}', stack top {top_display}"
                );
                return Run::rejected(trace, diagnostic);
            };

            // Pop the matched top, then push the sequence in order; its last
            // element becomes the new top.
            stack.pop();
            stack.extend(t.push.iter().cloned());

            trace.push(format!("Step {position}:"));
            trace.push(format!("  Input: '{input_display}'"));
            trace.push(format!("  Stack top: {top_display}"));
            trace.push(format!("  Next state: {}", t.next_state));
            trace.push(format!(
                "  Stack op: pop {top_display}, push {}",
                format_stack(&t.push)
            ));
            trace.push(format!("  Stack after: {}", format_stack(&stack)));

            current = t.next_state;
            position += 1;
        }

        trace.push(format!("Final state: {current}"));
        trace.push(format!("Final stack: {}", format_stack(&stack)));

        // Dual criterion: accepting state or empty stack.
        let accepted = self.accepting_states.contains(&current) || stack.is_empty();
        trace.push(
            if accepted {
                "Result: STRING ACCEPTED"
            } else {
                "Result: STRING REJECTED"
            }
            .to_string(),
        );

        Run::verdict(accepted, trace)
    }
}

impl TuringMachine {
    /// Runs the machine with the default step bound of
    /// [`MAX_EXECUTION_STEPS`].
    pub fn simulate(&self, input: &str) -> Run {
        self.simulate_bounded(input, MAX_EXECUTION_STEPS)
    }

    /// Runs the machine with an explicit step bound.
    ///
    /// Each iteration first checks for acceptance (an accepting state halts
    /// immediately, before any transition lookup), then reads the cell under
    /// the head, applies δ, writes, moves, and switches state. An undefined
    /// transition rejects; exhausting `max_steps` rejects with a possible
    /// infinite loop diagnostic.
    pub fn simulate_bounded(&self, input: &str, max_steps: usize) -> Run {
        // Sparse tape: unset cells read as the blank symbol.
        let mut tape: HashMap<i64, String> = input
            .chars()
            .enumerate()
            .map(|(i, c)| (i as i64, c.to_string()))
            .collect();
        let mut head: i64 = 0;
        let mut current = self.initial_state.clone();
        let mut trace = self.header(input);
        let mut step = 0usize;

        while step < max_steps {
            let read = tape
                .get(&head)
                .cloned()
                .unwrap_or_else(|| self.blank.clone());

            trace.push(format!("STEP {step}:"));
            trace.push(format!("  Tape: {}", render_tape(&tape, head, &self.blank)));
            trace.push(format!(
                "  State: {current} | Position: {head} | Read: '{read}'"
            ));

            if self.accepting_states.contains(&current) {
                trace.push("STRING ACCEPTED".to_string());
                trace.push(format!("Accepting state reached: {current}"));
                return Run::verdict(true, trace);
            }

            let Some(t) = self.transition(&current, &read).cloned() else {
                trace.push("STRING REJECTED".to_string());
                let diagnostic = format!("No transition defined for δ({current}, '{read}')");
                trace.push(diagnostic.clone());
                return Run::rejected(trace, diagnostic);
            };

            trace.push(format!(
                "  Action: δ({current}, '{read}') = ({}, '{}', {})",
                t.next_state, t.write, t.direction
            ));

            tape.insert(head, t.write);
            head += t.direction.offset();
            current = t.next_state;
            step += 1;
        }

        trace.push("STRING REJECTED".to_string());
        let diagnostic = format!("Possible infinite loop: exceeded {max_steps} steps");
        trace.push(diagnostic.clone());
        Run::rejected(trace, diagnostic)
    }

    /// Formal-definition header opening every TM trace.
    fn header(&self, input: &str) -> Vec<String> {
        vec![
            "TURING MACHINE SIMULATION".to_string(),
            "M = (Q, Σ, Γ, δ, q0, blank, F)".to_string(),
            format!("  Q = {}", format_set(&self.states)),
            format!("  Σ = {}", format_set(&self.input_alphabet)),
            format!("  Γ = {}", format_set(&self.tape_alphabet)),
            format!("  q0 = {}", self.initial_state),
            format!("  blank = '{}'", self.blank),
            format!("  F = {}", format_set(&self.accepting_states)),
            if input.is_empty() {
                "Input: empty".to_string()
            } else {
                format!("Input: '{input}'")
            },
        ]
    }
}

impl Automaton {
    /// Simulates the automaton against `input`, dispatching on the model tag.
    /// Turing machines run with the default step bound.
    pub fn simulate(&self, input: &str) -> Run {
        match self {
            Automaton::Dfa(a) => a.simulate(input),
            Automaton::Nfa(a) => a.simulate(input),
            Automaton::Pda(a) => a.simulate(input),
            Automaton::Tm(a) => a.simulate(input),
        }
    }

    /// Simulates with an explicit step bound. The bound only applies to
    /// Turing machines; the other models terminate in at most
    /// `input.len() + 1` steps by construction.
    pub fn simulate_bounded(&self, input: &str, max_steps: usize) -> Run {
        match self {
            Automaton::Tm(a) => a.simulate_bounded(input, max_steps),
            other => other.simulate(input),
        }
    }
}

/// Renders a stack bottom-to-top as `[Z, a]`.
fn format_stack(stack: &[String]) -> String {
    format!("[{}]", stack.join(", "))
}

/// Renders the tape window around the head, head cell bracketed. The window
/// spans [`TAPE_WINDOW`] cells on each side, clamped on the left to the
/// lowest cell ever written.
fn render_tape(tape: &HashMap<i64, String>, head: i64, blank: &str) -> String {
    let min_written = tape.keys().min().copied().unwrap_or(0);
    let start = (head - TAPE_WINDOW).max(min_written);
    let end = head + TAPE_WINDOW + 1;

    let mut out = String::from("[");
    for i in start..end {
        let symbol = tape.get(&i).map(String::as_str).unwrap_or(blank);
        if i == head {
            out.push('[');
            out.push_str(symbol);
            out.push(']');
        } else {
            out.push(' ');
            out.push_str(symbol);
            out.push(' ');
        }
    }
    out.push(']');
    out
}
