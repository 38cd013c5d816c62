//! This module provides the `TransitionTable`, the authoritative list of transition rules.

use crate::types::Transition;
use std::collections::HashMap;

/// Owns every transition and resolves a `(state, input symbol, tape symbol)` triple to the
/// rule that applies.
///
/// Rules are grouped by source state, keeping their declaration order inside each group,
/// so the first listed rule for a triple is always the one returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
    by_state: HashMap<String, Vec<usize>>,
}

impl TransitionTable {
    /// Creates a table over `transitions`, grouping them by source state.
    pub fn new(transitions: Vec<Transition>) -> Self {
        let mut by_state: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, transition) in transitions.iter().enumerate() {
            by_state
                .entry(transition.source_state.clone())
                .or_default()
                .push(i);
        }

        Self {
            transitions,
            by_state,
        }
    }

    /// Finds the first rule matching the given triple.
    ///
    /// `None` is not an error: it is how a run halts.
    pub fn lookup(
        &self,
        state: &str,
        input_symbol: char,
        tape_symbol: char,
    ) -> Option<&Transition> {
        self.by_state.get(state)?.iter().find_map(|&i| {
            let t = &self.transitions[i];
            (t.input_symbol == input_symbol && t.read_symbol == tape_symbol).then_some(t)
        })
    }

    /// Returns each rule that shares its triple with an earlier rule.
    /// These rules can never fire.
    pub fn shadowed(&self) -> Vec<&Transition> {
        self.transitions
            .iter()
            .filter(|t| {
                self.lookup(&t.source_state, t.input_symbol, t.read_symbol)
                    .is_some_and(|first| !std::ptr::eq(first, *t))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
