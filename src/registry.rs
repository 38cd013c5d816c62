//! This module provides the `StateRegistry`, the authoritative list of declared states.

use crate::types::State;
use std::collections::HashMap;

/// Owns every declared state and resolves names to states.
///
/// States are kept in declaration order. Lookups go through a name index; when a name
/// is declared twice the first declaration is the one that resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateRegistry {
    states: Vec<State>,
    index: HashMap<String, usize>,
}

impl StateRegistry {
    /// Creates a registry over `states`, indexing them by name.
    pub fn new(states: Vec<State>) -> Self {
        let mut index = HashMap::with_capacity(states.len());
        for (i, state) in states.iter().enumerate() {
            index.entry(state.name.clone()).or_insert(i);
        }

        Self { states, index }
    }

    /// Resolves a state by exact name.
    pub fn lookup(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the names declared more than once, each reported a single time, in
    /// the order their second declaration appears.
    pub fn duplicates(&self) -> Vec<String> {
        let mut duplicates: Vec<String> = Vec::new();
        for (i, state) in self.states.iter().enumerate() {
            if self.index[&state.name] != i && !duplicates.contains(&state.name) {
                duplicates.push(state.name.clone());
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
