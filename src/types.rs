//! This module defines the core data structures and types used throughout the one-tape
//! Turing machine simulator, including the machine description, transitions, step outcomes,
//! and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::StateRegistry;
use crate::table::TransitionTable;
use crate::Rule;

/// The symbol every unwritten tape cell holds.
pub const BLANK_SYMBOL: char = '_';
/// The number of cells a freshly created tape starts with.
pub const INITIAL_TAPE_CAPACITY: usize = 10;

/// A named machine state together with its accepting flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// The unique name of the state, as written in the configuration.
    pub name: String,
    /// Whether the state is an accepting one.
    pub accepting: bool,
}

impl State {
    /// Creates a state with the given name and accepting flag.
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
        }
    }
}

/// Represents a single transition rule.
///
/// States are referenced by name and resolved through the [`StateRegistry`] at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies in.
    pub source_state: String,
    /// The input symbol that must be consumed.
    pub input_symbol: char,
    /// The symbol that must be under the head.
    pub read_symbol: char,
    /// The symbol written under the head.
    pub write_symbol: char,
    /// The state the machine moves to.
    pub destination_state: String,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// Represents the possible directions the head can move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    #[default]
    Hold,
}

impl Direction {
    /// Maps a configuration token to a direction. `L` and `R` are the only
    /// moving tokens; everything else holds the head.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("L") => Direction::Left,
            Some("R") => Direction::Right,
            _ => Direction::Hold,
        }
    }
}

/// Controls how strictly a machine description is checked at load time.
///
/// - `Normal` (default): duplicate `(state, input, tape symbol)` triples are allowed and the
///   first one listed wins.
/// - `Strict`: duplicate triples are rejected as a configuration error.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Strict,
}

/// A fully loaded machine description: states, rules and the start state.
///
/// A `Program` is read-only for the duration of a run and may be shared by any
/// number of [`TuringMachine`](crate::TuringMachine) instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// How the program was checked when it was loaded.
    pub mode: Mode,
    /// All declared states.
    pub states: StateRegistry,
    /// All declared transitions, in the order they were listed.
    pub transitions: TransitionTable,
    /// The name of the state the machine starts in.
    pub initial_state: String,
}

impl Program {
    /// Creates a `Mode::Normal` program from its states, rules and start state name.
    pub fn new(
        states: Vec<State>,
        transitions: Vec<Transition>,
        initial_state: impl Into<String>,
    ) -> Self {
        Self {
            mode: Mode::default(),
            states: StateRegistry::new(states),
            transitions: TransitionTable::new(transitions),
            initial_state: initial_state.into(),
        }
    }

    /// Resolves the start state, if it is declared.
    pub fn start_state(&self) -> Option<&State> {
        self.states.lookup(&self.initial_state)
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// One input symbol was consumed and a transition applied.
    Continue,
    /// The machine has stopped.
    Halt(Halt),
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Every input symbol was consumed; the machine rests in its last state.
    InputExhausted,
    /// No rule matched; the machine has no current state.
    NoTransition,

    Err(OtmError),
}

/// Represents various errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OtmError {
    /// Indicates a reference to a state that is not declared.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Indicates a syntax error in a machine description.
    #[error("Configuration parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a well-formed description that is not a valid machine.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    /// Indicates a machine description that could not be read.
    #[error("File error: {0}")]
    FileError(String),
}
