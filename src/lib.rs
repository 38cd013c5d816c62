//! This crate provides the core logic for a one-tape Turing machine simulator.
//! It includes modules for parsing machine descriptions, analyzing them for configuration
//! errors, executing them over an input string, and tracing every step of the run.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod registry;
pub mod table;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_with_mode};
pub use registry::StateRegistry;
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports the snapshot and reporting types from the trace module.
pub use trace::{render, Reporter, Snapshot, TraceFormat};
/// Re-exports the types describing machines and their execution from the types module.
pub use types::{
    Direction, Halt, Mode, OtmError, Program, State, Step, Transition, BLANK_SYMBOL,
    INITIAL_TAPE_CAPACITY,
};
