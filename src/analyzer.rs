//! This module provides functions for analyzing machine descriptions to detect configuration
//! errors before execution. This includes checks for unique state names, a declared start
//! state, declared destination states and, in strict mode, ambiguous rules.

use crate::types::{Mode, OtmError, Program};
use log::warn;

/// Represents the configuration errors that can be found during analysis.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates state names that are declared more than once.
    DuplicateStates(Vec<String>),
    /// Indicates that the start state is not declared.
    InvalidStartState(String),
    /// Indicates that transitions lead to states that are not declared.
    UndefinedNextStates(Vec<String>),
    /// Indicates rules sharing the same `(state, input symbol, tape symbol)` triple.
    DuplicateTransitions(Vec<(String, char, char)>),
}

impl From<AnalysisError> for OtmError {
    /// Converts an `AnalysisError` into an `OtmError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::DuplicateStates(states) => {
                OtmError::ValidationError(format!("Duplicate states: {:?}", states))
            }
            AnalysisError::InvalidStartState(state) => {
                OtmError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndefinedNextStates(states) => OtmError::ValidationError(
                format!("Transitions reference undefined states: {:?}", states),
            ),
            AnalysisError::DuplicateTransitions(triples) => OtmError::ValidationError(
                format!("Duplicate transitions for: {:?}", triples),
            ),
        }
    }
}

/// Analyzes a machine description for configuration errors.
///
/// All checks run; the first failure is returned. Rules that can never fire (unknown
/// source state, or shadowed by an earlier rule outside strict mode) are only logged.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(OtmError::ValidationError)` if any check fails.
pub fn analyze(program: &Program) -> Result<(), OtmError> {
    warn_dead_rules(program);

    let checks: [fn(&Program) -> Result<(), AnalysisError>; 4] = [
        check_duplicate_states,
        check_valid_start_state,
        check_undefined_next_states,
        check_duplicate_transitions,
    ];

    match checks.iter().find_map(|check| check(program).err()) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Checks that no state name is declared twice.
fn check_duplicate_states(program: &Program) -> Result<(), AnalysisError> {
    let duplicates = program.states.duplicates();
    if !duplicates.is_empty() {
        return Err(AnalysisError::DuplicateStates(duplicates));
    }

    Ok(())
}

/// Checks that the start state resolves in the state registry.
fn check_valid_start_state(program: &Program) -> Result<(), AnalysisError> {
    if program.start_state().is_none() {
        return Err(AnalysisError::InvalidStartState(
            program.initial_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that every transition's destination resolves in the state registry.
///
/// Undefined names are reported once each, in the order they are first referenced.
fn check_undefined_next_states(program: &Program) -> Result<(), AnalysisError> {
    let mut undefined: Vec<String> = Vec::new();
    for transition in program.transitions.iter() {
        let next = &transition.destination_state;
        if !program.states.contains(next) && !undefined.contains(next) {
            undefined.push(next.clone());
        }
    }

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedNextStates(undefined));
    }

    Ok(())
}

/// In strict mode, checks that no two rules share a `(state, input, tape symbol)` triple.
fn check_duplicate_transitions(program: &Program) -> Result<(), AnalysisError> {
    if program.mode != Mode::Strict {
        return Ok(());
    }

    let mut triples: Vec<(String, char, char)> = Vec::new();
    for t in program.transitions.shadowed() {
        let triple = (t.source_state.clone(), t.input_symbol, t.read_symbol);
        if !triples.contains(&triple) {
            triples.push(triple);
        }
    }

    if !triples.is_empty() {
        return Err(AnalysisError::DuplicateTransitions(triples));
    }

    Ok(())
}

fn warn_dead_rules(program: &Program) {
    for t in program.transitions.iter() {
        if !program.states.contains(&t.source_state) {
            warn!(
                "Transition from undeclared state '{}' can never fire",
                t.source_state
            );
        }
    }

    if program.mode == Mode::Normal {
        for t in program.transitions.shadowed() {
            warn!(
                "Transition ({}, {}, {}) -> {} is shadowed by an earlier rule",
                t.source_state, t.input_symbol, t.read_symbol, t.destination_state
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, State, Transition};

    fn rule(source: &str, input: char, dest: &str) -> Transition {
        Transition {
            source_state: source.to_string(),
            input_symbol: input,
            read_symbol: '_',
            write_symbol: input,
            destination_state: dest.to_string(),
            direction: Direction::Right,
        }
    }

    fn program(transitions: Vec<Transition>) -> Program {
        Program::new(
            vec![State::new("q0", false), State::new("q1", true)],
            transitions,
            "q0",
        )
    }

    #[test]
    fn test_valid_program() {
        let program = program(vec![rule("q0", 'a', "q1"), rule("q1", 'b', "q0")]);
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_duplicate_states() {
        let program = Program::new(
            vec![
                State::new("q0", false),
                State::new("q1", true),
                State::new("q0", true),
            ],
            vec![],
            "q0",
        );

        assert_eq!(
            check_duplicate_states(&program),
            Err(AnalysisError::DuplicateStates(vec!["q0".to_string()]))
        );
        assert!(matches!(
            analyze(&program),
            Err(OtmError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_start_state() {
        let mut program = program(vec![]);
        program.initial_state = "q7".to_string();

        let error = analyze(&program).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Configuration validation error: Invalid start state: q7"
        );
    }

    #[test]
    fn test_undefined_next_states() {
        let program = program(vec![
            rule("q0", 'a', "q2"),
            rule("q1", 'a', "q3"),
            rule("q1", 'b', "q2"),
        ]);

        assert_eq!(
            check_undefined_next_states(&program),
            Err(AnalysisError::UndefinedNextStates(vec![
                "q2".to_string(),
                "q3".to_string()
            ]))
        );
    }

    #[test]
    fn test_undeclared_source_is_not_an_error() {
        let program = program(vec![rule("ghost", 'a', "q0")]);
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_duplicate_transitions_allowed_in_normal_mode() {
        let program = program(vec![rule("q0", 'a', "q1"), rule("q0", 'a', "q0")]);
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_duplicate_transitions_rejected_in_strict_mode() {
        let mut program = program(vec![
            rule("q0", 'a', "q1"),
            rule("q0", 'a', "q0"),
            rule("q0", 'a', "q1"),
        ]);
        program.mode = Mode::Strict;

        assert_eq!(
            check_duplicate_transitions(&program),
            Err(AnalysisError::DuplicateTransitions(vec![(
                "q0".to_string(),
                'a',
                '_'
            )]))
        );
        assert!(analyze(&program).is_err());
    }

    #[test]
    fn test_first_error_is_reported() {
        let mut program = program(vec![rule("q0", 'a', "q9")]);
        program.initial_state = "nope".to_string();

        let error = analyze(&program).unwrap_err();
        assert!(error.to_string().contains("Invalid start state: nope"));
    }
}
