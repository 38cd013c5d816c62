//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//! It defines the grammar for the line-oriented configuration format and functions to parse
//! it into a `Program` struct.

use crate::{
    analyzer::analyze,
    registry::StateRegistry,
    table::TransitionTable,
    types::{Direction, Mode, OtmError, Program, State, Transition, BLANK_SYMBOL},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the configuration grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct ConfigParser;

/// Parses a machine description in [`Mode::Normal`].
///
/// # Returns
///
/// * `Ok(Program)` if the input is successfully parsed and validated.
/// * `Err(OtmError::ParseError)` if there are any syntax errors.
/// * `Err(OtmError::ValidationError)` if the description is not a valid machine.
pub fn parse(input: &str) -> Result<Program, OtmError> {
    parse_with_mode(input, Mode::Normal)
}

/// Parses a machine description and validates it under the given `mode`.
pub fn parse_with_mode(input: &str, mode: Mode) -> Result<Program, OtmError> {
    let root = ConfigParser::parse(Rule::config, input)
        .map_err(|e| OtmError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| OtmError::ValidationError("Empty configuration".to_string()))?;

    let program = parse_config(root, mode)?;

    analyze(&program)?;

    Ok(program)
}

/// Walks the top-level `config` pair, collecting states, transitions and the start state,
/// then checks the declared counts against what was actually listed.
fn parse_config(pair: Pair<Rule>, mode: Mode) -> Result<Program, OtmError> {
    let mut state_count: Option<usize> = None;
    let mut transition_count: Option<usize> = None;
    let mut states = Vec::new();
    let mut transitions = Vec::new();
    let mut initial_state: Option<String> = None;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::state_count => state_count = Some(parse_count(p)?),
            Rule::state => states.push(parse_state(p)?),
            Rule::transition_count => transition_count = Some(parse_count(p)?),
            Rule::transition => transitions.push(parse_transition(p)?),
            Rule::start => initial_state = Some(parse_inner_string(p)?),
            _ => {} // EOI
        }
    }

    let state_count = check_required(state_count, "state count")?;
    let transition_count = check_required(transition_count, "transition count")?;
    let initial_state = check_required(initial_state, "start state")?;

    check_count("states", state_count, states.len())?;
    check_count("transitions", transition_count, transitions.len())?;

    Ok(Program {
        mode,
        states: StateRegistry::new(states),
        transitions: TransitionTable::new(transitions),
        initial_state,
    })
}

/// Parses a `state_count` or `transition_count` line.
fn parse_count(pair: Pair<Rule>) -> Result<usize, OtmError> {
    let span = pair.as_span();
    let count = parse_inner_string(pair)?;

    count
        .parse::<usize>()
        .map_err(|e| parse_error(&format!("Invalid count '{count}': {e}"), span))
}

/// Parses a `<name> <accept|noaccept>` line.
fn parse_state(pair: Pair<Rule>) -> Result<State, OtmError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();
    let name = parse_string(&mut pairs, span)?;

    let flag = next_pair(&mut pairs, span)?;
    let accepting = match flag.as_str() {
        "accept" => true,
        "noaccept" => false,
        other => {
            return Err(parse_error(
                &format!("Expected 'accept' or 'noaccept', found '{other}'"),
                flag.as_span(),
            ))
        }
    };

    Ok(State { name, accepting })
}

/// Parses a `<source> <input> <read> <destination> <write> [<direction>]` line.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, OtmError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let source_state = parse_string(&mut pairs, span)?;
    let input_symbol = parse_symbol(next_pair(&mut pairs, span)?.as_str());
    let read_symbol = parse_symbol(next_pair(&mut pairs, span)?.as_str());
    let destination_state = parse_string(&mut pairs, span)?;
    let write_symbol = parse_symbol(next_pair(&mut pairs, span)?.as_str());
    let direction = Direction::from_token(pairs.next().as_ref().map(Pair::as_str));

    Ok(Transition {
        source_state,
        input_symbol,
        read_symbol,
        write_symbol,
        destination_state,
        direction,
    })
}

/// Creates an `OtmError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> OtmError {
    OtmError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Returns a single-character symbol.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Takes the next pair, reporting the enclosing line when it is missing.
fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, span: Span<'i>) -> Result<Pair<'i, Rule>, OtmError> {
    pairs
        .next()
        .ok_or_else(|| parse_error("Unexpected end of line", span))
}

/// Extracts the string content of the next pair in a `Pairs` iterator.
fn parse_string<'i>(pairs: &mut Pairs<'i, Rule>, span: Span<'i>) -> Result<String, OtmError> {
    Ok(next_pair(pairs, span)?.as_str().into())
}

/// Extracts the string content of a pair's first inner pair.
fn parse_inner_string(pair: Pair<Rule>) -> Result<String, OtmError> {
    let span = pair.as_span();
    parse_string(&mut pair.into_inner(), span)
}

/// Checks if a required section is present, returning an `Err` if it's missing.
fn check_required<T>(value: Option<T>, name: &str) -> Result<T, OtmError> {
    value.ok_or_else(|| OtmError::ValidationError(format!("Missing {name}")))
}

/// Checks a declared count against the number of lines actually listed.
fn check_count(what: &str, declared: usize, found: usize) -> Result<(), OtmError> {
    if declared != found {
        return Err(OtmError::ValidationError(format!(
            "Expected {declared} {what}, found {found}"
        )));
    }
    Ok(())
}
