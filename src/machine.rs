//! This module defines the `TuringMachine` struct, which executes a one-tape machine
//! description against an input string. It owns the tape for the duration of a run and
//! consumes one input symbol per step until the input runs out or no rule matches.

use crate::tape::Tape;
use crate::trace::Snapshot;
use crate::types::{Halt, OtmError, Program, State, Step};
use log::{info, trace};

/// A single run of a [`Program`] over an input string.
///
/// The program is borrowed immutably, so several runs may share it. The current state is
/// `None` once the machine has halted for lack of a matching rule.
pub struct TuringMachine<'p> {
    program: &'p Program,
    state: Option<&'p State>,
    tape: Tape,
    input: Vec<char>,
    cursor: usize,
    step_count: usize,
    halt: Option<Halt>,
}

impl<'p> TuringMachine<'p> {
    /// Creates a machine in the program's start state with a blank tape.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` ready to step.
    /// * `Err(OtmError::InvalidState)` if the start state is not declared.
    pub fn new(program: &'p Program, input: &str) -> Result<Self, OtmError> {
        let state = program
            .start_state()
            .ok_or_else(|| OtmError::InvalidState(program.initial_state.clone()))?;

        Ok(Self {
            program,
            state: Some(state),
            tape: Tape::new(),
            input: input.chars().collect(),
            cursor: 0,
            step_count: 0,
            halt: None,
        })
    }

    /// Consumes the next input symbol and applies the matching rule.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied.
    /// * `Step::Halt(Halt::InputExhausted)` if there is no input left.
    /// * `Step::Halt(Halt::NoTransition)` if no rule matched. The machine is left without
    ///   a current state and the remaining input is never consumed.
    /// * `Step::Halt(Halt::Err(_))` if the matched rule names an undeclared destination.
    ///   The tape is left as it was before the step.
    pub fn step(&mut self) -> Step {
        if let Some(halt) = &self.halt {
            return Step::Halt(halt.clone());
        }

        let halt = match self.apply() {
            Ok(true) => return Step::Continue,
            Ok(false) => Halt::InputExhausted,
            Err(e) => e,
        };

        info!("Machine halted after {} steps: {:?}", self.step_count, halt);
        self.halt = Some(halt.clone());
        Step::Halt(halt)
    }

    fn apply(&mut self) -> Result<bool, Halt> {
        let program = self.program;
        let Some(&input_symbol) = self.input.get(self.cursor) else {
            return Ok(false);
        };
        let Some(state) = self.state else {
            return Err(Halt::NoTransition);
        };

        let tape_symbol = self.tape.read();
        let Some(transition) = program
            .transitions
            .lookup(&state.name, input_symbol, tape_symbol)
        else {
            self.state = None;
            self.cursor += 1;
            return Err(Halt::NoTransition);
        };

        let next = program
            .states
            .lookup(&transition.destination_state)
            .ok_or_else(|| {
                Halt::Err(OtmError::InvalidState(
                    transition.destination_state.clone(),
                ))
            })?;

        trace!(
            "{} ({}, {}) -> {} ({}, {:?})",
            state.name,
            input_symbol,
            tape_symbol,
            next.name,
            transition.write_symbol,
            transition.direction
        );

        self.tape.write(transition.write_symbol);
        self.tape.move_head(transition.direction);
        self.state = Some(next);
        self.cursor += 1;
        self.step_count += 1;

        Ok(true)
    }

    /// Runs to completion, handing every observed configuration to `observer`: the initial
    /// one, one per applied rule, and a final halted one when no rule matched.
    ///
    /// On a machine that has already stopped, only the current configuration is observed.
    ///
    /// Returns the reason the run stopped.
    pub fn run<F>(&mut self, mut observer: F) -> Halt
    where
        F: FnMut(Snapshot),
    {
        observer(self.snapshot());
        if let Some(halt) = &self.halt {
            return halt.clone();
        }

        loop {
            match self.step() {
                Step::Continue => observer(self.snapshot()),
                Step::Halt(Halt::NoTransition) => {
                    observer(self.snapshot());
                    return Halt::NoTransition;
                }
                Step::Halt(halt) => return halt,
            }
        }
    }

    /// Runs to completion and collects every snapshot.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Snapshot>)` when the run ended by exhausting input or by halting.
    /// * `Err(OtmError)` when a rule referenced an undeclared state.
    pub fn trace(&mut self) -> Result<Vec<Snapshot>, OtmError> {
        let mut snapshots = Vec::new();
        match self.run(|snapshot| snapshots.push(snapshot)) {
            Halt::Err(e) => Err(e),
            _ => Ok(snapshots),
        }
    }

    /// Captures the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.step_count, self.state.cloned(), &self.tape)
    }

    /// Returns the current state, or `None` once the machine has halted on a missing rule.
    pub fn state(&self) -> Option<&State> {
        self.state
    }

    /// Returns the tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the number of rules applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the input symbols not yet consumed.
    pub fn remaining_input(&self) -> &[char] {
        &self.input[self.cursor.min(self.input.len())..]
    }

    /// Checks whether the machine has stopped.
    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }
}
