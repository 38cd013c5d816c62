//! This module provides snapshots of a running machine and renders them for observation,
//! either as the plain-text block printed after every step or as JSON lines.

use crate::tape::Tape;
use crate::types::State;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Marker printed right after the cell under the head.
pub const HEAD_MARKER: char = '<';

/// An observed configuration of the machine at one point in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of rules applied before this snapshot was taken.
    pub step: usize,
    /// The current state, or `None` once the machine halted on a missing rule.
    pub state: Option<State>,
    /// Every tape cell, in order.
    pub tape: Vec<char>,
    /// Index of the cell under the head.
    pub head: usize,
}

impl Snapshot {
    /// Captures `tape` together with the step count and current state.
    pub fn new(step: usize, state: Option<State>, tape: &Tape) -> Self {
        Self {
            step,
            state,
            tape: tape.cells().to_vec(),
            head: tape.head(),
        }
    }

    /// Whether the current state accepts. `None` when there is no current state.
    pub fn accepting(&self) -> Option<bool> {
        self.state.as_ref().map(|s| s.accepting)
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_none()
    }
}

/// Renders a snapshot as a text block:
///
/// ```text
/// State: q1 and is 1
/// X _< _ _ _ _ _ _ _ _
/// ```
///
/// Every cell is followed by [`HEAD_MARKER`] if the head is on it, or a space otherwise.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = match &snapshot.state {
        Some(state) => format!("State: {} and is {}\n", state.name, u8::from(state.accepting)),
        None => "State: none (halted)\n".to_string(),
    };

    for (i, &cell) in snapshot.tape.iter().enumerate() {
        out.push(cell);
        out.push(if i == snapshot.head { HEAD_MARKER } else { ' ' });
    }
    out.push('\n');

    out
}

/// Output formats understood by [`Reporter`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    /// The text block produced by [`render`].
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Writes snapshots to an output stream as they are produced.
pub struct Reporter<W: Write> {
    out: W,
    format: TraceFormat,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing `format` output to `out`.
    pub fn new(out: W, format: TraceFormat) -> Self {
        Self { out, format }
    }

    pub fn report(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        match self.format {
            TraceFormat::Text => self.out.write_all(render(snapshot).as_bytes()),
            TraceFormat::Json => {
                serde_json::to_writer(&mut self.out, snapshot)?;
                self.out.write_all(b"\n")
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consumes the reporter and returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_render_initial_configuration() {
        let snapshot = Snapshot::new(0, Some(State::new("q0", false)), &Tape::with_capacity(3));

        assert_eq!(render(&snapshot), "State: q0 and is 0\n_<_ _ \n");
    }

    #[test]
    fn test_render_accepting_state_and_head() {
        let mut tape = Tape::with_capacity(3);
        tape.write('X');
        tape.move_head(Direction::Right);
        let snapshot = Snapshot::new(1, Some(State::new("q1", true)), &tape);

        assert_eq!(render(&snapshot), "State: q1 and is 1\nX _<_ \n");
        assert_eq!(snapshot.accepting(), Some(true));
    }

    #[test]
    fn test_render_halted() {
        let snapshot = Snapshot::new(4, None, &Tape::with_capacity(2));

        assert_eq!(render(&snapshot), "State: none (halted)\n_<_ \n");
        assert!(snapshot.is_halted());
        assert_eq!(snapshot.accepting(), None);
    }

    #[test]
    fn test_reporter_text() {
        let snapshot = Snapshot::new(0, Some(State::new("q0", false)), &Tape::with_capacity(1));
        let mut reporter = Reporter::new(Vec::new(), TraceFormat::Text);
        reporter.report(&snapshot).unwrap();
        reporter.report(&snapshot).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "State: q0 and is 0\n_<\nState: q0 and is 0\n_<\n");
    }

    #[test]
    fn test_reporter_json_lines() {
        let snapshot = Snapshot::new(2, Some(State::new("q1", true)), &Tape::with_capacity(2));
        let halted = Snapshot::new(3, None, &Tape::with_capacity(2));

        let mut reporter = Reporter::new(Vec::new(), TraceFormat::Json);
        reporter.report(&snapshot).unwrap();
        reporter.report(&halted).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, snapshot);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second["state"].is_null());
        assert_eq!(second["step"], 3);
    }
}
