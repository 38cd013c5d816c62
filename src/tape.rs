//! This module defines the `Tape`, a one-dimensional symbol store with a single read/write
//! head. The tape is unbounded in both directions; it is backed by a finite buffer that
//! doubles whenever the head runs off either edge.

use crate::types::{Direction, BLANK_SYMBOL, INITIAL_TAPE_CAPACITY};
use log::debug;

/// An abstractly infinite tape backed by a growable buffer.
///
/// Invariant: `head < cells.len()` and every cell holds either a written symbol or
/// [`BLANK_SYMBOL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    head: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates a blank tape of [`INITIAL_TAPE_CAPACITY`] cells with the head on cell 0.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_TAPE_CAPACITY)
    }

    /// Creates a blank tape of `capacity` cells. A capacity of zero is raised to one so
    /// the head always has a cell to sit on.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![BLANK_SYMBOL; capacity.max(1)],
            head: 0,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell, growing the buffer when the head sits on an edge.
    pub fn move_head(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.grow_left();
                }
                self.head -= 1;
            }
            Direction::Right => {
                if self.head == self.cells.len() - 1 {
                    self.grow_right();
                }
                self.head += 1;
            }
            Direction::Hold => {}
        }
    }

    /// Doubles the buffer by prepending blanks.
    ///
    /// Existing cells are shifted into the upper half and the head is shifted with them,
    /// so it keeps pointing at the same logical cell.
    pub fn grow_left(&mut self) {
        let capacity = self.cells.len();
        let mut cells = Vec::with_capacity(capacity * 2);
        cells.resize(capacity, BLANK_SYMBOL);
        cells.extend_from_slice(&self.cells);

        self.cells = cells;
        self.head += capacity;

        debug!(
            "Tape grown to the left: capacity {} -> {}",
            capacity,
            self.cells.len()
        );
    }

    /// Doubles the buffer by appending blanks. Existing cells and the head are unchanged.
    pub fn grow_right(&mut self) {
        let capacity = self.cells.len();
        self.cells.resize(capacity * 2, BLANK_SYMBOL);

        debug!(
            "Tape grown to the right: capacity {} -> {}",
            capacity,
            self.cells.len()
        );
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of cells currently backing the tape.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Returns every cell in order.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }
}
