//! This module provides the `ProgramLoader` struct, responsible for loading machine
//! descriptions from files and strings.

use crate::parser::parse_with_mode;
use crate::types::{Mode, OtmError, Program};
use log::debug;
use std::fs;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading machine descriptions.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read, parsed and validated.
    /// * `Err(OtmError::FileError)` if the file cannot be read.
    /// * `Err(OtmError::ParseError)` or `Err(OtmError::ValidationError)` if the content
    ///   is not a valid machine description.
    pub fn load_program(path: &Path, mode: Mode) -> Result<Program, OtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            OtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!("Loaded {} bytes from {}", content.len(), path.display());

        parse_with_mode(&content, mode)
    }

    /// Loads a machine description from the provided string content.
    pub fn load_program_from_string(content: &str, mode: Mode) -> Result<Program, OtmError> {
        parse_with_mode(content, mode)
    }
}
