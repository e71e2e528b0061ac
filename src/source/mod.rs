//! Item list input for the simulator.
//!
//! The `mosaic` binary reads a JSON array of item heights, from a file when a
//! path is given and from stdin otherwise.

use crate::model::error::InputError;
use std::io::Read;
use std::path::Path;

/// Read item heights from `file`, or from stdin when no path is given.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist,
/// `InputError::Decode` if the content is not a JSON array of non-negative
/// integers, and `InputError::Io` for read failures.
pub fn read_heights(file: Option<&Path>) -> Result<Vec<u32>, InputError> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            let file = std::fs::File::open(path)?;
            parse_heights(file)
        }
        None => parse_heights(std::io::stdin().lock()),
    }
}

/// Parse a JSON array of item heights from any reader.
///
/// # Errors
///
/// Returns `InputError::Io` if reading fails and `InputError::Decode` if the
/// content is not a JSON array of heights.
pub fn parse_heights<R: Read>(mut reader: R) -> Result<Vec<u32>, InputError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let heights = serde_json::from_str(&raw)?;
    Ok(heights)
}
