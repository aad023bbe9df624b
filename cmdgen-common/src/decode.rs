//! Input decoding
//!
//! Turns the JSON command list into `Command` records. Anything that cannot be
//! decoded aborts the run before lowering starts.

use crate::command::Command;
use crate::error::GenError;

/// Decode a JSON array of command objects
pub fn decode_commands(input: &str) -> Result<Vec<Command>, GenError> {
    let commands: Vec<Command> = serde_json::from_str(input)?;
    Ok(commands)
}
