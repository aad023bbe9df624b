//! Error handling for the command code generator
//!
//! `GenError` covers every phase of a generation run. `LowerError` is the
//! narrower error a single lowering routine returns; the engine wraps it with
//! the index and kind of the offending command.

use crate::command::CommandKind;
use thiserror::Error;

/// Main generator error type that encompasses all phases of a run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("Input decode error at {line}:{column}: {message}")]
    InputDecodeError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("No lowering routine registered for kind '{kind}'")]
    UnknownKind { kind: CommandKind },

    #[error("Unrecognized command '{kind}' at index {index}")]
    UnrecognizedCommand { index: usize, kind: CommandKind },

    #[error("Kind '{kind}' is already registered")]
    DuplicateKind { kind: CommandKind },

    #[error("Lowering failed for command '{kind}' at index {index}: {cause}")]
    LoweringFailed {
        index: usize,
        kind: CommandKind,
        #[source]
        cause: LowerError,
    },

    #[error("Internal generator error while rendering: {message}")]
    RenderFailed { message: String },

    #[error("Session has already been rendered")]
    SessionRendered,

    #[error("IO error: {message}")]
    IoError { message: String },
}

/// Why a lowering routine rejected its arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("missing required argument '{field}'")]
    MissingArgument { field: &'static str },

    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("invalid {ty} value '{value}': {reason}")]
    InvalidValue {
        ty: String,
        value: String,
        reason: String,
    },

    #[error("unsupported type '{ty}'")]
    UnsupportedType { ty: String },

    #[error("command requires an 'sql' object")]
    MissingQuery,

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

impl GenError {
    /// Create a render error
    pub fn render_failed(message: impl Into<String>) -> Self {
        GenError::RenderFailed {
            message: message.into(),
        }
    }

    /// Index of the command that caused this error, if any
    pub fn command_index(&self) -> Option<usize> {
        match self {
            GenError::UnrecognizedCommand { index, .. } | GenError::LoweringFailed { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }

    /// Internal invariant violations are not recoverable by fixing input
    pub fn is_internal(&self) -> bool {
        matches!(self, GenError::RenderFailed { .. })
    }
}

impl LowerError {
    pub fn invalid_value(ty: impl ToString, value: &str, reason: impl Into<String>) -> Self {
        LowerError::InvalidValue {
            ty: ty.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_query(reason: impl Into<String>) -> Self {
        LowerError::InvalidQuery {
            reason: reason.into(),
        }
    }
}

/// Convert from serde_json::Error
impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::InputDecodeError {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        GenError::IoError {
            message: err.to_string(),
        }
    }
}
