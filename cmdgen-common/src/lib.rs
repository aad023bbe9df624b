//! Command Code Generator - Common Types and Utilities
//!
//! This crate contains the command data model, input decoding and the
//! error taxonomy shared by every phase of the generator.

pub mod command;
pub mod decode;
pub mod error;

pub use command::{Args, Command, CommandKind, Query, QueryType, ValueType};
pub use decode::decode_commands;
pub use error::{GenError, LowerError};
