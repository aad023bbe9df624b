//! Command Code Generator - Command Registry and Lowering Engine
//!
//! This crate turns decoded commands into statements:
//! - Registry: maps a command kind to its lowering routine
//! - Engine: drives one generation session through an ordered command list
//! - Routines: the built-in lowering routines

pub mod registry;
pub mod engine;
pub mod routines;

pub use registry::{Lower, Registry};
pub use engine::{lower_commands, Lowerer, ProcessSummary, UnknownPolicy};
pub use routines::register_builtins;
