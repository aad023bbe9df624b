//! Command Code Generator - Statement Representation
//!
//! This crate defines the abstract statements produced by lowering and the
//! generation session that accumulates them for one run.

pub mod stmt;
pub mod session;

pub use stmt::{is_go_identifier, BinaryOp, Expr, Literal, Statement};
pub use session::{GenerationSession, ScaffoldMeta, SessionState};
