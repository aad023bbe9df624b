//! Command Code Generator - Go Source Emission
//!
//! This crate handles the final phase of generation: turning a completed
//! session into Go source text. It includes:
//!
//! - Statement and expression printing with Go string quoting
//! - Import collection from qualified identifiers
//! - Program scaffold assembly (package clause, imports, entry point)

pub mod printer;
pub mod emit;

pub use printer::{go_quote, GoPrinter};
pub use emit::emit_program;

use cmdgen_common::GenError;
use cmdgen_ir::GenerationSession;

/// Render `session` to Go source text and mark it rendered.
///
/// Rendering may be repeated; every call returns identical text.
pub fn render(session: &mut GenerationSession) -> Result<String, GenError> {
    let text = emit_program(session)?;
    session.mark_rendered();
    Ok(text)
}
