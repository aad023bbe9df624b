//! Built-in lowering routines
//!
//! One module per family of command kinds. Each routine validates its own
//! arguments and returns the statements for exactly one command.

mod database;
mod password;
mod values;
mod variable;

pub use database::{database_connect, database_query};
pub use password::hash_password;
pub use variable::{change_variable, create_variable};

use crate::registry::Registry;
use cmdgen_common::{CommandKind, GenError};

/// Register every built-in kind.
///
/// `judge target` is part of the command vocabulary but has no routine, so
/// it is left unregistered and rejected by the engine.
pub fn register_builtins(registry: &mut Registry) -> Result<(), GenError> {
    registry.register(CommandKind::CREATE_VARIABLE, create_variable)?;
    registry.register(CommandKind::CHANGE_VARIABLE, change_variable)?;
    registry.register(CommandKind::HASH_PASSWORD, hash_password)?;
    registry.register(CommandKind::DATABASE_CONNECT, database_connect)?;
    registry.register(CommandKind::DATABASE_QUERY, database_query)?;
    Ok(())
}
