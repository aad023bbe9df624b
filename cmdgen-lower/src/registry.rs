//! Command Registry
//!
//! Associates each `CommandKind` with a lowering routine. New kinds are added
//! by registering another routine; dispatch never changes.
//!
//! The registry is filled once at startup and only read afterwards, so a
//! `&Registry` can be handed to any number of concurrent runs.

use cmdgen_common::{Args, CommandKind, GenError, LowerError};
use cmdgen_ir::Statement;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// A lowering routine: turns one command's arguments into zero or more
/// statements.
pub trait Lower: Send + Sync {
    fn lower(&self, args: &Args) -> Result<Vec<Statement>, LowerError>;
}

impl<F> Lower for F
where
    F: Fn(&Args) -> Result<Vec<Statement>, LowerError> + Send + Sync,
{
    fn lower(&self, args: &Args) -> Result<Vec<Statement>, LowerError> {
        self(args)
    }
}

#[derive(Default)]
pub struct Registry {
    routines: HashMap<CommandKind, Box<dyn Lower>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in kind
    pub fn with_builtins() -> Result<Self, GenError> {
        let mut registry = Self::new();
        crate::routines::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a routine for `kind`.
    ///
    /// Registering a kind twice fails with `DuplicateKind` and keeps the
    /// routine that was registered first.
    pub fn register(
        &mut self,
        kind: impl Into<CommandKind>,
        routine: impl Lower + 'static,
    ) -> Result<(), GenError> {
        let kind = kind.into();
        if self.routines.contains_key(&kind) {
            return Err(GenError::DuplicateKind { kind });
        }

        debug!("Registering lowering routine for '{kind}'");
        self.routines.insert(kind, Box::new(routine));
        Ok(())
    }

    /// Find the routine registered for `kind`
    pub fn lookup(&self, kind: &CommandKind) -> Result<&dyn Lower, GenError> {
        self.routines
            .get(kind)
            .map(|routine| &**routine)
            .ok_or_else(|| GenError::UnknownKind { kind: kind.clone() })
    }

    pub fn contains(&self, kind: &CommandKind) -> bool {
        self.routines.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Registered kinds in sorted order
    pub fn kinds(&self) -> Vec<&CommandKind> {
        let mut kinds: Vec<_> = self.routines.keys().collect();
        kinds.sort();
        kinds
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
