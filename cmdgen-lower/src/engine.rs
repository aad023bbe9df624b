//! Lowering Engine
//!
//! Drives one generation session through an ordered command list. Each
//! command is dispatched through the registry and its statements are appended
//! to the session in input order.

use crate::registry::Registry;
use cmdgen_common::{Command, GenError};
use cmdgen_ir::{GenerationSession, SessionState};
use log::{debug, trace, warn};

/// What to do with a command whose kind has no registered routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Abort the run with `UnrecognizedCommand`
    #[default]
    Fail,
    /// Log a warning and continue with the next command
    Skip,
}

/// Outcome of a successful `process` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Commands lowered by a registered routine
    pub lowered: usize,
    /// Statements appended to the session
    pub statements: usize,
    /// Indices of unknown commands skipped under `UnknownPolicy::Skip`
    pub skipped: Vec<usize>,
}

pub struct Lowerer<'r> {
    registry: &'r Registry,
    on_unknown: UnknownPolicy,
}

impl<'r> Lowerer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            on_unknown: UnknownPolicy::default(),
        }
    }

    pub fn with_policy(mut self, on_unknown: UnknownPolicy) -> Self {
        self.on_unknown = on_unknown;
        self
    }

    /// Lower `commands` into `session`.
    ///
    /// Statements from commands before a failing one stay in the session;
    /// callers that need all-or-nothing behaviour should clone the session
    /// first.
    pub fn process(
        &self,
        session: &mut GenerationSession,
        commands: &[Command],
    ) -> Result<ProcessSummary, GenError> {
        if session.state() == SessionState::Rendered {
            return Err(GenError::SessionRendered);
        }

        debug!("Lowering {} commands", commands.len());
        let mut summary = ProcessSummary::default();

        for (index, command) in commands.iter().enumerate() {
            let routine = match self.registry.lookup(&command.kind) {
                Ok(routine) => routine,
                Err(GenError::UnknownKind { kind }) => match self.on_unknown {
                    UnknownPolicy::Fail => {
                        return Err(GenError::UnrecognizedCommand { index, kind });
                    }
                    UnknownPolicy::Skip => {
                        warn!("Skipping unrecognized command '{kind}' at index {index}");
                        summary.skipped.push(index);
                        continue;
                    }
                },
                Err(e) => return Err(e),
            };

            trace!("#{index}: dispatching '{}'", command.kind);
            let statements =
                routine
                    .lower(&command.args)
                    .map_err(|cause| GenError::LoweringFailed {
                        index,
                        kind: command.kind.clone(),
                        cause,
                    })?;

            debug!(
                "#{index}: '{}' lowered to {} statement(s)",
                command.kind,
                statements.len()
            );
            summary.statements += statements.len();
            session.append(statements)?;
            summary.lowered += 1;
        }

        Ok(summary)
    }
}

/// Lower `commands` into `session`, failing on unknown kinds
pub fn lower_commands(
    registry: &Registry,
    session: &mut GenerationSession,
    commands: &[Command],
) -> Result<ProcessSummary, GenError> {
    Lowerer::new(registry).process(session, commands)
}
