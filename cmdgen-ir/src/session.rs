//! Generation session
//!
//! The mutable state of one generation run: scaffold metadata plus the
//! ordered statement buffer. A session is owned by exactly one run and is
//! never shared for concurrent mutation.

use crate::stmt::Statement;
use cmdgen_common::GenError;
use log::trace;

/// Program scaffold metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldMeta {
    /// Go package name
    pub package: String,
    /// Name of the function wrapping every statement
    pub entry_point: String,
    /// Optional comment emitted above the package clause
    pub header: Option<String>,
}

impl Default for ScaffoldMeta {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
            entry_point: "main".to_string(),
            header: None,
        }
    }
}

/// Session lifecycle: `Created -> Accumulating -> Rendered`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Accumulating,
    Rendered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSession {
    meta: ScaffoldMeta,
    statements: Vec<Statement>,
    state: SessionState,
}

impl GenerationSession {
    pub fn new(meta: ScaffoldMeta) -> Self {
        Self {
            meta,
            statements: Vec::new(),
            state: SessionState::Created,
        }
    }

    pub fn meta(&self) -> &ScaffoldMeta {
        &self.meta
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Append statements after everything already buffered.
    ///
    /// Fails once the session has been rendered; earlier statements are never
    /// touched.
    pub fn append(&mut self, statements: Vec<Statement>) -> Result<(), GenError> {
        if self.state == SessionState::Rendered {
            return Err(GenError::SessionRendered);
        }

        let base = self.statements.len();
        for (offset, stmt) in statements.iter().enumerate() {
            trace!("session: append #{} ({})", base + offset, stmt.tag());
        }
        self.statements.extend(statements);
        self.state = SessionState::Accumulating;
        Ok(())
    }

    /// Move the session into its terminal state
    pub fn mark_rendered(&mut self) {
        self.state = SessionState::Rendered;
    }
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new(ScaffoldMeta::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Expr;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_scaffold() {
        let session = GenerationSession::default();
        assert_eq!(session.meta().package, "main");
        assert_eq!(session.meta().entry_point, "main");
        assert_eq!(session.state(), SessionState::Created);
        assert!(session.is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = GenerationSession::default();
        session.append(vec![Statement::comment("a")]).unwrap();
        session
            .append(vec![Statement::comment("b"), Statement::comment("c")])
            .unwrap();

        assert_eq!(session.state(), SessionState::Accumulating);
        assert_eq!(
            session.statements(),
            &[
                Statement::comment("a"),
                Statement::comment("b"),
                Statement::comment("c"),
            ]
        );
    }

    #[test]
    fn test_append_after_render_fails() {
        let mut session = GenerationSession::default();
        session
            .append(vec![Statement::define(&["x"], Expr::str("hello"))])
            .unwrap();
        session.mark_rendered();

        let result = session.append(vec![Statement::comment("late")]);
        assert_eq!(result, Err(GenError::SessionRendered));
        assert_eq!(session.len(), 1);
        assert_eq!(session.state(), SessionState::Rendered);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut session = GenerationSession::default();
        session.append(vec![Statement::comment("a")]).unwrap();

        let snapshot = session.clone();
        session.append(vec![Statement::comment("b")]).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(session.len(), 2);
    }
}
