//! Program assembly
//!
//! Wraps the statements of a session in the Go program scaffold: header
//! comment, package clause, import block and the entry-point function.

use crate::printer::{go_quote, GoPrinter};
use cmdgen_common::GenError;
use cmdgen_ir::{is_go_identifier, GenerationSession};
use log::debug;

/// Render a complete Go source file for `session`.
///
/// The session is left untouched; the same session always produces the same
/// text.
pub fn emit_program(session: &GenerationSession) -> Result<String, GenError> {
    let meta = session.meta();
    scaffold_name(&meta.package, "package")?;
    scaffold_name(&meta.entry_point, "entry point")?;

    let mut printer = GoPrinter::new(1);
    for stmt in session.statements() {
        printer.statement(stmt)?;
    }
    let (body, imports) = printer.finish();

    let mut out = String::new();

    if let Some(header) = &meta.header {
        for line in header.lines() {
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                out.push_str(&format!("// {line}\n"));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("package {}\n\n", meta.package));

    match imports.len() {
        0 => {}
        1 => {
            for path in &imports {
                out.push_str(&format!("import {}\n\n", go_quote(path)));
            }
        }
        _ => {
            out.push_str("import (\n");
            for path in &imports {
                out.push_str(&format!("\t{}\n", go_quote(path)));
            }
            out.push_str(")\n\n");
        }
    }

    out.push_str(&format!("func {}() {{\n", meta.entry_point));
    out.push_str(&body);
    out.push_str("}\n");

    debug!(
        "Emitted package '{}' with {} statement(s) and {} import(s)",
        meta.package,
        session.len(),
        imports.len()
    );
    Ok(out)
}

fn scaffold_name(name: &str, what: &str) -> Result<(), GenError> {
    if name != "_" && is_go_identifier(name) {
        Ok(())
    } else {
        Err(GenError::render_failed(format!("invalid {what} name '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_ir::{Expr, ScaffoldMeta, Statement};
    use pretty_assertions::assert_eq;

    fn session_with(meta: ScaffoldMeta, statements: Vec<Statement>) -> GenerationSession {
        let mut session = GenerationSession::new(meta);
        session.append(statements).unwrap();
        session
    }

    #[test]
    fn test_empty_program() {
        let session = GenerationSession::default();
        assert_eq!(emit_program(&session).unwrap(), "package main\n\nfunc main() {\n}\n");
    }

    #[test]
    fn test_single_import() {
        let session = session_with(
            ScaffoldMeta::default(),
            vec![Statement::expr(Expr::call(
                Expr::qual("fmt", "Println"),
                vec![Expr::str("Hello, world")],
            ))],
        );

        assert_eq!(
            emit_program(&session).unwrap(),
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"Hello, world\")\n}\n"
        );
    }

    #[test]
    fn test_imports_sorted_and_deduplicated() {
        let session = session_with(
            ScaffoldMeta::default(),
            vec![
                Statement::expr(Expr::call(Expr::qual("log", "Print"), vec![])),
                Statement::expr(Expr::call(Expr::qual("fmt", "Print"), vec![])),
                Statement::expr(Expr::call(Expr::qual("log", "Print"), vec![])),
            ],
        );

        let text = emit_program(&session).unwrap();
        assert!(text.contains("import (\n\t\"fmt\"\n\t\"log\"\n)\n"));
        assert_eq!(text.matches("\"log\"").count(), 1);
    }

    #[test]
    fn test_header_and_custom_scaffold() {
        let meta = ScaffoldMeta {
            package: "gen".to_string(),
            entry_point: "Run".to_string(),
            header: Some("Code generated by cmdgen. DO NOT EDIT.\n\nSource: input.json".to_string()),
        };
        let session = session_with(meta, vec![Statement::define(&["x"], Expr::str("hello"))]);

        assert_eq!(
            emit_program(&session).unwrap(),
            "// Code generated by cmdgen. DO NOT EDIT.\n//\n// Source: input.json\n\n\
             package gen\n\nfunc Run() {\n\tx := \"hello\"\n}\n"
        );
    }

    #[test]
    fn test_invalid_scaffold_names() {
        for (package, entry_point) in [("", "main"), ("main", "_"), ("my-pkg", "main"), ("main", "func")] {
            let meta = ScaffoldMeta {
                package: package.to_string(),
                entry_point: entry_point.to_string(),
                header: None,
            };
            let session = GenerationSession::new(meta);
            assert!(matches!(emit_program(&session), Err(GenError::RenderFailed { .. })));
        }
    }
}
