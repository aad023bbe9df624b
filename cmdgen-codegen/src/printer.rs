//! Go statement printer
//!
//! Low-level formatting of single statements and expressions into Go text.
//! The printer also records every import path referenced through a qualified
//! identifier, so the assembler can emit the import block afterwards.

use cmdgen_common::GenError;
use cmdgen_ir::{is_go_identifier, Expr, Literal, Statement};
use std::collections::BTreeSet;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Quote a string the way Go's `strconv.Quote` does
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if is_go_printable(c) => out.push(c),
            c if (c as u32) <= 0xffff => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// Go's `strconv.IsPrint`: letters, marks, numbers, punctuation, symbols and
/// the ASCII space
fn is_go_printable(c: char) -> bool {
    c == ' '
        || !matches!(
            get_general_category(c),
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::Surrogate
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
                | GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        )
}

/// Package name Go derives from an import path: its last segment
pub fn package_alias(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Prints statements into an indented Go body
pub struct GoPrinter {
    out: String,
    indent: usize,
    imports: BTreeSet<String>,
}

impl GoPrinter {
    /// Printer whose statements start at `indent` tabs
    pub fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
            imports: BTreeSet::new(),
        }
    }

    /// Printed text and the sorted set of referenced import paths
    pub fn finish(self) -> (String, BTreeSet<String>) {
        (self.out, self.imports)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn statement(&mut self, stmt: &Statement) -> Result<(), GenError> {
        match stmt {
            Statement::If { init, cond, body } => {
                let init = match init {
                    Some(init) => format!("{}; ", self.simple_statement(init)?),
                    None => String::new(),
                };
                let cond = self.expr(cond)?;
                let header = format!("if {init}{cond} {{");
                self.line(&header);
                self.indent += 1;
                for inner in body {
                    self.statement(inner)?;
                }
                self.indent -= 1;
                self.line("}");
            }
            Statement::Comment(text) => {
                for line in text.lines() {
                    if line.is_empty() {
                        self.line("//");
                    } else {
                        self.line(&format!("// {line}"));
                    }
                }
            }
            Statement::Defer(call) => {
                let text = format!("defer {}", self.call_expr(call)?);
                self.line(&text);
            }
            simple => {
                let text = self.simple_statement(simple)?;
                self.line(&text);
            }
        }
        Ok(())
    }

    /// Statements allowed on a single line, including `if` initialisers
    fn simple_statement(&mut self, stmt: &Statement) -> Result<String, GenError> {
        match stmt {
            Statement::Define { names, value } => {
                Ok(format!("{} := {}", self.lhs(names)?, self.expr(value)?))
            }
            Statement::Assign { names, value } => {
                Ok(format!("{} = {}", self.lhs(names)?, self.expr(value)?))
            }
            Statement::Expr(expr) => self.call_expr(expr),
            other => Err(GenError::render_failed(format!(
                "'{}' statement cannot be used as a simple statement",
                other.tag()
            ))),
        }
    }

    fn lhs(&self, names: &[String]) -> Result<String, GenError> {
        if names.is_empty() {
            return Err(GenError::render_failed("assignment without a target"));
        }
        for name in names {
            ident(name)?;
        }
        Ok(names.join(", "))
    }

    /// Only calls may stand alone as expression statements
    fn call_expr(&mut self, expr: &Expr) -> Result<String, GenError> {
        match expr {
            Expr::Call { .. } => self.expr(expr),
            other => Err(GenError::render_failed(format!(
                "expression statement is not a call: {other:?}"
            ))),
        }
    }

    pub fn expr(&mut self, expr: &Expr) -> Result<String, GenError> {
        match expr {
            Expr::Lit(lit) => literal(lit),
            Expr::Ident(name) => Ok(ident(name)?.to_string()),
            Expr::Qual { path, name } => {
                let alias = package_alias(path);
                if path.is_empty() || alias == "_" || !is_go_identifier(alias) {
                    return Err(GenError::render_failed(format!("invalid import path '{path}'")));
                }
                ident(name)?;
                self.imports.insert(path.clone());
                Ok(format!("{alias}.{name}"))
            }
            Expr::Call { func, args } => {
                let func = self.expr(func)?;
                let args = args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{func}({})", args.join(", ")))
            }
            Expr::Selector { recv, name } => {
                let recv = self.expr(recv)?;
                Ok(format!("{recv}.{}", ident(name)?))
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.operand(lhs)?;
                let rhs = self.operand(rhs)?;
                Ok(format!("{lhs} {} {rhs}", op.symbol()))
            }
            Expr::Conversion { ty, value } => {
                if !is_type_name(ty) {
                    return Err(GenError::render_failed(format!("invalid conversion type '{ty}'")));
                }
                Ok(format!("{ty}({})", self.expr(value)?))
            }
        }
    }

    /// Nested binary expressions are parenthesised
    fn operand(&mut self, expr: &Expr) -> Result<String, GenError> {
        let text = self.expr(expr)?;
        if matches!(expr, Expr::Binary { .. }) {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }
}

fn ident(name: &str) -> Result<&str, GenError> {
    if is_go_identifier(name) {
        Ok(name)
    } else {
        Err(GenError::render_failed(format!("invalid identifier '{name}'")))
    }
}

fn literal(lit: &Literal) -> Result<String, GenError> {
    match lit {
        Literal::Str(s) => Ok(go_quote(s)),
        Literal::Int(n) => Ok(n.to_string()),
        // Debug keeps the fractional part, so `1.0` stays a float constant
        Literal::Float(n) if n.is_finite() => Ok(format!("{n:?}")),
        Literal::Float(n) => Err(GenError::render_failed(format!("non-finite float literal {n}"))),
        Literal::Bool(b) => Ok(b.to_string()),
        Literal::Nil => Ok("nil".to_string()),
    }
}

/// Type names accepted in conversions: identifiers with slice, pointer and
/// package prefixes, such as `[]byte` or `*sql.DB`
fn is_type_name(ty: &str) -> bool {
    let base = ty.trim_start_matches("[]").trim_start_matches('*');
    !base.is_empty() && base.split('.').all(is_go_identifier)
}
