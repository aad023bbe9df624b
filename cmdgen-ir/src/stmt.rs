//! Statement Model
//!
//! A `Statement` is one emittable Go program fragment. Statements are plain
//! data: lowering routines build them, the renderer reads them, and nothing
//! changes them in between.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Go keywords, which can never be used as identifiers
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Check whether `name` is a legal Go identifier. The blank identifier `_` is
/// accepted.
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = match chars.next() {
        Some(c) => is_go_letter(c),
        None => false,
    };

    first_ok
        && chars.all(|c| is_go_letter(c) || is_go_digit(c))
        && !GO_KEYWORDS.contains(&name)
}

/// Go letters: `_` and the Unicode letter categories Lu, Ll, Lt, Lm and Lo
fn is_go_letter(c: char) -> bool {
    c == '_'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
}

/// Go digits are decimal numbers (Nd) only
fn is_go_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
}

/// Binary operators used in generated conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
        }
    }
}

/// Go expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(Literal),
    Ident(String),
    /// Package-qualified identifier; the renderer imports `path`
    Qual { path: String, name: String },
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// Field or method selector: `recv.name`
    Selector { recv: Box<Expr>, name: String },
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// Type conversion: `ty(value)`
    Conversion { ty: String, value: Box<Expr> },
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn qual(path: &str, name: &str) -> Self {
        Expr::Qual {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    pub fn str(value: &str) -> Self {
        Expr::Lit(Literal::Str(value.to_string()))
    }

    pub fn nil() -> Self {
        Expr::Lit(Literal::Nil)
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn select(recv: Expr, name: &str) -> Self {
        Expr::Selector {
            recv: Box::new(recv),
            name: name.to_string(),
        }
    }

    /// Method call: `recv.name(args...)`
    pub fn method(recv: Expr, name: &str, args: Vec<Expr>) -> Self {
        Self::call(Self::select(recv, name), args)
    }

    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn conversion(ty: &str, value: Expr) -> Self {
        Expr::Conversion {
            ty: ty.to_string(),
            value: Box::new(value),
        }
    }
}

/// Go statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Short variable declaration: `a, b := value`
    Define { names: Vec<String>, value: Expr },
    /// Assignment: `a, b = value`
    Assign { names: Vec<String>, value: Expr },
    Expr(Expr),
    Defer(Expr),
    If {
        init: Option<Box<Statement>>,
        cond: Expr,
        body: Vec<Statement>,
    },
    Comment(String),
}

impl Statement {
    pub fn define(names: &[&str], value: Expr) -> Self {
        Statement::Define {
            names: names.iter().map(|n| n.to_string()).collect(),
            value,
        }
    }

    pub fn assign(names: &[&str], value: Expr) -> Self {
        Statement::Assign {
            names: names.iter().map(|n| n.to_string()).collect(),
            value,
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Statement::Expr(expr)
    }

    pub fn defer(call: Expr) -> Self {
        Statement::Defer(call)
    }

    pub fn if_then(init: Option<Statement>, cond: Expr, body: Vec<Statement>) -> Self {
        Statement::If {
            init: init.map(Box::new),
            cond,
            body,
        }
    }

    pub fn comment(text: &str) -> Self {
        Statement::Comment(text.to_string())
    }

    /// Short name of the statement variant, for logging
    pub fn tag(&self) -> &'static str {
        match self {
            Statement::Define { .. } => "define",
            Statement::Assign { .. } => "assign",
            Statement::Expr(_) => "expr",
            Statement::Defer(_) => "defer",
            Statement::If { .. } => "if",
            Statement::Comment(_) => "comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_go_identifier("x"));
        assert!(is_go_identifier("_"));
        assert!(is_go_identifier("userName2"));
        assert!(is_go_identifier("ÄÖ"));
        assert!(!is_go_identifier(""));
        assert!(!is_go_identifier("2fast"));
        assert!(!is_go_identifier("my-var"));
        assert!(!is_go_identifier("func"));
        assert!(!is_go_identifier("a b"));
    }

    #[test]
    fn test_identifier_unicode_categories() {
        assert!(is_go_identifier("x\u{0663}"));
        assert!(is_go_identifier("\u{02b0}mod"));
        // letter numbers and superscripts are alphanumeric but not Go letters or digits
        assert!(!is_go_identifier("\u{2167}"));
        assert!(!is_go_identifier("x\u{00b2}"));
        assert!(!is_go_identifier("\u{0663}x"));
        assert!(!is_go_identifier("a\u{0301}"));
    }

    #[test]
    fn test_method_builds_call_on_selector() {
        let expr = Expr::method(Expr::ident("db"), "Close", vec![]);
        match expr {
            Expr::Call { func, args } => {
                assert!(args.is_empty());
                assert_eq!(*func, Expr::select(Expr::ident("db"), "Close"));
            }
            other => panic!("Expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_statement_constructors() {
        let stmt = Statement::define(&["x", "err"], Expr::str("v"));
        assert_eq!(
            stmt,
            Statement::Define {
                names: vec!["x".to_string(), "err".to_string()],
                value: Expr::Lit(Literal::Str("v".to_string())),
            }
        );
        assert_eq!(stmt.tag(), "define");
        assert_eq!(Statement::comment("hi").tag(), "comment");
    }
}
