//! Argument helpers shared by the built-in routines

use cmdgen_common::{LowerError, ValueType};
use cmdgen_ir::{is_go_identifier, BinaryOp, Expr, Statement};

pub(crate) const LOG_PKG: &str = "log";
pub(crate) const SQL_PKG: &str = "database/sql";
pub(crate) const BCRYPT_PKG: &str = "golang.org/x/crypto/bcrypt";

/// Name of the error variable introduced by fallible calls
pub(crate) const ERR: &str = "err";

/// Return `value`, or `MissingArgument` if it is empty
pub(crate) fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, LowerError> {
    if value.is_empty() {
        Err(LowerError::MissingArgument { field })
    } else {
        Ok(value)
    }
}

/// Return `value`, or `default` if it is empty
pub(crate) fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Validate an identifier that a statement reads or assigns
pub(crate) fn identifier(name: &str) -> Result<&str, LowerError> {
    if is_go_identifier(name) {
        Ok(name)
    } else {
        Err(LowerError::InvalidIdentifier { name: name.to_string() })
    }
}

/// Validate an identifier whose value a statement reads
pub(crate) fn readable(name: &str) -> Result<&str, LowerError> {
    match identifier(name)? {
        "_" => Err(LowerError::InvalidIdentifier { name: name.to_string() }),
        name => Ok(name),
    }
}

/// Validate an identifier that a statement declares next to `err`.
/// The blank identifier and `err` itself are rejected.
pub(crate) fn binding(name: &str) -> Result<&str, LowerError> {
    match identifier(name)? {
        "_" | ERR => Err(LowerError::InvalidIdentifier { name: name.to_string() }),
        name => Ok(name),
    }
}

/// Convert a raw argument value into an expression of type `ty`
pub(crate) fn value_expr(ty: ValueType, value: &str) -> Result<Expr, LowerError> {
    match ty {
        ValueType::String => Ok(Expr::str(value)),
        ValueType::Int => value
            .parse::<i64>()
            .map(|n| Expr::Lit(cmdgen_ir::Literal::Int(n)))
            .map_err(|e| LowerError::invalid_value(ty, value, e.to_string())),
        ValueType::Float => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Expr::Lit(cmdgen_ir::Literal::Float(n))),
            Ok(_) => Err(LowerError::invalid_value(ty, value, "value is not finite")),
            Err(e) => Err(LowerError::invalid_value(ty, value, e.to_string())),
        },
        ValueType::Bool => match value {
            "true" => Ok(Expr::Lit(cmdgen_ir::Literal::Bool(true))),
            "false" => Ok(Expr::Lit(cmdgen_ir::Literal::Bool(false))),
            _ => Err(LowerError::invalid_value(ty, value, "expected 'true' or 'false'")),
        },
        ValueType::Ident => match value {
            "_" => Err(LowerError::invalid_value(ty, value, "cannot read the blank identifier")),
            _ if is_go_identifier(value) => Ok(Expr::ident(value)),
            _ => Err(LowerError::invalid_value(ty, value, "not a valid identifier")),
        },
    }
}

/// `if err != nil { log.Fatal(err) }`, optionally with an init statement
pub(crate) fn fatal_on_err(init: Option<Statement>) -> Statement {
    Statement::if_then(
        init,
        Expr::binary(Expr::ident(ERR), BinaryOp::Ne, Expr::nil()),
        vec![Statement::expr(Expr::call(
            Expr::qual(LOG_PKG, "Fatal"),
            vec![Expr::ident(ERR)],
        ))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_ir::Literal;

    #[test]
    fn test_required() {
        assert_eq!(required("x", "name"), Ok("x"));
        assert_eq!(required("", "name"), Err(LowerError::MissingArgument { field: "name" }));
    }

    #[test]
    fn test_binding_rejects_blank_and_err() {
        assert_eq!(binding("hash"), Ok("hash"));
        assert!(binding("_").is_err());
        assert!(binding("err").is_err());
        assert!(binding("9lives").is_err());
    }

    #[test]
    fn test_readable_rejects_blank() {
        assert_eq!(readable("db"), Ok("db"));
        assert_eq!(readable("err"), Ok("err"));
        assert_eq!(readable("_"), Err(LowerError::InvalidIdentifier { name: "_".to_string() }));
    }

    #[test]
    fn test_value_expr() {
        assert_eq!(value_expr(ValueType::String, "hi"), Ok(Expr::str("hi")));
        assert_eq!(value_expr(ValueType::String, ""), Ok(Expr::str("")));
        assert_eq!(value_expr(ValueType::Int, "-42"), Ok(Expr::Lit(Literal::Int(-42))));
        assert_eq!(value_expr(ValueType::Float, "2.5"), Ok(Expr::Lit(Literal::Float(2.5))));
        assert_eq!(value_expr(ValueType::Bool, "false"), Ok(Expr::Lit(Literal::Bool(false))));
        assert_eq!(value_expr(ValueType::Ident, "other"), Ok(Expr::ident("other")));
    }

    #[test]
    fn test_value_expr_rejects_bad_values() {
        let cases = [
            (ValueType::Int, "4.2"),
            (ValueType::Int, "99999999999999999999"),
            (ValueType::Float, "inf"),
            (ValueType::Float, "NaN"),
            (ValueType::Float, "abc"),
            (ValueType::Bool, "yes"),
            (ValueType::Ident, "_"),
            (ValueType::Ident, "a.b"),
        ];

        for (ty, value) in cases {
            match value_expr(ty, value) {
                Err(LowerError::InvalidValue { .. }) => {}
                other => panic!("Expected InvalidValue for {ty} {value:?}, got {other:?}"),
            }
        }
    }
}
