//! `hash password`

use super::values::{binding, fatal_on_err, required, value_expr, BCRYPT_PKG, ERR};
use cmdgen_common::{Args, LowerError, ValueType};
use cmdgen_ir::{Expr, Statement};

/// ```go
/// name, err := bcrypt.GenerateFromPassword([]byte(value), bcrypt.DefaultCost)
/// if err != nil {
///     log.Fatal(err)
/// }
/// ```
pub fn hash_password(args: &Args) -> Result<Vec<Statement>, LowerError> {
    let name = binding(required(&args.name, "name")?)?;
    let ty = ValueType::parse(&args.ty)?;
    if !matches!(ty, ValueType::String | ValueType::Ident) {
        return Err(LowerError::UnsupportedType { ty: ty.to_string() });
    }
    let password = value_expr(ty, required(&args.value, "value")?)?;

    let hash = Expr::call(
        Expr::qual(BCRYPT_PKG, "GenerateFromPassword"),
        vec![
            Expr::conversion("[]byte", password),
            Expr::qual(BCRYPT_PKG, "DefaultCost"),
        ],
    );

    Ok(vec![Statement::define(&[name, ERR], hash), fatal_on_err(None)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_literal_password() {
        let statements = hash_password(&Args::new("hashed", "string", "s3cret")).unwrap();

        assert_eq!(statements.len(), 2);
        match &statements[0] {
            Statement::Define { names, value: Expr::Call { args, .. } } => {
                assert_eq!(names, &["hashed", "err"]);
                assert_eq!(args[0], Expr::conversion("[]byte", Expr::str("s3cret")));
            }
            other => panic!("Expected define of a call, got {other:?}"),
        }
        assert!(matches!(statements[1], Statement::If { init: None, .. }));
    }

    #[test]
    fn test_hash_password_from_identifier() {
        let statements = hash_password(&Args::new("hashed", "ident", "password")).unwrap();
        match &statements[0] {
            Statement::Define { value: Expr::Call { args, .. }, .. } => {
                assert_eq!(args[0], Expr::conversion("[]byte", Expr::ident("password")));
            }
            other => panic!("Expected define of a call, got {other:?}"),
        }
    }

    #[test]
    fn test_hash_password_errors() {
        assert_eq!(
            hash_password(&Args::new("hashed", "string", "")),
            Err(LowerError::MissingArgument { field: "value" })
        );
        assert_eq!(
            hash_password(&Args::new("err", "string", "pw")),
            Err(LowerError::InvalidIdentifier { name: "err".to_string() })
        );
        assert_eq!(
            hash_password(&Args::new("hashed", "int", "1234")),
            Err(LowerError::UnsupportedType { ty: "int".to_string() })
        );
    }
}
