//! Variable commands: `create variable` and `change variable`

use super::values::{binding, identifier, required, value_expr};
use cmdgen_common::{Args, LowerError, ValueType};
use cmdgen_ir::Statement;

/// `name := value`
pub fn create_variable(args: &Args) -> Result<Vec<Statement>, LowerError> {
    let name = binding(required(&args.name, "name")?)?;
    let ty = ValueType::parse(&args.ty)?;
    let value = value_expr(ty, &args.value)?;

    Ok(vec![Statement::define(&[name], value)])
}

/// `name = value`
///
/// The target is not checked against earlier commands; the generated program
/// is expected to declare it.
pub fn change_variable(args: &Args) -> Result<Vec<Statement>, LowerError> {
    let name = identifier(required(&args.name, "name")?)?;
    let ty = ValueType::parse(&args.ty)?;
    let value = value_expr(ty, &args.value)?;

    Ok(vec![Statement::assign(&[name], value)])
}
