//! Data-access commands: `database connect` and `database query`

use super::values::{binding, fatal_on_err, or_default, readable, required, ERR, SQL_PKG};
use cmdgen_common::{Args, LowerError, Query, QueryType};
use cmdgen_ir::{Expr, Statement};

const DEFAULT_HANDLE: &str = "db";
const DEFAULT_ROWS: &str = "rows";

/// Open a `database/sql` handle and close it when the entry point returns.
///
/// `name` is the handle (default `db`), `type` the driver name and `value`
/// the data source name.
pub fn database_connect(args: &Args) -> Result<Vec<Statement>, LowerError> {
    let handle = binding(or_default(&args.name, DEFAULT_HANDLE))?;
    let driver = required(&args.ty, "type")?;

    let open = Expr::call(
        Expr::qual(SQL_PKG, "Open"),
        vec![Expr::str(driver), Expr::str(&args.value)],
    );

    Ok(vec![
        Statement::define(&[handle, ERR], open),
        fatal_on_err(None),
        Statement::defer(Expr::method(Expr::ident(handle), "Close", vec![])),
    ])
}

/// Run the query described by `sql` against the handle named by `value`
/// (default `db`).
///
/// Selects bind their result set to `name` (default `rows`); every other
/// query type is executed and only its error is checked.
pub fn database_query(args: &Args) -> Result<Vec<Statement>, LowerError> {
    let query = args.query.as_ref().ok_or(LowerError::MissingQuery)?;
    let kind = query
        .kind
        .ok_or(LowerError::MissingArgument { field: "sql.type" })?;
    let handle = readable(or_default(&args.value, DEFAULT_HANDLE))?;
    let text = sql_text(kind, query)?;

    if kind == QueryType::Select {
        let rows = binding(or_default(&args.name, DEFAULT_ROWS))?;
        let call = Expr::method(Expr::ident(handle), "Query", vec![Expr::str(&text)]);
        return Ok(vec![
            Statement::define(&[rows, ERR], call),
            fatal_on_err(None),
            Statement::defer(Expr::method(Expr::ident(rows), "Close", vec![])),
        ]);
    }

    let exec = Statement::define(
        &["_", ERR],
        Expr::method(Expr::ident(handle), "Exec", vec![Expr::str(&text)]),
    );
    Ok(vec![fatal_on_err(Some(exec))])
}

/// Build the SQL text for `query`
fn sql_text(kind: QueryType, query: &Query) -> Result<String, LowerError> {
    let table = sql_table(&query.table)?;
    let selection = query.selection.trim();
    let update = query.update.trim();

    let text = match kind {
        QueryType::Select => with_where(format!("SELECT * FROM {table}"), selection),
        QueryType::Insert => {
            if !selection.is_empty() {
                return Err(LowerError::invalid_query("insert does not take a selection clause"));
            }
            format!("INSERT INTO {table} SET {}", required(update, "sql.update")?)
        }
        QueryType::Update => with_where(
            format!("UPDATE {table} SET {}", required(update, "sql.update")?),
            selection,
        ),
        QueryType::Delete => {
            if selection.is_empty() {
                return Err(LowerError::invalid_query("delete requires a selection clause"));
            }
            with_where(format!("DELETE FROM {table}"), selection)
        }
    };

    Ok(text)
}

fn with_where(mut text: String, selection: &str) -> String {
    if !selection.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(selection);
    }
    text
}

/// Table names are plain SQL identifiers, optionally schema-qualified
fn sql_table(table: &str) -> Result<&str, LowerError> {
    let table = required(table.trim(), "sql.table")?;
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c == '.' || c.is_ascii_alphanumeric());

    if valid {
        Ok(table)
    } else {
        Err(LowerError::invalid_query(format!("'{table}' is not a valid table name")))
    }
}
