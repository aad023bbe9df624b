//! Command data model
//!
//! A command is one declarative request to emit a program fragment. Commands
//! are produced by the decoder, consumed once by the lowering engine and then
//! dropped.

use crate::error::LowerError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier selecting the lowering routine for a command.
///
/// The set of kinds is open: any string is a valid kind, and whether it can be
/// lowered depends only on what has been registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandKind(String);

impl CommandKind {
    pub const CREATE_VARIABLE: &'static str = "create variable";
    pub const CHANGE_VARIABLE: &'static str = "change variable";
    pub const JUDGE_TARGET: &'static str = "judge target";
    pub const HASH_PASSWORD: &'static str = "hash password";
    pub const DATABASE_CONNECT: &'static str = "database connect";
    pub const DATABASE_QUERY: &'static str = "database query";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommandKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for CommandKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

/// One decoded input command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "command")]
    pub kind: CommandKind,
    #[serde(default)]
    pub args: Args,
}

impl Command {
    pub fn new(kind: impl Into<CommandKind>, args: Args) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// Command arguments.
///
/// Every field is optional on the wire; each lowering routine decides which
/// ones it needs and how to read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Args {
    /// Target identifier
    pub name: String,
    /// Value type for variable kinds, driver name for `database connect`
    #[serde(rename = "type")]
    pub ty: String,
    /// Literal text, or an identifier when `ty` is `ident`
    pub value: String,
    #[serde(rename = "sql", skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

impl Args {
    pub fn new(name: &str, ty: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            value: value.to_string(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }
}

/// SQL statement category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Select => write!(f, "select"),
            QueryType::Insert => write!(f, "insert"),
            QueryType::Update => write!(f, "update"),
            QueryType::Delete => write!(f, "delete"),
        }
    }
}

/// Data-access descriptor carried by `database query` commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub table: String,
    /// `None` when the input leaves `type` out or empty
    #[serde(rename = "type", deserialize_with = "empty_as_none")]
    pub kind: Option<QueryType>,
    /// Selection (WHERE) clause
    #[serde(rename = "notion", alias = "selection")]
    pub selection: String,
    /// SET clause for insert and update
    pub update: String,
}

impl Query {
    pub fn new(table: &str, kind: QueryType) -> Self {
        Self {
            table: table.to_string(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn selection(mut self, clause: &str) -> Self {
        self.selection = clause.to_string();
        self
    }

    pub fn update(mut self, clause: &str) -> Self {
        self.update = clause.to_string();
        self
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<QueryType>, D::Error>
where
    D: Deserializer<'de>,
{
    const VARIANTS: &[&str] = &["select", "insert", "update", "delete"];

    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some("select") => Ok(Some(QueryType::Select)),
        Some("insert") => Ok(Some(QueryType::Insert)),
        Some("update") => Ok(Some(QueryType::Update)),
        Some("delete") => Ok(Some(QueryType::Delete)),
        Some(other) => Err(de::Error::unknown_variant(other, VARIANTS)),
    }
}

/// Value type of a variable-like command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    /// `value` names an existing identifier
    Ident,
}

impl ValueType {
    /// Parse the `type` argument. An empty type means `string`.
    pub fn parse(ty: &str) -> Result<Self, LowerError> {
        match ty {
            "" | "string" => Ok(ValueType::String),
            "int" => Ok(ValueType::Int),
            "float" => Ok(ValueType::Float),
            "bool" => Ok(ValueType::Bool),
            "ident" => Ok(ValueType::Ident),
            other => Err(LowerError::UnsupportedType { ty: other.to_string() }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Ident => write!(f, "ident"),
        }
    }
}
