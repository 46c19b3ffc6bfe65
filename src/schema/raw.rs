// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw declaration input.
//!
//! The compiler does not parse source text. An external declaration
//! loader hands it declaration blocks as structured key/value data, and
//! this module is that wire shape: [`RawValue`] for values, [`RawBlock`]
//! for one declaration, [`DeclPath`] for where the declaration lives.
//!
//! # Shape conventions
//!
//! | Declared type | Accepted raw shape |
//! |---------------|--------------------|
//! | symbol | `RawValue::Symbol` |
//! | list-of-symbol | `RawValue::List` of symbols |
//! | bool | `RawValue::Bool` |
//! | constant change source | `RawValue::Tagged("const", literal)` |
//! | field-reference change source | `RawValue::Symbol` |

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::value::{QualifiedName, Symbol, Value};
use crate::error::SchemaError;

/// Section of an entity declaration a path points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The `commands` block.
    Commands,

    /// The `events` block.
    Events,

    /// The `projections` block.
    Projections,

    /// The domain-scoped `application` block.
    Application
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Commands => "commands",
            Self::Events => "events",
            Self::Projections => "projections",
            Self::Application => "application"
        };
        write!(f, "{name}")
    }
}

/// Location of a declaration: owning entity, section, and item name.
///
/// Every error carries one of these so the user can find the offending
/// declaration without re-deriving it from a stack trace. Displays as
/// `Billing.Invoice/commands/register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclPath {
    /// Fully qualified owning entity (or domain for application blocks).
    pub entity: QualifiedName,

    /// Declaration section.
    pub section: Section,

    /// Item name, once known. Absent while the block's own `name` entry
    /// has not been parsed yet.
    pub item: Option<Symbol>
}

impl DeclPath {
    /// Path to a section of an entity.
    pub fn new(entity: QualifiedName, section: Section) -> Self {
        Self {
            entity,
            section,
            item: None
        }
    }

    /// Narrow the path to a named item within the section.
    #[must_use]
    pub fn item(&self, name: Symbol) -> Self {
        Self {
            entity: self.entity.clone(),
            section: self.section,
            item: Some(name)
        }
    }
}

impl Display for DeclPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.section)?;
        if let Some(item) = &self.item {
            write!(f, "/{item}")?;
        }
        Ok(())
    }
}

impl Serialize for DeclPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// A structured declaration value as delivered by the loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RawValue {
    /// Bare symbol, e.g. an attribute or action name.
    Symbol(Symbol),

    /// String literal.
    Str(String),

    /// Integer literal.
    Int(i64),

    /// Floating point literal.
    Float(f64),

    /// Boolean literal.
    Bool(bool),

    /// Ordered list of values.
    List(Vec<RawValue>),

    /// Ordered key/value mapping.
    Map(Vec<(String, RawValue)>),

    /// Tagged value, e.g. `Tagged("const", Str("active"))`.
    Tagged(String, Box<RawValue>)
}

impl RawValue {
    /// Shorthand for a symbol value.
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Self::Symbol(name.into())
    }

    /// Shorthand for a list of symbols.
    pub fn symbols<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>
    {
        Self::List(names.into_iter().map(|n| Self::Symbol(n.into())).collect())
    }

    /// Shorthand for a `{const, literal}` change source.
    pub fn constant(value: Value) -> Self {
        let raw = match value {
            Value::Null => Self::List(Vec::new()),
            Value::Bool(v) => Self::Bool(v),
            Value::Int(v) => Self::Int(v),
            Value::Float(v) => Self::Float(v),
            Value::Str(v) => Self::Str(v),
            Value::Symbol(v) => Self::Symbol(v)
        };
        Self::Tagged("const".to_owned(), Box::new(raw))
    }

    /// Human-readable shape name for error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Symbol(_) => "symbol",
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Tagged(..) => "tagged value"
        }
    }

    /// Interpret this value as a literal, if it is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<Value> {
        match self {
            Self::Str(v) => Some(Value::Str(v.clone())),
            Self::Int(v) => Some(Value::Int(*v)),
            Self::Float(v) => Some(Value::Float(*v)),
            Self::Bool(v) => Some(Value::Bool(*v)),
            Self::Symbol(v) => Some(Value::Symbol(v.clone())),
            _ => None
        }
    }
}

/// One declaration block: an ordered set of `(key, value)` entries plus
/// the path it was declared at.
///
/// Accessors perform the structural checks of the schema phase and fail
/// with [`SchemaError`] naming the offending field and path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawBlock {
    path: DeclPath,
    entries: Vec<(String, RawValue)>
}

impl RawBlock {
    /// Empty block at `path`.
    pub fn new(path: DeclPath) -> Self {
        Self {
            path,
            entries: Vec::new()
        }
    }

    /// Builder-style entry append.
    #[must_use]
    pub fn entry(mut self, key: &str, value: RawValue) -> Self {
        self.entries.push((key.to_owned(), value));
        self
    }

    /// The block's declaration path, as supplied by the loader. The
    /// stored path never changes; parsers narrow a copy to the item
    /// name once the `name` entry has been read, and the parsed
    /// declarations carry that narrowed copy.
    #[must_use]
    pub fn path(&self) -> &DeclPath {
        &self.path
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Reject entries outside the declared vocabulary.
    pub fn expect_keys(&self, path: &DeclPath, allowed: &[&str]) -> Result<(), SchemaError> {
        for (key, _) in &self.entries {
            if !allowed.contains(&key.as_str()) {
                return Err(SchemaError::UnknownField {
                    path: path.clone(),
                    field: key.clone()
                });
            }
        }
        Ok(())
    }

    /// Required symbol entry.
    pub fn require_symbol(&self, path: &DeclPath, key: &'static str) -> Result<Symbol, SchemaError> {
        match self.get(key) {
            Some(RawValue::Symbol(sym)) => Ok(sym.clone()),
            Some(other) => Err(SchemaError::wrong_shape(path, key, "symbol", other)),
            None => Err(SchemaError::MissingField {
                path: path.clone(),
                field: key
            })
        }
    }

    /// Optional symbol entry.
    pub fn optional_symbol(
        &self,
        path: &DeclPath,
        key: &'static str
    ) -> Result<Option<Symbol>, SchemaError> {
        match self.get(key) {
            Some(RawValue::Symbol(sym)) => Ok(Some(sym.clone())),
            Some(other) => Err(SchemaError::wrong_shape(path, key, "symbol", other)),
            None => Ok(None)
        }
    }

    /// Required list-of-symbol entry.
    pub fn require_symbols(
        &self,
        path: &DeclPath,
        key: &'static str
    ) -> Result<Vec<Symbol>, SchemaError> {
        match self.get(key) {
            Some(RawValue::List(items)) => {
                let mut symbols = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        RawValue::Symbol(sym) => symbols.push(sym.clone()),
                        other => {
                            return Err(SchemaError::wrong_shape(
                                path,
                                key,
                                "list of symbols",
                                other
                            ));
                        }
                    }
                }
                Ok(symbols)
            }
            Some(other) => Err(SchemaError::wrong_shape(path, key, "list of symbols", other)),
            None => Err(SchemaError::MissingField {
                path: path.clone(),
                field: key
            })
        }
    }

    /// Optional bool entry with a declared default.
    pub fn bool_or(
        &self,
        path: &DeclPath,
        key: &'static str,
        default: bool
    ) -> Result<bool, SchemaError> {
        match self.get(key) {
            Some(RawValue::Bool(v)) => Ok(*v),
            Some(other) => Err(SchemaError::wrong_shape(path, key, "bool", other)),
            None => Ok(default)
        }
    }

    /// Optional map entry, returned as its ordered entries.
    pub fn optional_map(
        &self,
        path: &DeclPath,
        key: &'static str
    ) -> Result<Option<&[(String, RawValue)]>, SchemaError> {
        match self.get(key) {
            Some(RawValue::Map(entries)) => Ok(Some(entries)),
            Some(other) => Err(SchemaError::wrong_shape(path, key, "map", other)),
            None => Ok(None)
        }
    }

    /// Optional qualified-name entry, accepted as symbol or string.
    pub fn optional_qualified(
        &self,
        path: &DeclPath,
        key: &'static str
    ) -> Result<Option<QualifiedName>, SchemaError> {
        match self.get(key) {
            Some(RawValue::Symbol(sym)) => Ok(Some(QualifiedName::parse(sym.as_str()))),
            Some(RawValue::Str(s)) => Ok(Some(QualifiedName::parse(s))),
            Some(other) => Err(SchemaError::wrong_shape(path, key, "module path", other)),
            None => Ok(None)
        }
    }

    /// Required qualified-name entry.
    pub fn require_qualified(
        &self,
        path: &DeclPath,
        key: &'static str
    ) -> Result<QualifiedName, SchemaError> {
        self.optional_qualified(path, key)?
            .ok_or_else(|| SchemaError::MissingField {
                path: path.clone(),
                field: key
            })
    }
}
