// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core value types shared by declarations and artifacts.
//!
//! These are the currency of the whole compiler: [`Symbol`] for attribute
//! and declaration names, [`QualifiedName`] for dotted module paths,
//! [`Value`] for literal values carried by constant change sources, and
//! [`EventInstance`] / [`Changeset`] as the runtime shape projection
//! transforms operate on.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter}
};

use serde::{Deserialize, Serialize, Serializer};

/// An interned-style name: a command name, attribute, event field, or
/// handler identifier.
///
/// Symbols compare and order by their string content, so declaration
/// order and report ordering stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbol's textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A dot-separated module path such as `Billing.Invoice`.
///
/// Used for owning entities, namespaces, and event store references.
/// Serializes as its dotted string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    segments: Vec<String>
}

impl QualifiedName {
    /// Build a qualified name from explicit segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self {
            segments
        }
    }

    /// Parse a dotted path. Empty segments are discarded, so
    /// `"Billing.Invoice"` and `"Billing..Invoice"` parse identically.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        }
    }

    /// The path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, or empty string for an empty path.
    #[must_use]
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Everything but the final segment. `None` when the path has fewer
    /// than two segments.
    #[must_use]
    pub fn parent(&self) -> Option<QualifiedName> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec()
        })
    }

    /// Append a segment, producing a child path.
    #[must_use]
    pub fn child(&self, segment: &str) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        Self {
            segments
        }
    }

    /// The sibling-group convention: replace the final segment with
    /// `group`. `Billing.Invoice` with group `Commands` yields
    /// `Billing.Commands`. A single-segment name yields just the group.
    #[must_use]
    pub fn sibling(&self, group: &str) -> QualifiedName {
        match self.parent() {
            Some(parent) => parent.child(group),
            None => Self {
                segments: vec![group.to_owned()]
            }
        }
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Ok(Self::parse(&path))
    }
}

/// A literal value carried by a constant change source or a resolved
/// changeset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value. Produced when a field reference resolves against an
    /// event instance that does not carry the field.
    Null,

    /// Boolean literal.
    Bool(bool),

    /// Integer literal.
    Int(i64),

    /// Floating point literal.
    Float(f64),

    /// String literal.
    Str(String),

    /// Symbol literal (e.g. a status atom like `pending`).
    Symbol(Symbol)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Symbol(v) => write!(f, "{v}")
        }
    }
}

/// A concrete event occurrence: the field values of one recorded event.
///
/// This is what projection transforms and aggregate transitions read
/// from. Field order is normalized (sorted) so application is
/// deterministic regardless of construction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventInstance {
    fields: BTreeMap<Symbol, Value>
}

impl EventInstance {
    /// Empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, field: impl Into<Symbol>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Look up a field value.
    #[must_use]
    pub fn get(&self, field: &Symbol) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Iterate fields in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Value)> {
        self.fields.iter()
    }
}

/// An ordered set of attribute changes produced by a projection
/// transform: target attribute to resolved value.
///
/// Entry order follows the declaration order of the projection's
/// `changes` mapping, which keeps artifact descriptions reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Changeset {
    entries: Vec<(Symbol, Value)>
}

impl Changeset {
    /// Empty changeset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or overwrite a change for `target`.
    pub fn set(&mut self, target: Symbol, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == target) {
            entry.1 = value;
        } else {
            self.entries.push((target, value));
        }
    }

    /// Look up the change for `target`.
    #[must_use]
    pub fn get(&self, target: &Symbol) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, v)| v)
    }

    /// Iterate changes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Value)> {
        self.entries.iter().map(|(t, v)| (t, v))
    }

    /// Number of changed attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
