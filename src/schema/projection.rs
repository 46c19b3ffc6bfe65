// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projection declarations.
//!
//! A projection declares how one event mutates the read model: the
//! event it reacts to, the entity-mutation kind to perform, and a set
//! of attribute changes.
//!
//! # Fields
//!
//! | Field | Shape | Default |
//! |-------|-------|---------|
//! | `name` | symbol, required | — |
//! | `event` | symbol | the projection's own `name` |
//! | `action` | symbol, required | — |
//! | `changes` | map of target → source | — (or a computed function) |
//! | `projector_name` | symbol | derived from the owning entity |
//! | `autogenerate` | bool | `true` |
//!
//! # Change sources
//!
//! Each `changes` entry maps a target attribute to a tagged source:
//! `Tagged("const", literal)` for a constant, or a bare field symbol
//! read off the event instance. Alternatively the caller may supply an
//! opaque computed-changes function, which is treated as valid by
//! construction and cannot be statically checked.

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc
};

use serde::{Serialize, Serializer, ser::SerializeStruct};

use super::{
    raw::{DeclPath, RawBlock, RawValue},
    value::{Changeset, EventInstance, Symbol, Value}
};
use crate::error::SchemaError;

const KEYS: &[&str] = &[
    "name",
    "event",
    "action",
    "changes",
    "projector_name",
    "autogenerate",
];

/// The entity-mutation kind a projection performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionAction {
    /// Create a read-model record.
    Create,

    /// Update an existing record.
    Update,

    /// Remove a record.
    Destroy,

    /// Read-only touch (e.g. cache refresh).
    Read,

    /// A host-defined custom action; validated against the host
    /// entity's declared actions.
    Custom(Symbol)
}

impl ProjectionAction {
    fn from_symbol(symbol: &Symbol) -> Self {
        match symbol.as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "destroy" => Self::Destroy,
            "read" => Self::Read,
            _ => Self::Custom(symbol.clone())
        }
    }

    /// The action's declared symbol form.
    #[must_use]
    pub fn as_symbol(&self) -> Symbol {
        match self {
            Self::Create => Symbol::new("create"),
            Self::Update => Symbol::new("update"),
            Self::Destroy => Symbol::new("destroy"),
            Self::Read => Symbol::new("read"),
            Self::Custom(symbol) => symbol.clone()
        }
    }
}

/// One change source: where a target attribute's value comes from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// A constant literal, always valid.
    Const(Value),

    /// A field read off the triggering event instance; must be one of
    /// the referenced event's declared fields.
    FieldRef(Symbol)
}

/// An opaque caller-supplied changes function.
///
/// Treated as valid by construction: the validation pipeline cannot
/// inspect it, and synthesis invokes it wholesale.
#[derive(Clone)]
pub struct ComputedChanges(Arc<dyn Fn(&EventInstance) -> Changeset + Send + Sync>);

impl ComputedChanges {
    /// Wrap a changes function.
    pub fn new(f: impl Fn(&EventInstance) -> Changeset + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the function against one event instance.
    #[must_use]
    pub fn call(&self, event: &EventInstance) -> Changeset {
        (self.0)(event)
    }
}

impl Debug for ComputedChanges {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ComputedChanges(<fn>)")
    }
}

/// A projection's declared changes: a checked mapping or an opaque
/// computed function.
#[derive(Debug, Clone)]
pub enum Changes {
    /// Target attribute → change source, in declaration order.
    Mapped(Vec<(Symbol, ChangeSource)>),

    /// Opaque computed-changes function.
    Computed(ComputedChanges)
}

impl Changes {
    /// The mapped entries, when statically declared.
    #[must_use]
    pub fn mapped(&self) -> Option<&[(Symbol, ChangeSource)]> {
        match self {
            Self::Mapped(entries) => Some(entries),
            Self::Computed(_) => None
        }
    }
}

impl PartialEq for Changes {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mapped(a), Self::Mapped(b)) => a == b,
            // Opaque functions compare by identity.
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false
        }
    }
}

impl Serialize for Changes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapped(entries) => {
                let mut state = serializer.serialize_struct("Changes", 2)?;
                state.serialize_field("kind", "mapped")?;
                state.serialize_field("entries", entries)?;
                state.end()
            }
            Self::Computed(_) => {
                let mut state = serializer.serialize_struct("Changes", 1)?;
                state.serialize_field("kind", "computed")?;
                state.end()
            }
        }
    }
}

/// Raw input for one projection: its declaration block plus an optional
/// computed-changes function the loader cannot express as data.
#[derive(Debug, Clone)]
pub struct ProjectionSource {
    /// The declaration block.
    pub block: RawBlock,

    /// Caller-supplied computed changes, exclusive with a `changes`
    /// mapping in the block.
    pub computed: Option<ComputedChanges>
}

impl ProjectionSource {
    /// Projection source with declarative changes only.
    pub fn declared(block: RawBlock) -> Self {
        Self {
            block,
            computed: None
        }
    }

    /// Projection source with a computed-changes function.
    pub fn computed(block: RawBlock, changes: ComputedChanges) -> Self {
        Self {
            block,
            computed: Some(changes)
        }
    }
}

impl From<RawBlock> for ProjectionSource {
    fn from(block: RawBlock) -> Self {
        Self::declared(block)
    }
}

/// A parsed projection declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionDecl {
    /// Projection name. Doubles as the event reference when `event` is
    /// absent.
    pub name: Symbol,

    /// Referenced event name. `None` means the projection is keyed by
    /// event name directly.
    pub event: Option<Symbol>,

    /// The entity-mutation kind to perform.
    pub action: ProjectionAction,

    /// Declared attribute changes.
    pub changes: Changes,

    /// Override for the generated projector identifier.
    pub projector_name: Option<Symbol>,

    /// Whether a projector unit is synthesized.
    pub autogenerate: bool,

    /// Where the projection was declared.
    pub path: DeclPath
}

impl ProjectionDecl {
    /// Parse a projection from its raw source.
    pub fn from_source(source: &ProjectionSource) -> Result<Self, SchemaError> {
        let block = &source.block;
        let name = block.require_symbol(block.path(), "name")?;
        let path = block.path().item(name.clone());
        block.expect_keys(&path, KEYS)?;

        let action_symbol = block.require_symbol(&path, "action")?;
        let changes = parse_changes(block, &path, source.computed.as_ref())?;

        Ok(Self {
            event: block.optional_symbol(&path, "event")?,
            action: ProjectionAction::from_symbol(&action_symbol),
            changes,
            projector_name: block.optional_symbol(&path, "projector_name")?,
            autogenerate: block.bool_or(&path, "autogenerate", true)?,
            name,
            path
        })
    }

    /// The event this projection reacts to: explicit `event`, or the
    /// projection's own name.
    #[must_use]
    pub fn resolved_event(&self) -> &Symbol {
        self.event.as_ref().unwrap_or(&self.name)
    }
}

fn parse_changes(
    block: &RawBlock,
    path: &DeclPath,
    computed: Option<&ComputedChanges>
) -> Result<Changes, SchemaError> {
    let mapped = block.optional_map(path, "changes")?;

    match (mapped, computed) {
        (Some(_), Some(_)) => Err(SchemaError::Invalid {
            path: path.clone(),
            message: "`changes` declared as both a mapping and a computed function".to_owned()
        }),
        (None, Some(computed)) => Ok(Changes::Computed(computed.clone())),
        (None, None) => Err(SchemaError::MissingField {
            path: path.clone(),
            field: "changes"
        }),
        (Some(entries), None) => {
            let mut parsed = Vec::with_capacity(entries.len());
            for (target, source) in entries {
                parsed.push((Symbol::new(target.clone()), parse_source(path, source)?));
            }
            Ok(Changes::Mapped(parsed))
        }
    }
}

fn parse_source(path: &DeclPath, raw: &RawValue) -> Result<ChangeSource, SchemaError> {
    match raw {
        RawValue::Symbol(field) => Ok(ChangeSource::FieldRef(field.clone())),
        RawValue::Tagged(tag, value) if tag == "const" => match value.as_literal() {
            Some(literal) => Ok(ChangeSource::Const(literal)),
            None => Err(SchemaError::wrong_shape(path, "changes", "constant literal", value))
        },
        other => Err(SchemaError::wrong_shape(
            path,
            "changes",
            "`{const, literal}` or event field symbol",
            other
        ))
    }
}
