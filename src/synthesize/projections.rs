// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projection transform generation (step 3).
//!
//! Per projection, a pure `apply(event) -> changeset` description:
//! constants evaluate to themselves, field references read off the
//! event instance, computed functions are invoked wholesale. Paired
//! with the declared mutation action.

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    error::SynthesisError,
    registry::NormalizedDocument,
    schema::{
        ChangeSource, Changes, Changeset, ComputedChanges, EventInstance, ProjectionAction,
        QualifiedName, Symbol, Value
    }
};

use super::SynthesizeError;

/// A projection's changes with every entry resolved to an evaluation
/// strategy.
#[derive(Debug, Clone)]
pub enum ResolvedChanges {
    /// Statically declared target/source pairs.
    Mapped(Vec<(Symbol, ChangeSource)>),

    /// Opaque caller-supplied function.
    Computed(ComputedChanges)
}

impl ResolvedChanges {
    /// Evaluate against one event instance.
    #[must_use]
    pub fn evaluate(&self, event: &EventInstance) -> Changeset {
        match self {
            Self::Mapped(entries) => {
                let mut changes = Changeset::new();
                for (target, source) in entries {
                    changes.set(target.clone(), resolve_source(source, event));
                }
                changes
            }
            Self::Computed(f) => f.call(event)
        }
    }
}

impl PartialEq for ResolvedChanges {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mapped(a), Self::Mapped(b)) => a == b,
            _ => false
        }
    }
}

impl Serialize for ResolvedChanges {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapped(entries) => {
                let mut state = serializer.serialize_struct("ResolvedChanges", 2)?;
                state.serialize_field("kind", "mapped")?;
                state.serialize_field("entries", entries)?;
                state.end()
            }
            Self::Computed(_) => {
                let mut state = serializer.serialize_struct("ResolvedChanges", 1)?;
                state.serialize_field("kind", "computed")?;
                state.end()
            }
        }
    }
}

fn resolve_source(source: &ChangeSource, event: &EventInstance) -> Value {
    match source {
        ChangeSource::Const(value) => value.clone(),
        ChangeSource::FieldRef(field) => event.get(field).cloned().unwrap_or(Value::Null)
    }
}

/// Description of one generated projection transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionTransform {
    /// The declared projection symbol.
    pub projection: Symbol,

    /// The event the transform reacts to.
    pub event: Symbol,

    /// The mutation action paired with the changeset.
    pub action: ProjectionAction,

    /// The resolved changes.
    pub changes: ResolvedChanges,

    /// The owning entity.
    pub entity: QualifiedName
}

impl ProjectionTransform {
    /// Apply the transform to one event instance.
    #[must_use]
    pub fn apply(&self, event: &EventInstance) -> Changeset {
        self.changes.evaluate(event)
    }
}

/// Generate one transform per declared projection.
///
/// Validation guarantees every event reference resolves; a dangling
/// reference here is a coverage gap, not a user error.
pub(super) fn generate(
    doc: &NormalizedDocument
) -> Result<Vec<ProjectionTransform>, SynthesizeError> {
    let mut transforms = Vec::with_capacity(doc.projections.len());

    for projection in &doc.projections {
        let event = projection.resolved_event();
        if doc.event(event).is_none() {
            return Err(SynthesisError {
                path: projection.path.clone(),
                message: format!("projection event `{event}` missing after validation")
            }
            .into());
        }

        let changes = match &projection.changes {
            Changes::Mapped(entries) => ResolvedChanges::Mapped(entries.clone()),
            Changes::Computed(f) => ResolvedChanges::Computed(f.clone())
        };

        transforms.push(ProjectionTransform {
            projection: projection.name.clone(),
            event: event.clone(),
            action: projection.action.clone(),
            changes,
            entity: doc.entity.clone()
        });
    }

    Ok(transforms)
}
