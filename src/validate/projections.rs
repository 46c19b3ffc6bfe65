// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projection checks (pipeline steps 7–9).

use super::join;
use crate::{
    error::{Check, ValidationError},
    metadata::EntityFacts,
    registry::NormalizedDocument,
    schema::{ChangeSource, Changes, ProjectionAction, Symbol}
};

/// Check 7: every projection's event resolves to a declared event.
pub(super) fn event_reference(doc: &NormalizedDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for projection in &doc.projections {
        let event = projection.resolved_event();
        if doc.event(event).is_none() {
            errors.push(
                ValidationError::new(
                    Check::ProjectionEventReference,
                    projection.path.clone(),
                    format!("projection references undeclared event `{event}`")
                )
                .offending(vec![event.clone()])
            );
        }
    }
    errors
}

/// Check 8: projection actions are the fixed mutation kinds or a
/// host-declared custom action.
///
/// Hard check: an unknown action symbol fails compilation rather than
/// warning, so an artifact never carries an undispatched action.
pub(super) fn action_validity(
    doc: &NormalizedDocument,
    facts: &EntityFacts
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for projection in &doc.projections {
        if let ProjectionAction::Custom(action) = &projection.action
            && !facts.has_action(action)
        {
            errors.push(
                ValidationError::new(
                    Check::ProjectionActionValidity,
                    projection.path.clone(),
                    format!(
                        "action `{action}` is neither a built-in mutation kind nor an action of {}",
                        doc.entity
                    )
                )
                .offending(vec![action.clone()])
            );
        }
    }
    errors
}

/// Check 9: change targets are attributes; field-reference sources are
/// fields of the referenced event.
///
/// `Const` sources are always valid. Computed changes are opaque and
/// valid by construction. Source validation is skipped when the event
/// reference itself is dangling — check 7 already reports that.
pub(super) fn changes_validity(
    doc: &NormalizedDocument,
    facts: &EntityFacts
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for projection in &doc.projections {
        let Changes::Mapped(entries) = &projection.changes else {
            continue;
        };

        let bad_targets: Vec<Symbol> = entries
            .iter()
            .map(|(target, _)| target)
            .filter(|target| !facts.has_attribute(target))
            .cloned()
            .collect();
        if !bad_targets.is_empty() {
            errors.push(
                ValidationError::new(
                    Check::ProjectionChangesValidity,
                    projection.path.clone(),
                    format!(
                        "change targets are not attributes of {}: {}",
                        doc.entity,
                        join(&bad_targets)
                    )
                )
                .offending(bad_targets)
            );
        }

        let Some(event) = doc.event(projection.resolved_event()) else {
            continue;
        };
        let bad_sources: Vec<Symbol> = entries
            .iter()
            .filter_map(|(_, source)| match source {
                ChangeSource::FieldRef(field) if !event.has_field(field) => Some(field.clone()),
                _ => None
            })
            .collect();
        if !bad_sources.is_empty() {
            errors.push(
                ValidationError::new(
                    Check::ProjectionChangesValidity,
                    projection.path.clone(),
                    format!(
                        "change sources are not fields of event `{}`: {}",
                        event.name,
                        join(&bad_sources)
                    )
                )
                .offending(bad_sources)
            );
        }
    }
    errors
}
