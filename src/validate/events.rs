// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Event checks (pipeline steps 5–6).

use super::{duplicates, join};
use crate::{
    error::{Check, ValidationError},
    metadata::EntityFacts,
    registry::NormalizedDocument,
    schema::Symbol
};

/// Check 5: no two events share a name.
pub(super) fn name_uniqueness(doc: &NormalizedDocument) -> Vec<ValidationError> {
    let dupes = duplicates(doc.events.iter().map(|event| &event.name));
    dupes
        .into_iter()
        .map(|name| {
            let path = doc
                .events
                .iter()
                .find(|event| event.name == name)
                .map(|event| event.path.clone())
                .unwrap_or_else(|| {
                    crate::schema::DeclPath::new(doc.entity.clone(), crate::schema::Section::Events)
                });
            ValidationError::new(
                Check::EventNameUniqueness,
                path,
                format!("duplicate event name `{name}`")
            )
            .offending(vec![name])
        })
        .collect()
}

/// Check 6: every event field is a host-entity attribute.
pub(super) fn field_validity(
    doc: &NormalizedDocument,
    facts: &EntityFacts
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for event in &doc.events {
        let unknown: Vec<Symbol> = event
            .fields
            .iter()
            .filter(|field| !facts.has_attribute(field))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            errors.push(
                ValidationError::new(
                    Check::EventFieldValidity,
                    event.path.clone(),
                    format!(
                        "event fields are not attributes of {}: {}",
                        doc.entity,
                        join(&unknown)
                    )
                )
                .offending(unknown)
            );
        }
    }
    errors
}
