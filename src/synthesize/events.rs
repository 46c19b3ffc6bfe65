// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Event record generation (step 2).
//!
//! One typed record description per declared event. No behavior.

use serde::Serialize;

use crate::{
    naming::{self, CanonicalName, NameKind, NameResolver, Scope},
    registry::NormalizedDocument,
    schema::{DeclPath, QualifiedName, Symbol}
};

use super::SynthesizeError;

/// Description of one generated event type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Canonical type name, e.g. `Billing.Events.CustomerRegistered`.
    pub name: CanonicalName,

    /// The declared event symbol.
    pub event: Symbol,

    /// The owning entity.
    pub entity: QualifiedName,

    /// Record fields, in declaration order.
    pub fields: Vec<Symbol>,

    /// Declaration site.
    pub path: DeclPath
}

/// Generate one record per declared event.
pub(super) fn generate(
    doc: &NormalizedDocument,
    resolver: &NameResolver
) -> Result<Vec<EventRecord>, SynthesizeError> {
    let scope = Scope::Entity(doc.entity.clone());
    let mut records = Vec::with_capacity(doc.events.len());

    for event in &doc.events {
        let canonical = naming::canonical(
            &event.name,
            event.event_name.as_ref(),
            &doc.namespaces.events
        );
        let name = resolver.resolve(&scope, NameKind::Event, &event.name, canonical, &event.path)?;

        records.push(EventRecord {
            name,
            event: event.name.clone(),
            entity: doc.entity.clone(),
            fields: event.fields.clone(),
            path: event.path.clone()
        });
    }

    Ok(records)
}
