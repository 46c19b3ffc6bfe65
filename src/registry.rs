// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity registry: declarations into one normalized document.
//!
//! Collects all parsed Command/Event/Projection declarations attached
//! to one owning entity, resolves namespace settings, and produces the
//! immutable [`NormalizedDocument`] every later phase reads. Pure
//! transformation over already-parsed data; no I/O.
//!
//! # Namespace precedence
//!
//! Per-declaration override (`command_name`, `event_name`,
//! `projector_name`) > per-entity `*_namespace` override > sibling-group
//! convention derived from the owning entity's own qualified name
//! (`Billing.Invoice` defaults commands to `Billing.Commands`).

use serde::Serialize;
use tracing::debug;

use crate::{
    error::SchemaError,
    schema::{
        CommandDecl, EventDecl, ProjectionDecl, ProjectionSource, QualifiedName, RawBlock
    }
};

/// Per-entity namespace overrides, all optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceOverrides {
    /// Override for generated command types.
    pub commands: Option<QualifiedName>,

    /// Override for generated event types.
    pub events: Option<QualifiedName>,

    /// Override for generated projector units.
    pub projections: Option<QualifiedName>
}

/// Resolved namespaces for one entity's generated artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Namespaces {
    /// Namespace for command types.
    pub commands: QualifiedName,

    /// Namespace for event types.
    pub events: QualifiedName,

    /// Namespace for projector units.
    pub projections: QualifiedName
}

/// Resolve one namespace: explicit override, or the sibling-group
/// convention derived from the owning entity's qualified name.
#[must_use]
pub fn resolve_namespace(
    owner: &QualifiedName,
    group: &str,
    override_ns: Option<&QualifiedName>
) -> QualifiedName {
    match override_ns {
        Some(ns) => ns.clone(),
        None => owner.sibling(group)
    }
}

/// Raw input for one owning entity: its declarations and overrides.
#[derive(Debug, Clone)]
pub struct EntitySource {
    /// The owning entity's fully qualified name.
    pub entity: QualifiedName,

    /// Namespace overrides declared on the entity.
    pub namespaces: NamespaceOverrides,

    /// Raw command declaration blocks, in declaration order.
    pub commands: Vec<RawBlock>,

    /// Raw event declaration blocks, in declaration order.
    pub events: Vec<RawBlock>,

    /// Raw projection sources, in declaration order.
    pub projections: Vec<ProjectionSource>
}

impl EntitySource {
    /// Source with no declarations.
    pub fn new(entity: QualifiedName) -> Self {
        Self {
            entity,
            namespaces: NamespaceOverrides::default(),
            commands: Vec::new(),
            events: Vec::new(),
            projections: Vec::new()
        }
    }
}

/// The validated-input side of one entity's compilation: every parsed
/// declaration plus resolved namespace settings.
///
/// Constructed once per compilation of an owning entity, immutable
/// thereafter, and only read by validators and generators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDocument {
    /// The owning entity.
    pub entity: QualifiedName,

    /// Resolved artifact namespaces.
    pub namespaces: Namespaces,

    /// Parsed commands, in declaration order.
    pub commands: Vec<CommandDecl>,

    /// Parsed events, in declaration order.
    pub events: Vec<EventDecl>,

    /// Parsed projections, in declaration order.
    pub projections: Vec<ProjectionDecl>
}

impl NormalizedDocument {
    /// Look up a declared event by name.
    #[must_use]
    pub fn event(&self, name: &crate::schema::Symbol) -> Option<&EventDecl> {
        self.events.iter().find(|event| event.name == *name)
    }
}

/// Normalize one entity's raw declarations.
///
/// The first [`SchemaError`] halts compilation of this entity; sibling
/// entities are unaffected.
pub fn normalize(source: &EntitySource) -> Result<NormalizedDocument, SchemaError> {
    debug!(entity = %source.entity, "normalizing entity declarations");

    let commands = source
        .commands
        .iter()
        .map(CommandDecl::from_block)
        .collect::<Result<Vec<_>, _>>()?;
    let events = source
        .events
        .iter()
        .map(EventDecl::from_block)
        .collect::<Result<Vec<_>, _>>()?;
    let projections = source
        .projections
        .iter()
        .map(ProjectionDecl::from_source)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NormalizedDocument {
        namespaces: Namespaces {
            commands: resolve_namespace(&source.entity, "Commands", source.namespaces.commands.as_ref()),
            events: resolve_namespace(&source.entity, "Events", source.namespaces.events.as_ref()),
            projections: resolve_namespace(
                &source.entity,
                "Projections",
                source.namespaces.projections.as_ref()
            )
        },
        entity: source.entity.clone(),
        commands,
        events,
        projections
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DeclPath, RawValue, Section, Symbol};

    fn source() -> EntitySource {
        let entity = QualifiedName::parse("Billing.Customer");
        let mut source = EntitySource::new(entity.clone());
        source.commands.push(
            RawBlock::new(DeclPath::new(entity.clone(), Section::Commands))
                .entry("name", RawValue::symbol("register_customer"))
                .entry("fields", RawValue::symbols(["id", "email"]))
                .entry("identity_field", RawValue::symbol("id"))
        );
        source.events.push(
            RawBlock::new(DeclPath::new(entity, Section::Events))
                .entry("name", RawValue::symbol("customer_registered"))
                .entry("fields", RawValue::symbols(["id", "email"]))
        );
        source
    }

    #[test]
    fn normalize_resolves_sibling_namespaces() {
        let doc = normalize(&source()).unwrap();
        assert_eq!(doc.namespaces.commands.to_string(), "Billing.Commands");
        assert_eq!(doc.namespaces.events.to_string(), "Billing.Events");
        assert_eq!(doc.namespaces.projections.to_string(), "Billing.Projections");
    }

    #[test]
    fn normalize_honors_namespace_overrides() {
        let mut src = source();
        src.namespaces.commands = Some(QualifiedName::parse("Billing.Intake.Commands"));
        let doc = normalize(&src).unwrap();
        assert_eq!(doc.namespaces.commands.to_string(), "Billing.Intake.Commands");
        assert_eq!(doc.namespaces.events.to_string(), "Billing.Events");
    }

    #[test]
    fn normalize_preserves_declaration_order() {
        let mut src = source();
        src.commands.push(
            RawBlock::new(DeclPath::new(src.entity.clone(), Section::Commands))
                .entry("name", RawValue::symbol("archive_customer"))
                .entry("fields", RawValue::symbols(["id"]))
                .entry("identity_field", RawValue::symbol("id"))
        );
        let doc = normalize(&src).unwrap();
        assert_eq!(doc.commands[0].name, Symbol::new("register_customer"));
        assert_eq!(doc.commands[1].name, Symbol::new("archive_customer"));
    }

    #[test]
    fn normalize_halts_on_first_schema_error() {
        let mut src = source();
        src.commands.push(RawBlock::new(DeclPath::new(src.entity.clone(), Section::Commands)));
        assert!(normalize(&src).is_err());
    }

    #[test]
    fn event_lookup() {
        let doc = normalize(&source()).unwrap();
        assert!(doc.event(&Symbol::new("customer_registered")).is_some());
        assert!(doc.event(&Symbol::new("ghost")).is_none());
    }
}
