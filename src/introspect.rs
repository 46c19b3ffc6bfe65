// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read-only queries over a normalized document.
//!
//! Tooling support: listings, field lookups, and a serializable
//! [`DocumentSummary`]. Everything here reads the document as-is and
//! never mutates or re-validates it.

use serde::Serialize;

use crate::{
    registry::NormalizedDocument,
    schema::{ProjectionDecl, Symbol}
};

/// Declared command names, in declaration order.
#[must_use]
pub fn command_names(doc: &NormalizedDocument) -> Vec<&Symbol> {
    doc.commands.iter().map(|cmd| &cmd.name).collect()
}

/// Declared event names, in declaration order.
#[must_use]
pub fn event_names(doc: &NormalizedDocument) -> Vec<&Symbol> {
    doc.events.iter().map(|event| &event.name).collect()
}

/// Declared projection names, in declaration order.
#[must_use]
pub fn projection_names(doc: &NormalizedDocument) -> Vec<&Symbol> {
    doc.projections.iter().map(|projection| &projection.name).collect()
}

/// The fields a declared command carries, if the command exists.
#[must_use]
pub fn command_fields<'a>(doc: &'a NormalizedDocument, name: &Symbol) -> Option<&'a [Symbol]> {
    doc.commands
        .iter()
        .find(|cmd| cmd.name == *name)
        .map(|cmd| cmd.fields.as_slice())
}

/// The fields a declared event carries, if the event exists.
#[must_use]
pub fn event_fields<'a>(doc: &'a NormalizedDocument, name: &Symbol) -> Option<&'a [Symbol]> {
    doc.event(name).map(|event| event.fields.as_slice())
}

/// Every projection reacting to `event`, in declaration order.
#[must_use]
pub fn projections_for_event<'a>(
    doc: &'a NormalizedDocument,
    event: &Symbol
) -> Vec<&'a ProjectionDecl> {
    doc.projections
        .iter()
        .filter(|projection| projection.resolved_event() == event)
        .collect()
}

/// One row of the summary: a declared item and its field count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationSummary {
    /// Declared name.
    pub name: Symbol,

    /// Number of declared fields.
    pub fields: usize
}

/// Serializable overview of one entity's declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// The owning entity, dotted form.
    pub entity: String,

    /// Command declarations.
    pub commands: Vec<DeclarationSummary>,

    /// Event declarations.
    pub events: Vec<DeclarationSummary>,

    /// Projection name → resolved event pairs.
    pub projections: Vec<(Symbol, Symbol)>
}

impl DocumentSummary {
    /// Summarize a normalized document.
    #[must_use]
    pub fn of(doc: &NormalizedDocument) -> Self {
        Self {
            entity: doc.entity.to_string(),
            commands: doc
                .commands
                .iter()
                .map(|cmd| DeclarationSummary {
                    name: cmd.name.clone(),
                    fields: cmd.fields.len()
                })
                .collect(),
            events: doc
                .events
                .iter()
                .map(|event| DeclarationSummary {
                    name: event.name.clone(),
                    fields: event.fields.len()
                })
                .collect(),
            projections: doc
                .projections
                .iter()
                .map(|projection| (projection.name.clone(), projection.resolved_event().clone()))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registry::{EntitySource, normalize},
        schema::{DeclPath, QualifiedName, RawBlock, RawValue, Section, Value}
    };

    fn doc() -> NormalizedDocument {
        let entity = QualifiedName::parse("Billing.Customer");
        let mut source = EntitySource::new(entity.clone());
        source.commands.push(
            RawBlock::new(DeclPath::new(entity.clone(), Section::Commands))
                .entry("name", RawValue::symbol("register_customer"))
                .entry("fields", RawValue::symbols(["id", "email"]))
                .entry("identity_field", RawValue::symbol("id"))
        );
        source.events.push(
            RawBlock::new(DeclPath::new(entity.clone(), Section::Events))
                .entry("name", RawValue::symbol("customer_registered"))
                .entry("fields", RawValue::symbols(["id", "email"]))
        );
        source.projections.push(
            RawBlock::new(DeclPath::new(entity, Section::Projections))
                .entry("name", RawValue::symbol("on_registered"))
                .entry("event", RawValue::symbol("customer_registered"))
                .entry("action", RawValue::symbol("create"))
                .entry(
                    "changes",
                    RawValue::Map(vec![(
                        "status".to_owned(),
                        RawValue::constant(Value::Str("pending".to_owned()))
                    )])
                )
                .into()
        );
        normalize(&source).unwrap()
    }

    #[test]
    fn listings_follow_declaration_order() {
        let doc = doc();
        assert_eq!(command_names(&doc), vec![&Symbol::new("register_customer")]);
        assert_eq!(event_names(&doc), vec![&Symbol::new("customer_registered")]);
        assert_eq!(projection_names(&doc), vec![&Symbol::new("on_registered")]);
    }

    #[test]
    fn field_lookups() {
        let doc = doc();
        assert_eq!(
            command_fields(&doc, &Symbol::new("register_customer")),
            Some(&[Symbol::new("id"), Symbol::new("email")][..])
        );
        assert_eq!(command_fields(&doc, &Symbol::new("ghost")), None);
        assert_eq!(
            event_fields(&doc, &Symbol::new("customer_registered")).map(<[Symbol]>::len),
            Some(2)
        );
    }

    #[test]
    fn projections_indexed_by_resolved_event() {
        let doc = doc();
        let found = projections_for_event(&doc, &Symbol::new("customer_registered"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, Symbol::new("on_registered"));
        assert!(projections_for_event(&doc, &Symbol::new("ghost")).is_empty());
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = DocumentSummary::of(&doc());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["entity"], "Billing.Customer");
        assert_eq!(json["commands"][0]["name"], "register_customer");
        assert_eq!(json["commands"][0]["fields"], 2);
        assert_eq!(json["projections"][0][1], "customer_registered");
    }
}
