// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Host entity metadata boundary.
//!
//! The underlying data-entity framework owns attribute and action
//! metadata; this compiler only consults it. [`EntityMetadata`] is that
//! read-only seam, queried once per compilation per entity into an
//! [`EntityFacts`] snapshot before validation runs.
//!
//! [`StaticMetadata`] is a builder-style in-memory implementation for
//! tests and standalone use.

use std::collections::{BTreeSet, HashMap};

use crate::schema::{QualifiedName, Symbol};

/// Read-only metadata about host entities.
pub trait EntityMetadata {
    /// Attribute names declared on `entity`.
    fn attributes(&self, entity: &QualifiedName) -> BTreeSet<Symbol>;

    /// Action names declared on `entity`.
    fn actions(&self, entity: &QualifiedName) -> BTreeSet<Symbol>;
}

/// Snapshot of one entity's metadata, taken once per compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFacts {
    /// The entity's attribute names.
    pub attributes: BTreeSet<Symbol>,

    /// The entity's action names.
    pub actions: BTreeSet<Symbol>
}

impl EntityFacts {
    /// Query `metadata` for `entity` and freeze the answer.
    pub fn snapshot(metadata: &dyn EntityMetadata, entity: &QualifiedName) -> Self {
        Self {
            attributes: metadata.attributes(entity),
            actions: metadata.actions(entity)
        }
    }

    /// Whether `attribute` exists on the entity.
    #[must_use]
    pub fn has_attribute(&self, attribute: &Symbol) -> bool {
        self.attributes.contains(attribute)
    }

    /// Whether `action` exists on the entity.
    #[must_use]
    pub fn has_action(&self, action: &Symbol) -> bool {
        self.actions.contains(action)
    }
}

/// In-memory [`EntityMetadata`] for tests and standalone compilation.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    entities: HashMap<QualifiedName, EntityFacts>
}

impl StaticMetadata {
    /// Empty metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with its attributes and actions.
    #[must_use]
    pub fn entity<A, B>(mut self, name: &str, attributes: A, actions: B) -> Self
    where
        A: IntoIterator<Item = &'static str>,
        B: IntoIterator<Item = &'static str>
    {
        self.entities.insert(
            QualifiedName::parse(name),
            EntityFacts {
                attributes: attributes.into_iter().map(Symbol::new).collect(),
                actions: actions.into_iter().map(Symbol::new).collect()
            }
        );
        self
    }
}

impl EntityMetadata for StaticMetadata {
    fn attributes(&self, entity: &QualifiedName) -> BTreeSet<Symbol> {
        self.entities
            .get(entity)
            .map(|facts| facts.attributes.clone())
            .unwrap_or_default()
    }

    fn actions(&self, entity: &QualifiedName) -> BTreeSet<Symbol> {
        self.entities
            .get(entity)
            .map(|facts| facts.actions.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_freezes_metadata() {
        let metadata = StaticMetadata::new().entity(
            "Billing.Customer",
            ["id", "email"],
            ["register_customer"]
        );
        let facts = EntityFacts::snapshot(&metadata, &QualifiedName::parse("Billing.Customer"));
        assert!(facts.has_attribute(&Symbol::new("email")));
        assert!(facts.has_action(&Symbol::new("register_customer")));
        assert!(!facts.has_attribute(&Symbol::new("ghost")));
    }

    #[test]
    fn unknown_entity_has_empty_facts() {
        let metadata = StaticMetadata::new();
        let facts = EntityFacts::snapshot(&metadata, &QualifiedName::parse("Nope"));
        assert!(facts.attributes.is_empty());
        assert!(facts.actions.is_empty());
    }
}
