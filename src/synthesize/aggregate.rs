// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Aggregate generation (step 4).
//!
//! Per entity, a state machine `apply(state, event) -> state'` with one
//! transition per declared event. A transition copies the event's
//! declared fields onto the state, then applies any projection
//! changesets registered for that event. Events without a transition
//! are a no-op — replaying a stream with unknown events never errors.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    naming::{self, CanonicalName},
    registry::NormalizedDocument,
    schema::{EventInstance, QualifiedName, Symbol, Value}
};

use super::projections::{ProjectionTransform, ResolvedChanges};

/// The replayed state of one aggregate instance: attribute → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateState {
    attributes: BTreeMap<Symbol, Value>
}

impl AggregateState {
    /// Empty state, the replay starting point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute.
    #[must_use]
    pub fn get(&self, attribute: &Symbol) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Set an attribute.
    pub fn set(&mut self, attribute: Symbol, value: Value) {
        self.attributes.insert(attribute, value);
    }

    /// Iterate attributes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Value)> {
        self.attributes.iter()
    }
}

/// One state transition: what a declared event does to the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    /// The declared event the transition fires on.
    pub event: Symbol,

    /// The event's declared fields, copied onto the state.
    pub fields: Vec<Symbol>,

    /// Projection changesets applied after the field copy, in
    /// projection declaration order.
    pub changes: Vec<ResolvedChanges>
}

/// Description of one entity's event-sourced state machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateDef {
    /// The owning entity.
    pub entity: QualifiedName,

    /// Canonical aggregate name, e.g. `Billing.CustomerAggregate`.
    pub name: CanonicalName,

    /// One transition per declared event, in declaration order.
    pub transitions: Vec<Transition>
}

impl AggregateDef {
    /// Apply one event occurrence to the prior state.
    ///
    /// Unmatched events return the state unchanged.
    #[must_use]
    pub fn apply(
        &self,
        mut state: AggregateState,
        event: &Symbol,
        instance: &EventInstance
    ) -> AggregateState {
        let Some(transition) = self.transitions.iter().find(|t| t.event == *event) else {
            return state;
        };

        for field in &transition.fields {
            if let Some(value) = instance.get(field) {
                state.set(field.clone(), value.clone());
            }
        }
        for changes in &transition.changes {
            for (target, value) in changes.evaluate(instance).iter() {
                state.set(target.clone(), value.clone());
            }
        }
        state
    }

    /// Replay a whole stream of event occurrences from empty state.
    #[must_use]
    pub fn replay<'a, I>(&self, stream: I) -> AggregateState
    where
        I: IntoIterator<Item = (&'a Symbol, &'a EventInstance)>
    {
        stream
            .into_iter()
            .fold(AggregateState::new(), |state, (event, instance)| {
                self.apply(state, event, instance)
            })
    }
}

/// Generate the aggregate for one entity.
pub(super) fn generate(
    doc: &NormalizedDocument,
    transforms: &[ProjectionTransform]
) -> AggregateDef {
    let transitions = doc
        .events
        .iter()
        .map(|event| Transition {
            event: event.name.clone(),
            fields: event.fields.clone(),
            changes: transforms
                .iter()
                .filter(|t| t.event == event.name)
                .map(|t| t.changes.clone())
                .collect()
        })
        .collect();

    let namespace = doc
        .entity
        .parent()
        .unwrap_or_else(|| QualifiedName::new(Vec::new()));
    let ident = format!(
        "{}Aggregate",
        naming::type_ident(&Symbol::new(doc.entity.last()))
    );

    AggregateDef {
        entity: doc.entity.clone(),
        name: CanonicalName::new(namespace, ident),
        transitions
    }
}
