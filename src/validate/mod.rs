// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Semantic validation pipeline.
//!
//! Nine independent checks over a [`NormalizedDocument`] and the host
//! entity's metadata snapshot. Checks run in a fixed sequence for
//! deterministic error ordering, but no check depends on another's
//! outcome, and **all** failures are aggregated rather than stopping at
//! the first — one compile attempt surfaces every declaration error.
//!
//! | # | Check |
//! |---|-------|
//! | 1 | Command name uniqueness |
//! | 2 | Command field validity |
//! | 3 | Handler-name uniqueness (enabled handlers only) |
//! | 4 | Command/action shadow conflict |
//! | 5 | Event name uniqueness |
//! | 6 | Event field validity |
//! | 7 | Projection event-reference validity |
//! | 8 | Projection action validity |
//! | 9 | Projection changes validity |
//!
//! Synthesis never runs for an entity unless every check passes.

mod commands;
mod events;
mod projections;


use tracing::debug;

use crate::{
    error::ValidationError, metadata::EntityFacts, registry::NormalizedDocument,
    schema::Symbol
};

/// Run the full pipeline over one entity's document.
///
/// Returns `Ok(())` when all nine checks pass, or every collected
/// [`ValidationError`] otherwise.
pub fn run(doc: &NormalizedDocument, facts: &EntityFacts) -> Result<(), Vec<ValidationError>> {
    debug!(entity = %doc.entity, "running validation pipeline");

    let mut errors = Vec::new();
    errors.extend(commands::name_uniqueness(doc));
    errors.extend(commands::field_validity(doc, facts));
    errors.extend(commands::handler_uniqueness(doc));
    errors.extend(commands::action_shadow(doc, facts));
    errors.extend(events::name_uniqueness(doc));
    errors.extend(events::field_validity(doc, facts));
    errors.extend(projections::event_reference(doc));
    errors.extend(projections::action_validity(doc, facts));
    errors.extend(projections::changes_validity(doc, facts));

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(entity = %doc.entity, count = errors.len(), "validation failed");
        Err(errors)
    }
}

/// Duplicates within `names`, preserving first-occurrence order.
fn duplicates<'a, I>(names: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = &'a Symbol>
{
    let mut seen = Vec::new();
    let mut dupes = Vec::new();
    for name in names {
        if seen.contains(&name) {
            if !dupes.contains(name) {
                dupes.push(name.clone());
            }
        } else {
            seen.push(name);
        }
    }
    dupes
}

/// Comma-joined symbol list for messages.
fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
