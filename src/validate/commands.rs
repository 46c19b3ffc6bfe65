// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command checks (pipeline steps 1–4).

use super::{duplicates, join};
use crate::{
    error::{Check, ValidationError},
    metadata::EntityFacts,
    registry::NormalizedDocument,
    schema::Symbol
};

/// Check 1: no two commands share a name.
pub(super) fn name_uniqueness(doc: &NormalizedDocument) -> Vec<ValidationError> {
    let dupes = duplicates(doc.commands.iter().map(|cmd| &cmd.name));
    dupes
        .into_iter()
        .map(|name| {
            let path = doc
                .commands
                .iter()
                .find(|cmd| cmd.name == name)
                .map(|cmd| cmd.path.clone())
                .unwrap_or_else(|| {
                    crate::schema::DeclPath::new(
                        doc.entity.clone(),
                        crate::schema::Section::Commands
                    )
                });
            ValidationError::new(
                Check::CommandNameUniqueness,
                path,
                format!("duplicate command name `{name}`")
            )
            .offending(vec![name])
        })
        .collect()
}

/// Check 2: every command field is a host-entity attribute.
pub(super) fn field_validity(
    doc: &NormalizedDocument,
    facts: &EntityFacts
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for cmd in &doc.commands {
        let unknown: Vec<Symbol> = cmd
            .fields
            .iter()
            .filter(|field| !facts.has_attribute(field))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            errors.push(
                ValidationError::new(
                    Check::CommandFieldValidity,
                    cmd.path.clone(),
                    format!(
                        "command fields are not attributes of {}: {}",
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

/// Check 3: enabled handlers resolve to unique identifiers.
///
/// Only commands with `autogenerate_handler` participate; disabled
/// commands produce no handler clause and cannot collide.
pub(super) fn handler_uniqueness(doc: &NormalizedDocument) -> Vec<ValidationError> {
    let enabled: Vec<_> = doc
        .commands
        .iter()
        .filter(|cmd| cmd.autogenerate_handler)
        .collect();

    let idents: Vec<Symbol> = enabled.iter().map(|cmd| cmd.handler_ident()).collect();
    let dupes = duplicates(idents.iter());

    dupes
        .into_iter()
        .map(|ident| {
            let commands: Vec<Symbol> = enabled
                .iter()
                .filter(|cmd| cmd.handler_ident() == ident)
                .map(|cmd| cmd.name.clone())
                .collect();
            let path = enabled
                .iter()
                .rev()
                .find(|cmd| cmd.handler_ident() == ident)
                .map(|cmd| cmd.path.clone())
                .unwrap_or_else(|| {
                    crate::schema::DeclPath::new(
                        doc.entity.clone(),
                        crate::schema::Section::Commands
                    )
                });
            ValidationError::new(
                Check::HandlerNameUniqueness,
                path,
                format!(
                    "handler identifier `{ident}` resolved by multiple commands: {}",
                    join(&commands)
                )
            )
            .offending(commands)
        })
        .collect()
}

/// Check 4: a command shadowing a host action must target that action.
///
/// A command whose name collides with an existing entity action and
/// whose explicit `action` points elsewhere is an ambiguous shadow.
pub(super) fn action_shadow(
    doc: &NormalizedDocument,
    facts: &EntityFacts
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for cmd in &doc.commands {
        if !facts.has_action(&cmd.name) {
            continue;
        }
        if let Some(action) = &cmd.action
            && *action != cmd.name
        {
            errors.push(
                ValidationError::new(
                    Check::ActionShadowConflict,
                    cmd.path.clone(),
                    format!(
                        "command `{}` shadows entity action `{}` but declares action `{}`",
                        cmd.name, cmd.name, action
                    )
                )
                .offending(vec![cmd.name.clone(), action.clone()])
            );
        }
    }
    errors
}
