// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command record generation (step 1).
//!
//! One typed record description per declared command: fields, identity
//! field, target action, and the handler identifier when dispatch is
//! enabled. No behavior.

use serde::Serialize;

use crate::{
    naming::{self, CanonicalName, NameKind, NameResolver, Scope},
    registry::NormalizedDocument,
    schema::{DeclPath, QualifiedName, Symbol}
};

use super::SynthesizeError;

/// Description of one generated command type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRecord {
    /// Canonical type name, e.g. `Billing.Commands.RegisterCustomer`.
    pub name: CanonicalName,

    /// The declared command symbol.
    pub command: Symbol,

    /// The owning entity.
    pub entity: QualifiedName,

    /// Record fields, in declaration order.
    pub fields: Vec<Symbol>,

    /// The field locating the targeted entity instance.
    pub identity_field: Symbol,

    /// The host-entity operation the command invokes.
    pub action: Symbol,

    /// Handler identifier, present only when a dispatch-handler clause
    /// is synthesized.
    pub handler: Option<Symbol>,

    /// Declaration site, for conflict reporting downstream.
    pub path: DeclPath
}

/// Generate one record per declared command.
pub(super) fn generate(
    doc: &NormalizedDocument,
    resolver: &NameResolver
) -> Result<Vec<CommandRecord>, SynthesizeError> {
    let scope = Scope::Entity(doc.entity.clone());
    let mut records = Vec::with_capacity(doc.commands.len());

    for cmd in &doc.commands {
        let canonical = naming::canonical(
            &cmd.name,
            cmd.command_name.as_ref(),
            &doc.namespaces.commands
        );
        let name = resolver.resolve(&scope, NameKind::Command, &cmd.name, canonical, &cmd.path)?;

        records.push(CommandRecord {
            name,
            command: cmd.name.clone(),
            entity: doc.entity.clone(),
            fields: cmd.fields.clone(),
            identity_field: cmd.identity_field.clone(),
            action: cmd.resolved_action().clone(),
            handler: cmd.autogenerate_handler.then(|| cmd.handler_ident()),
            path: cmd.path.clone()
        });
    }

    Ok(records)
}
