// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dispatch router generation (steps 6 and 7).
//!
//! A domain router is a dispatch table from command type to handler
//! invocation, one entry per command with an enabled handler. The
//! global router merges every domain router into one dispatch surface;
//! it is a join point and only runs once every domain router exists.

use serde::Serialize;

use crate::{
    naming::{CanonicalName, NameKind, NameResolver, Scope},
    schema::{DeclPath, QualifiedName, Symbol}
};

use super::{EntityArtifacts, SynthesizeError};

/// One dispatch table entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    /// The command type being dispatched.
    pub command: CanonicalName,

    /// The entity the command targets.
    pub entity: QualifiedName,

    /// The handler identifier to invoke.
    pub handler: Symbol,

    /// The host-entity operation behind the handler.
    pub action: Symbol,

    /// The field locating the targeted instance.
    pub identity_field: Symbol,

    /// The command's declaration site.
    pub path: DeclPath
}

/// Dispatch table for one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRouter {
    /// The owning domain.
    pub domain: QualifiedName,

    /// Canonical router name, e.g. `Billing.Router`.
    pub name: CanonicalName,

    /// Dispatch entries, ordered by entity then command declaration.
    pub entries: Vec<RouteEntry>
}

/// The merged, unit-wide dispatch surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalRouter {
    /// The merged routers, in domain order.
    pub routers: Vec<CanonicalName>,

    /// All dispatch entries, in domain order.
    pub entries: Vec<RouteEntry>
}

/// Build one domain's dispatch table (step 6).
pub(super) fn domain(
    domain: &QualifiedName,
    entities: &[EntityArtifacts],
    resolver: &NameResolver
) -> Result<DomainRouter, SynthesizeError> {
    let name = resolver.resolve(
        &Scope::Domain(domain.clone()),
        NameKind::Router,
        &Symbol::new("router"),
        CanonicalName::new(domain.clone(), "Router"),
        &DeclPath::new(domain.clone(), crate::schema::Section::Application)
    )?;

    let entries = entities
        .iter()
        .flat_map(|artifacts| artifacts.commands.iter())
        .filter_map(|record| {
            record.handler.clone().map(|handler| RouteEntry {
                command: record.name.clone(),
                entity: record.entity.clone(),
                handler,
                action: record.action.clone(),
                identity_field: record.identity_field.clone(),
                path: record.path.clone()
            })
        })
        .collect();

    Ok(DomainRouter {
        domain: domain.clone(),
        name,
        entries
    })
}

/// Merge all domain routers (step 7).
///
/// A command type reachable from two domains would make dispatch
/// ambiguous, so every entry re-registers its canonical name at unit
/// scope.
pub(super) fn global(
    routers: &[DomainRouter],
    resolver: &NameResolver
) -> Result<GlobalRouter, SynthesizeError> {
    let mut entries = Vec::new();
    for router in routers {
        for entry in &router.entries {
            resolver.resolve(
                &Scope::Unit,
                NameKind::Command,
                &Symbol::new(entry.command.to_string()),
                entry.command.clone(),
                &entry.path
            )?;
            entries.push(entry.clone());
        }
    }

    Ok(GlobalRouter {
        routers: routers.iter().map(|r| r.name.clone()).collect(),
        entries
    })
}
