// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process descriptor generation (step 8).
//!
//! One per domain with an `application` block, built only once the
//! whole unit finished routing: the descriptor wires the merged
//! dispatch surface from step 7 and the domain's projector units into
//! a process-level description. The `include_supervisor` toggle
//! decides whether a supervised-process entry point is emitted at all.

use convert_case::{Case, Casing};
use serde::Serialize;

use crate::{
    naming::{self, CanonicalName, NameKind, NameResolver, Scope},
    schema::{ApplicationDecl, QualifiedName, Symbol}
};

use super::{EntityArtifacts, GlobalRouter, SynthesizeError};

/// Description of one domain's process descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessDescriptor {
    /// The owning domain.
    pub domain: QualifiedName,

    /// Canonical descriptor name, e.g. `Billing.BillingApp`.
    pub name: CanonicalName,

    /// Process-group identifier the runtime registers under.
    pub process_group: Symbol,

    /// Event store adapter reference.
    pub event_store: QualifiedName,

    /// The merged dispatch surface: every router on the unit-wide
    /// global router, in domain order.
    pub routers: Vec<CanonicalName>,

    /// Projector units supervised by this process, in entity order.
    pub projectors: Vec<CanonicalName>,

    /// Supervised entry point; absent when `include_supervisor` is
    /// disabled.
    pub entry_point: Option<CanonicalName>
}

/// Generate the descriptor for one domain.
pub(super) fn generate(
    domain: &QualifiedName,
    application: &ApplicationDecl,
    global: &GlobalRouter,
    entities: &[EntityArtifacts],
    resolver: &NameResolver
) -> Result<ProcessDescriptor, SynthesizeError> {
    let default = Symbol::new(format!("{}_app", domain.last().to_case(Case::Snake)));
    let declared = application.name.clone().unwrap_or(default);
    let canonical = CanonicalName::new(domain.clone(), naming::type_ident(&declared));
    let name = resolver.resolve(
        &Scope::Unit,
        NameKind::Descriptor,
        &declared,
        canonical,
        &application.path
    )?;

    let projectors = entities
        .iter()
        .flat_map(|artifacts| artifacts.projectors.iter())
        .map(|projector| projector.name.clone())
        .collect();

    Ok(ProcessDescriptor {
        domain: domain.clone(),
        name,
        process_group: application.process_group.clone(),
        event_store: application.event_store.clone(),
        routers: global.routers.clone(),
        projectors,
        entry_point: application
            .include_supervisor
            .then(|| CanonicalName::new(domain.clone(), "Supervisor"))
    })
}
