// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projector unit generation (step 5).
//!
//! Wraps each auto-generated projection transform as an
//! event-subscriber unit. Projector identifiers are unique within the
//! whole domain — two entities defaulting to the same identifier would
//! overwrite each other's artifact, so the resolver registers them at
//! domain scope.

use serde::Serialize;

use crate::{
    naming::{self, CanonicalName, NameKind, NameResolver, Scope},
    registry::NormalizedDocument,
    schema::{QualifiedName, Symbol}
};

use super::SynthesizeError;

/// Description of one generated projector unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectorDef {
    /// Canonical projector name, e.g. `Billing.Projections.CustomerProjector`.
    pub name: CanonicalName,

    /// The wrapped projection.
    pub projection: Symbol,

    /// The subscribed event.
    pub event: Symbol,

    /// The owning entity.
    pub entity: QualifiedName
}

/// Generate projector units for projections with `autogenerate`.
pub(super) fn generate(
    doc: &NormalizedDocument,
    domain: &QualifiedName,
    resolver: &NameResolver
) -> Result<Vec<ProjectorDef>, SynthesizeError> {
    let scope = Scope::Domain(domain.clone());
    let mut projectors = Vec::new();

    for projection in &doc.projections {
        if !projection.autogenerate {
            continue;
        }

        let canonical = match &projection.projector_name {
            Some(override_name) => naming::canonical(
                &projection.name,
                Some(override_name),
                &doc.namespaces.projections
            ),
            // Entity-derived default: Billing.Customer → CustomerProjector.
            None => CanonicalName::new(
                doc.namespaces.projections.clone(),
                format!(
                    "{}Projector",
                    naming::type_ident(&Symbol::new(doc.entity.last()))
                )
            )
        };
        let name = resolver.resolve(
            &scope,
            NameKind::Projector,
            &projection.name,
            canonical,
            &projection.path
        )?;

        projectors.push(ProjectorDef {
            name,
            projection: projection.name.clone(),
            event: projection.resolved_event().clone(),
            entity: doc.entity.clone()
        });
    }

    Ok(projectors)
}
