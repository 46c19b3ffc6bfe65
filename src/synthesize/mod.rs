// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Artifact synthesis pipeline.
//!
//! Consumes a validated [`NormalizedDocument`] and produces artifact
//! *descriptions* — data telling a renderer what to emit, never textual
//! source. Generators run in strict dependency order:
//!
//! ```text
//! entity-local (parallelizable per entity)
//! ├── 1. commands.rs    → command records
//! ├── 2. events.rs      → event records
//! ├── 3. projections.rs → projection transforms (needs nothing)
//! ├── 4. aggregate.rs   → aggregate state machine (needs 3)
//! └── 5. projector.rs   → projector units (needs 2, 3)
//!
//! domain-wide barrier
//! └── 6. router.rs      → domain router (needs 1 across the domain)
//!
//! unit-wide barrier
//! ├── 7. router.rs      → global router (needs 6 across all domains)
//! └── 8. process.rs     → process descriptor (needs 7, 5)
//! ```
//!
//! Synthesis never begins for an entity until its validation pipeline
//! returned `Ok`; domain steps wait for every member entity.

mod aggregate;
mod commands;
mod events;
mod process;
mod projections;
mod projector;
mod router;


use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use self::{
    aggregate::{AggregateDef, AggregateState, Transition},
    commands::CommandRecord,
    events::EventRecord,
    process::ProcessDescriptor,
    projections::{ProjectionTransform, ResolvedChanges},
    projector::ProjectorDef,
    router::{DomainRouter, GlobalRouter, RouteEntry}
};
use crate::{
    error::{NameConflict, SynthesisError},
    naming::NameResolver,
    registry::NormalizedDocument,
    schema::QualifiedName
};

/// Failure during artifact generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesizeError {
    /// A naming collision detected by the resolver.
    #[error(transparent)]
    Conflict(#[from] NameConflict),

    /// An internal invariant violation — a validation coverage gap.
    #[error(transparent)]
    Internal(#[from] SynthesisError)
}

/// Every entity-local artifact produced for one validated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityArtifacts {
    /// The document the artifacts were derived from.
    pub document: NormalizedDocument,

    /// Command records (step 1).
    pub commands: Vec<CommandRecord>,

    /// Event records (step 2).
    pub events: Vec<EventRecord>,

    /// Projection transforms (step 3).
    pub transforms: Vec<ProjectionTransform>,

    /// The aggregate state machine (step 4).
    pub aggregate: AggregateDef,

    /// Projector units (step 5).
    pub projectors: Vec<ProjectorDef>
}

/// Run the entity-local synthesis steps (1–5) in order.
pub fn entity(
    doc: &NormalizedDocument,
    domain: &QualifiedName,
    resolver: &NameResolver
) -> Result<EntityArtifacts, SynthesizeError> {
    debug!(entity = %doc.entity, "synthesizing entity artifacts");

    let commands = commands::generate(doc, resolver)?;
    let events = events::generate(doc, resolver)?;
    let transforms = projections::generate(doc)?;
    let aggregate = aggregate::generate(doc, &transforms);
    let projectors = projector::generate(doc, domain, resolver)?;

    Ok(EntityArtifacts {
        document: doc.clone(),
        commands,
        events,
        transforms,
        aggregate,
        projectors
    })
}

/// Build the domain router (step 6) over finished entity artifacts.
pub fn domain_router(
    domain: &QualifiedName,
    entities: &[EntityArtifacts],
    resolver: &NameResolver
) -> Result<DomainRouter, SynthesizeError> {
    router::domain(domain, entities, resolver)
}

/// Merge domain routers into the global dispatch surface (step 7).
pub fn global_router(
    routers: &[DomainRouter],
    resolver: &NameResolver
) -> Result<GlobalRouter, SynthesizeError> {
    router::global(routers, resolver)
}

/// Build the process descriptor for a domain with an application block
/// (step 8). A unit-wide barrier: requires the global router, so it
/// only runs once every domain finished routing.
pub fn process_descriptor(
    domain: &QualifiedName,
    application: &crate::schema::ApplicationDecl,
    global: &GlobalRouter,
    entities: &[EntityArtifacts],
    resolver: &NameResolver
) -> Result<ProcessDescriptor, SynthesizeError> {
    process::generate(domain, application, global, entities, resolver)
}
