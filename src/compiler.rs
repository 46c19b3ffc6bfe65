// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Top-level compilation orchestration.
//!
//! [`Compiler::compile`] drives one whole unit through the three phases:
//!
//! 1. **Parse** — normalize every entity's raw declarations. A
//!    [`SchemaError`](crate::error::SchemaError) aborts only the
//!    declaring entity; siblings still parse and validate so one attempt
//!    surfaces diagnostics from the whole unit.
//! 2. **Validate** — run the nine-check pipeline per parsed entity,
//!    aggregating every violation.
//! 3. **Synthesize** — entity-local steps per clean entity, domain steps
//!    once every member entity finished, unit steps once every domain
//!    finished.
//!
//! Any diagnostic anywhere fails the whole unit: the caller either gets
//! every artifact or a [`Diagnostics`] report, never a partial set.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Diagnostics,
    metadata::{EntityFacts, EntityMetadata},
    naming::NameResolver,
    registry::{self, EntitySource},
    schema::{ApplicationDecl, QualifiedName, RawBlock},
    synthesize::{
        self, DomainRouter, EntityArtifacts, GlobalRouter, ProcessDescriptor, SynthesizeError
    }
};

/// Raw input for one domain: its entities plus an optional application
/// block.
#[derive(Debug, Clone)]
pub struct DomainSource {
    /// The domain's qualified name.
    pub name: QualifiedName,

    /// The domain's application declaration, when the domain hosts a
    /// process descriptor.
    pub application: Option<RawBlock>,

    /// Member entity sources, in declaration order.
    pub entities: Vec<EntitySource>
}

impl DomainSource {
    /// Domain with no members yet.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            application: None,
            entities: Vec::new()
        }
    }

    /// Builder-style entity append.
    #[must_use]
    pub fn entity(mut self, source: EntitySource) -> Self {
        self.entities.push(source);
        self
    }

    /// Builder-style application block.
    #[must_use]
    pub fn application(mut self, block: RawBlock) -> Self {
        self.application = Some(block);
        self
    }
}

/// Raw input for one whole compilation unit.
#[derive(Debug, Clone, Default)]
pub struct UnitSource {
    /// Member domains, in declaration order.
    pub domains: Vec<DomainSource>
}

impl UnitSource {
    /// Empty unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style domain append.
    #[must_use]
    pub fn domain(mut self, domain: DomainSource) -> Self {
        self.domains.push(domain);
        self
    }
}

/// Every artifact produced for one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainArtifacts {
    /// The domain's qualified name.
    pub domain: QualifiedName,

    /// Entity-local artifacts, in declaration order.
    pub entities: Vec<EntityArtifacts>,

    /// The domain's dispatch router.
    pub router: DomainRouter,

    /// The process descriptor, when an application block was declared.
    pub descriptor: Option<ProcessDescriptor>
}

/// Every artifact produced for one compilation unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitArtifacts {
    /// Per-domain artifacts, in declaration order.
    pub domains: Vec<DomainArtifacts>,

    /// The merged unit-wide dispatch surface.
    pub global_router: GlobalRouter
}

/// The compilation entry point, parameterized over the host metadata
/// boundary.
#[derive(Debug, Clone)]
pub struct Compiler<M: EntityMetadata> {
    metadata: M
}

impl<M: EntityMetadata> Compiler<M> {
    /// Compiler backed by `metadata`.
    pub fn new(metadata: M) -> Self {
        Self {
            metadata
        }
    }

    /// Compile one unit.
    ///
    /// Returns the full artifact set, or every diagnostic the attempt
    /// produced. Diagnostics are ordered by domain, then entity, then
    /// phase and check order, so two runs over the same input report
    /// identically.
    pub fn compile(&self, unit: &UnitSource) -> Result<UnitArtifacts, Diagnostics> {
        let mut diagnostics = Diagnostics::new();
        let resolver = NameResolver::new();
        let mut domains = Vec::with_capacity(unit.domains.len());
        let mut applications = Vec::with_capacity(unit.domains.len());

        for domain in &unit.domains {
            if let Some((artifacts, application)) =
                self.compile_domain(domain, &resolver, &mut diagnostics)
            {
                domains.push(artifacts);
                applications.push(application);
            }
        }

        // Unit barrier: the global router only exists when every domain
        // synthesized cleanly.
        if !diagnostics.is_empty() {
            info!(count = diagnostics.len(), "compilation failed");
            return Err(diagnostics);
        }

        let routers: Vec<DomainRouter> = domains.iter().map(|d| d.router.clone()).collect();
        let global_router = match synthesize::global_router(&routers, &resolver) {
            Ok(global_router) => global_router,
            Err(err) => {
                push_synthesize(&mut diagnostics, err);
                return Err(diagnostics);
            }
        };

        // Descriptors wire the merged dispatch surface, so they run
        // after the unit barrier.
        for (index, application) in applications.iter().enumerate() {
            let Some(app) = application else {
                continue;
            };
            match synthesize::process_descriptor(
                &domains[index].domain,
                app,
                &global_router,
                &domains[index].entities,
                &resolver
            ) {
                Ok(descriptor) => domains[index].descriptor = Some(descriptor),
                Err(err) => push_synthesize(&mut diagnostics, err)
            }
        }
        if !diagnostics.is_empty() {
            info!(count = diagnostics.len(), "compilation failed");
            return Err(diagnostics);
        }

        Ok(UnitArtifacts {
            domains,
            global_router
        })
    }

    /// Parse and validate one domain, run its entity-local and
    /// domain-barrier synthesis steps, and hand back the parsed
    /// application block for the later unit barrier. Returns `None`
    /// when any member entity (or the domain barrier itself) produced a
    /// diagnostic.
    fn compile_domain(
        &self,
        domain: &DomainSource,
        resolver: &NameResolver,
        diagnostics: &mut Diagnostics
    ) -> Option<(DomainArtifacts, Option<ApplicationDecl>)> {
        debug!(domain = %domain.name, entities = domain.entities.len(), "compiling domain");
        let before = diagnostics.len();

        let application = match &domain.application {
            Some(block) => match ApplicationDecl::from_block(block) {
                Ok(app) => Some(app),
                Err(err) => {
                    diagnostics.push(err);
                    None
                }
            },
            None => None
        };

        let mut entities = Vec::with_capacity(domain.entities.len());
        for source in &domain.entities {
            if let Some(artifacts) = self.compile_entity(source, &domain.name, resolver, diagnostics)
            {
                entities.push(artifacts);
            }
        }

        // Domain barrier: the router waits for every member entity.
        if diagnostics.len() > before {
            return None;
        }

        let router = match synthesize::domain_router(&domain.name, &entities, resolver) {
            Ok(router) => router,
            Err(err) => {
                push_synthesize(diagnostics, err);
                return None;
            }
        };

        Some((
            DomainArtifacts {
                domain: domain.name.clone(),
                entities,
                router,
                descriptor: None
            },
            application
        ))
    }

    /// Parse, validate, and synthesize one entity.
    fn compile_entity(
        &self,
        source: &EntitySource,
        domain: &QualifiedName,
        resolver: &NameResolver,
        diagnostics: &mut Diagnostics
    ) -> Option<EntityArtifacts> {
        let doc = match registry::normalize(source) {
            Ok(doc) => doc,
            Err(err) => {
                diagnostics.push(err);
                return None;
            }
        };

        let facts = EntityFacts::snapshot(&self.metadata, &doc.entity);
        if let Err(errors) = crate::validate::run(&doc, &facts) {
            diagnostics.extend(errors);
            return None;
        }

        match synthesize::entity(&doc, domain, resolver) {
            Ok(artifacts) => Some(artifacts),
            Err(err) => {
                push_synthesize(diagnostics, err);
                None
            }
        }
    }
}

fn push_synthesize(diagnostics: &mut Diagnostics, err: SynthesizeError) {
    match err {
        SynthesizeError::Conflict(conflict) => diagnostics.push(conflict),
        SynthesizeError::Internal(internal) => diagnostics.push(internal)
    }
}
