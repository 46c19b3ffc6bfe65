// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # decree
//!
//! Declarative lifecycle compiler for event-sourced entities: from one
//! set of command/event/projection declarations to a validated,
//! dependency-ordered description of every CQRS artifact an entity
//! needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use decree::{
//!     Compiler, DomainSource, EntitySource, UnitSource,
//!     metadata::StaticMetadata,
//!     schema::{DeclPath, QualifiedName, RawBlock, RawValue, Section}
//! };
//!
//! let entity = QualifiedName::parse("Billing.Customer");
//! let mut source = EntitySource::new(entity.clone());
//! source.commands.push(
//!     RawBlock::new(DeclPath::new(entity.clone(), Section::Commands))
//!         .entry("name", RawValue::symbol("register_customer"))
//!         .entry("fields", RawValue::symbols(["id", "email"]))
//!         .entry("identity_field", RawValue::symbol("id"))
//! );
//! source.events.push(
//!     RawBlock::new(DeclPath::new(entity, Section::Events))
//!         .entry("name", RawValue::symbol("customer_registered"))
//!         .entry("fields", RawValue::symbols(["id", "email"]))
//! );
//!
//! let metadata = StaticMetadata::new().entity(
//!     "Billing.Customer",
//!     ["id", "email"],
//!     ["register_customer"]
//! );
//! let unit = UnitSource::new()
//!     .domain(DomainSource::new(QualifiedName::parse("Billing")).entity(source));
//!
//! let artifacts = Compiler::new(metadata).compile(&unit).expect("valid declarations");
//! assert_eq!(
//!     artifacts.domains[0].entities[0].commands[0].name.to_string(),
//!     "Billing.Commands.RegisterCustomer"
//! );
//! ```
//!
//! ## Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Typed declaration model and raw input shapes |
//! | [`registry`] | Declarations → one normalized document per entity |
//! | [`metadata`] | Read-only host-entity metadata boundary |
//! | [`validate`] | Nine aggregated semantic checks |
//! | [`naming`] | Canonical names and scope-wide conflict detection |
//! | [`synthesize`] | Dependency-ordered artifact generators |
//! | [`introspect`] | Read-only document queries for tooling |
//! | [`compiler`] | Whole-unit orchestration |
//! | [`error`] | Error taxonomy and diagnostics aggregation |
//!
//! Compilation is two explicit phases after parsing: validation
//! aggregates every semantic violation across the unit, and synthesis
//! runs only over entities whose documents validated clean. The result
//! is all-or-nothing: either every artifact description, or a
//! [`Diagnostics`] report — never a partial set.

pub mod compiler;
pub mod error;
pub mod introspect;
pub mod metadata;
pub mod naming;
pub mod registry;
pub mod schema;
pub mod synthesize;
pub mod validate;

pub use compiler::{Compiler, DomainArtifacts, DomainSource, UnitArtifacts, UnitSource};
pub use error::{Check, Diagnostic, Diagnostics, Phase};
pub use registry::{EntitySource, NormalizedDocument};
