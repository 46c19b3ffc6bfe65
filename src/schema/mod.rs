// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema model: typed declarations and structural parsing.
//!
//! The compiler's input is structured declaration data (§ raw), parsed
//! here into one of four typed declaration kinds:
//!
//! | Declaration | Scope | Parsed by |
//! |-------------|-------|-----------|
//! | [`CommandDecl`] | entity | [`CommandDecl::from_block`] |
//! | [`EventDecl`] | entity | [`EventDecl::from_block`] |
//! | [`ProjectionDecl`] | entity | [`ProjectionDecl::from_source`] |
//! | [`ApplicationDecl`] | domain | [`ApplicationDecl::from_block`] |
//!
//! Parsing is purely structural: required/default/shape rules, nothing
//! cross-referential. Semantic validation is the [`crate::validate`]
//! pipeline's job.

mod application;
mod command;
mod event;
mod projection;
mod raw;
mod value;

#[cfg(test)]
mod tests;

pub use application::ApplicationDecl;
pub use command::{CommandDecl, DEFAULT_HANDLER};
pub use event::EventDecl;
pub use projection::{
    ChangeSource, Changes, ComputedChanges, ProjectionAction, ProjectionDecl, ProjectionSource
};
pub use raw::{DeclPath, RawBlock, RawValue, Section};
pub use value::{Changeset, EventInstance, QualifiedName, Symbol, Value};
