// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Application declarations.
//!
//! One per owning domain (not per entity): process-level configuration
//! wired into the domain's process descriptor.
//!
//! # Fields
//!
//! | Field | Shape | Default |
//! |-------|-------|---------|
//! | `process_group` | symbol, required | — |
//! | `event_store` | module path, required | — |
//! | `name` | symbol | `{Domain}App` |
//! | `include_supervisor` | bool | `true` |

use serde::Serialize;

use super::{
    raw::{DeclPath, RawBlock},
    value::{QualifiedName, Symbol}
};
use crate::error::SchemaError;

const KEYS: &[&str] = &["process_group", "event_store", "name", "include_supervisor"];

/// A parsed application declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDecl {
    /// Process-group identifier the runtime registers under.
    pub process_group: Symbol,

    /// Event store adapter reference.
    pub event_store: QualifiedName,

    /// Override for the generated descriptor name.
    pub name: Option<Symbol>,

    /// Whether a supervised-process entry point is emitted.
    pub include_supervisor: bool,

    /// Where the application block was declared.
    pub path: DeclPath
}

impl ApplicationDecl {
    /// Parse an application block.
    pub fn from_block(block: &RawBlock) -> Result<Self, SchemaError> {
        let path = block.path().clone();
        block.expect_keys(&path, KEYS)?;

        Ok(Self {
            process_group: block.require_symbol(&path, "process_group")?,
            event_store: block.require_qualified(&path, "event_store")?,
            name: block.optional_symbol(&path, "name")?,
            include_supervisor: block.bool_or(&path, "include_supervisor", true)?,
            path
        })
    }
}
