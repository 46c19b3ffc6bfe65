// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Event declarations.
//!
//! An event represents a fact that has occurred.
//!
//! # Fields
//!
//! | Field | Shape | Default |
//! |-------|-------|---------|
//! | `name` | symbol, required | — |
//! | `fields` | list of symbols, required | — |
//! | `event_name` | symbol | derived from `name` |

use serde::Serialize;

use super::{
    raw::{DeclPath, RawBlock},
    value::Symbol
};
use crate::error::SchemaError;

const KEYS: &[&str] = &["name", "fields", "event_name"];

/// A parsed event declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDecl {
    /// Event name, unique within the owning entity.
    pub name: Symbol,

    /// Attribute symbols the event carries, in declaration order.
    pub fields: Vec<Symbol>,

    /// Override for the generated event type identifier.
    pub event_name: Option<Symbol>,

    /// Where the event was declared.
    pub path: DeclPath
}

impl EventDecl {
    /// Parse an event from its raw declaration block.
    pub fn from_block(block: &RawBlock) -> Result<Self, SchemaError> {
        let name = block.require_symbol(block.path(), "name")?;
        let path = block.path().item(name.clone());
        block.expect_keys(&path, KEYS)?;

        Ok(Self {
            fields: block.require_symbols(&path, "fields")?,
            event_name: block.optional_symbol(&path, "event_name")?,
            name,
            path
        })
    }

    /// Whether the event carries `field`.
    #[must_use]
    pub fn has_field(&self, field: &Symbol) -> bool {
        self.fields.contains(field)
    }
}
