// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command declarations.
//!
//! A command represents an intent to change entity state.
//!
//! # Fields
//!
//! | Field | Shape | Default |
//! |-------|-------|---------|
//! | `name` | symbol, required | — |
//! | `fields` | list of symbols, required | — |
//! | `identity_field` | symbol, required | — |
//! | `action` | symbol | the command's `name` |
//! | `command_name` | symbol | derived from `name` |
//! | `handler_name` | symbol | `handle` |
//! | `autogenerate_handler` | bool | `true` |

use serde::Serialize;

use super::{
    raw::{DeclPath, RawBlock},
    value::Symbol
};
use crate::error::SchemaError;

const KEYS: &[&str] = &[
    "name",
    "fields",
    "identity_field",
    "action",
    "command_name",
    "handler_name",
    "autogenerate_handler",
];

/// Default handler identifier when `handler_name` is absent.
pub const DEFAULT_HANDLER: &str = "handle";

/// A parsed command declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDecl {
    /// Command name, unique within the owning entity.
    pub name: Symbol,

    /// Attribute symbols the command carries, in declaration order.
    pub fields: Vec<Symbol>,

    /// The field used to locate the targeted entity instance.
    pub identity_field: Symbol,

    /// Host-entity operation to invoke. `None` means the command's own
    /// name.
    pub action: Option<Symbol>,

    /// Override for the generated command type identifier.
    pub command_name: Option<Symbol>,

    /// Override for the generated handler identifier.
    pub handler_name: Option<Symbol>,

    /// Whether a dispatch-handler clause is synthesized.
    pub autogenerate_handler: bool,

    /// Where the command was declared.
    pub path: DeclPath
}

impl CommandDecl {
    /// Parse a command from its raw declaration block.
    ///
    /// Purely structural: field presence and shape only, no
    /// cross-declaration checks.
    pub fn from_block(block: &RawBlock) -> Result<Self, SchemaError> {
        let name = block.require_symbol(block.path(), "name")?;
        let path = block.path().item(name.clone());
        block.expect_keys(&path, KEYS)?;

        Ok(Self {
            fields: block.require_symbols(&path, "fields")?,
            identity_field: block.require_symbol(&path, "identity_field")?,
            action: block.optional_symbol(&path, "action")?,
            command_name: block.optional_symbol(&path, "command_name")?,
            handler_name: block.optional_symbol(&path, "handler_name")?,
            autogenerate_handler: block.bool_or(&path, "autogenerate_handler", true)?,
            name,
            path
        })
    }

    /// The host-entity operation this command invokes: explicit
    /// `action`, or the command's own name.
    #[must_use]
    pub fn resolved_action(&self) -> &Symbol {
        self.action.as_ref().unwrap_or(&self.name)
    }

    /// The handler identifier an enabled handler resolves to.
    #[must_use]
    pub fn handler_ident(&self) -> Symbol {
        self.handler_name
            .clone()
            .unwrap_or_else(|| Symbol::new(DEFAULT_HANDLER))
    }
}
