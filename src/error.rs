// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy and the aggregated diagnostics surface.
//!
//! Four error families, each with a distinct propagation policy:
//!
//! | Error | Policy |
//! |-------|--------|
//! | [`SchemaError`] | Fatal to the declaring entity; siblings still compile |
//! | [`ValidationError`] | Aggregated across all checks, reported together |
//! | [`NameConflict`] | Fatal to domain-level synthesis, both sites reported |
//! | [`SynthesisError`] | Internal invariant defect; validation coverage gap |
//!
//! Every error carries a [`DeclPath`] so the user can locate the exact
//! offending declaration.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::{
    naming::{NameKind, Scope},
    schema::{DeclPath, RawValue, Symbol}
};

/// Malformed declaration shape: missing required field, wrong value
/// shape, or an entry outside the declared vocabulary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A required field is absent from the declaration block.
    #[error("{path}: missing required field `{field}`")]
    MissingField {
        /// Declaration location.
        path: DeclPath,
        /// The absent field.
        field: &'static str
    },

    /// A field value does not match its declared shape.
    #[error("{path}: field `{field}` expects {expected}, found {found}")]
    WrongShape {
        /// Declaration location.
        path: DeclPath,
        /// The offending field.
        field: &'static str,
        /// The shape the schema declares.
        expected: &'static str,
        /// The shape actually supplied.
        found: String
    },

    /// An entry whose key is not part of the declaration's vocabulary.
    #[error("{path}: unknown field `{field}`")]
    UnknownField {
        /// Declaration location.
        path: DeclPath,
        /// The unrecognized key.
        field: String
    },

    /// A structurally well-shaped value that is still not admissible,
    /// e.g. an empty `name` symbol.
    #[error("{path}: {message}")]
    Invalid {
        /// Declaration location.
        path: DeclPath,
        /// What was wrong.
        message: String
    }
}

impl SchemaError {
    /// Shorthand for a [`SchemaError::WrongShape`] built from the raw
    /// value that was actually supplied.
    pub fn wrong_shape(
        path: &DeclPath,
        field: &'static str,
        expected: &'static str,
        found: &RawValue
    ) -> Self {
        Self::WrongShape {
            path: path.clone(),
            field,
            expected,
            found: found.shape().to_owned()
        }
    }

    /// The declaration location the error points at.
    #[must_use]
    pub fn path(&self) -> &DeclPath {
        match self {
            Self::MissingField { path, .. }
            | Self::WrongShape { path, .. }
            | Self::UnknownField { path, .. }
            | Self::Invalid { path, .. } => path
        }
    }
}

/// Identifier of one semantic check in the validation pipeline.
///
/// The discriminant order is the fixed execution order, which makes
/// diagnostic ordering deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Command names unique within the entity.
    CommandNameUniqueness,

    /// Command fields are host-entity attributes.
    CommandFieldValidity,

    /// Enabled handler identifiers unique within the entity.
    HandlerNameUniqueness,

    /// Command name shadowing a host action must target that action.
    ActionShadowConflict,

    /// Event names unique within the entity.
    EventNameUniqueness,

    /// Event fields are host-entity attributes.
    EventFieldValidity,

    /// Projection event references resolve to declared events.
    ProjectionEventReference,

    /// Projection actions are known kinds or host-declared actions.
    ProjectionActionValidity,

    /// Projection change targets and field-reference sources resolve.
    ProjectionChangesValidity
}

impl Check {
    /// Stable textual identifier, suitable for CI matching.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::CommandNameUniqueness => "command_name_uniqueness",
            Self::CommandFieldValidity => "command_field_validity",
            Self::HandlerNameUniqueness => "handler_name_uniqueness",
            Self::ActionShadowConflict => "action_shadow_conflict",
            Self::EventNameUniqueness => "event_name_uniqueness",
            Self::EventFieldValidity => "event_field_validity",
            Self::ProjectionEventReference => "projection_event_reference",
            Self::ProjectionActionValidity => "projection_action_validity",
            Self::ProjectionChangesValidity => "projection_changes_validity"
        }
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One semantic rule violation. Collected, never fatal individually.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{path}: {message} [{check}]")]
pub struct ValidationError {
    /// Which check failed.
    pub check: Check,

    /// Declaration location.
    pub path: DeclPath,

    /// Human-readable description naming the offending values.
    pub message: String,

    /// The offending symbols, for tooling.
    pub offending: Vec<Symbol>
}

impl ValidationError {
    /// Build a validation error for `check` at `path`.
    pub fn new(check: Check, path: DeclPath, message: impl Into<String>) -> Self {
        Self {
            check,
            path,
            message: message.into(),
            offending: Vec::new()
        }
    }

    /// Attach the offending symbols.
    #[must_use]
    pub fn offending(mut self, symbols: Vec<Symbol>) -> Self {
        self.offending = symbols;
        self
    }
}

/// Cross-declaration naming collision detected by the name resolver.
///
/// Always a hard error: a collision means one generated artifact would
/// overwrite another.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "{kind} name `{canonical}` in {scope} scope resolved from both {first} and {second}"
)]
pub struct NameConflict {
    /// Scope the collision occurred in.
    pub scope: Scope,

    /// Kind of artifact being named.
    pub kind: NameKind,

    /// The colliding canonical identifier.
    pub canonical: String,

    /// First declaration site.
    pub first: DeclPath,

    /// Second declaration site.
    pub second: DeclPath
}

/// Internal invariant violation during artifact generation.
///
/// Validation is supposed to make these unreachable; seeing one means a
/// validation coverage gap, to be treated as a defect rather than a
/// user error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("internal synthesis invariant violated at {path}: {message}")]
pub struct SynthesisError {
    /// Where synthesis was working when the invariant broke.
    pub path: DeclPath,

    /// What broke.
    pub message: String
}

/// Compilation phase a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Structural parsing (schema model).
    Parse,

    /// Semantic validation.
    Validate,

    /// Artifact synthesis.
    Synthesize
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Validate => "validate",
            Self::Synthesize => "synthesize"
        };
        write!(f, "{name}")
    }
}

/// One entry on the diagnostics surface consumed by reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Originating phase.
    pub phase: Phase,

    /// Check identifier for validation diagnostics.
    pub check: Option<Check>,

    /// Declaration location.
    pub path: DeclPath,

    /// Human-readable message.
    pub message: String
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.phase, self.path, self.message)
    }
}

impl From<SchemaError> for Diagnostic {
    fn from(err: SchemaError) -> Self {
        let path = err.path().clone();
        Self {
            phase: Phase::Parse,
            check: None,
            path,
            message: err.to_string()
        }
    }
}

impl From<ValidationError> for Diagnostic {
    fn from(err: ValidationError) -> Self {
        Self {
            phase: Phase::Validate,
            check: Some(err.check),
            path: err.path.clone(),
            message: err.message.clone()
        }
    }
}

impl From<NameConflict> for Diagnostic {
    fn from(err: NameConflict) -> Self {
        let message = err.to_string();
        Self {
            phase: Phase::Synthesize,
            check: None,
            path: err.second,
            message
        }
    }
}

impl From<SynthesisError> for Diagnostic {
    fn from(err: SynthesisError) -> Self {
        let message = err.message.clone();
        Self {
            phase: Phase::Synthesize,
            check: None,
            path: err.path,
            message
        }
    }
}

/// Aggregated diagnostics for one compilation attempt.
///
/// A compilation either completes for the whole unit or is reported as
/// wholly failed through one of these; partial artifacts are never
/// observable.
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>
}

impl Diagnostics {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic.
    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.entries.push(diagnostic.into());
    }

    /// Append many diagnostics.
    pub fn extend<I, D>(&mut self, diagnostics: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<Diagnostic>
    {
        self.entries.extend(diagnostics.into_iter().map(Into::into));
    }

    /// Whether no diagnostic was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate the diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} diagnostic(s):", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}
