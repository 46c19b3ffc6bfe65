// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Canonical name derivation and cross-declaration conflict detection.
//!
//! Both the validation and synthesis pipelines route every generated
//! identifier through [`NameResolver`]. The resolver keeps a scope-keyed
//! registry of already-resolved names for the current compilation; two
//! declarations that resolve to the same canonical identifier inside one
//! scope are a hard [`NameConflict`], because the colliding artifact
//! would silently overwrite the first.
//!
//! Resolution itself is deterministic and pure: the same declared name
//! with the same overrides always yields the same [`CanonicalName`].

use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    sync::Mutex
};

use convert_case::{Case, Casing};
use serde::Serialize;

use crate::{
    error::NameConflict,
    schema::{DeclPath, QualifiedName, Symbol}
};

/// Scope a name must be unique within.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One owning entity.
    Entity(QualifiedName),

    /// One domain (entities sharing a router and process descriptor).
    Domain(QualifiedName),

    /// The whole compilation unit.
    Unit
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(name) => write!(f, "entity {name}"),
            Self::Domain(name) => write!(f, "domain {name}"),
            Self::Unit => write!(f, "unit")
        }
    }
}

/// Kind of artifact a name belongs to. Names of different kinds never
/// collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    /// Command record type.
    Command,

    /// Event record type.
    Event,

    /// Projector unit.
    Projector,

    /// Dispatch router.
    Router,

    /// Process descriptor.
    Descriptor
}

impl NameKind {
    /// Whether two canonical names registered under this kind occupy
    /// the same artifact slot.
    ///
    /// Projector units are addressed by bare identifier within their
    /// domain's supervision tree, so the namespace does not
    /// disambiguate them; every other kind collides on the full
    /// namespaced name.
    fn collides(self, a: &CanonicalName, b: &CanonicalName) -> bool {
        match self {
            Self::Projector => a.ident == b.ident,
            _ => a == b
        }
    }
}

impl Display for NameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Command => "command",
            Self::Event => "event",
            Self::Projector => "projector",
            Self::Router => "router",
            Self::Descriptor => "descriptor"
        };
        write!(f, "{name}")
    }
}

/// A fully resolved artifact name: namespace plus type identifier.
///
/// Displays as `Billing.Commands.RegisterCustomer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalName {
    /// The module namespace the artifact lives in.
    pub namespace: QualifiedName,

    /// The artifact's type identifier, PascalCase.
    pub ident: String
}

impl CanonicalName {
    /// Build a canonical name.
    pub fn new(namespace: QualifiedName, ident: impl Into<String>) -> Self {
        Self {
            namespace,
            ident: ident.into()
        }
    }

    /// The name as one qualified path.
    #[must_use]
    pub fn qualified(&self) -> QualifiedName {
        self.namespace.child(&self.ident)
    }
}

impl Display for CanonicalName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.ident)
        } else {
            write!(f, "{}.{}", self.namespace, self.ident)
        }
    }
}

/// Convert a declared snake_case symbol into a PascalCase type
/// identifier: `register_customer` becomes `RegisterCustomer`.
#[must_use]
pub fn type_ident(declared: &Symbol) -> String {
    declared.as_str().to_case(Case::Pascal)
}

/// Resolve a declared name against an optional per-declaration override
/// and the namespace it defaults into.
///
/// A dotted override replaces the namespace as well; a bare override
/// replaces only the identifier.
#[must_use]
pub fn canonical(
    declared: &Symbol,
    override_name: Option<&Symbol>,
    namespace: &QualifiedName
) -> CanonicalName {
    match override_name {
        Some(name) if name.as_str().contains('.') => {
            let full = QualifiedName::parse(name.as_str());
            let ident = full.last().to_owned();
            let namespace = full.parent().unwrap_or_else(|| QualifiedName::new(Vec::new()));
            CanonicalName::new(namespace, ident)
        }
        Some(name) => CanonicalName::new(namespace.clone(), type_ident(name)),
        None => CanonicalName::new(namespace.clone(), type_ident(declared))
    }
}

#[derive(Debug, Clone)]
struct Registration {
    kind: NameKind,
    declared: Symbol,
    canonical: CanonicalName,
    site: DeclPath
}

/// Per-compilation registry of resolved names, partitioned by scope.
///
/// The registry is the only shared mutable state in a compilation; the
/// mutex guards it so entity-local synthesis may run in parallel across
/// entities. Each scope is an independent partition, so contention only
/// exists where uniqueness itself is required.
#[derive(Debug, Default)]
pub struct NameResolver {
    scopes: Mutex<HashMap<Scope, Vec<Registration>>>
}

impl NameResolver {
    /// Fresh resolver for one compilation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `canonical` for `declared` within `scope`.
    ///
    /// Idempotent for the exact same scope/kind/declared/canonical
    /// combination. Fails with [`NameConflict`] when the same declared
    /// name re-resolves differently, or when a different declaration
    /// lands on an already-taken slot — the full namespaced name for
    /// most kinds, the bare identifier for projectors (unique across
    /// the whole domain regardless of namespace).
    pub fn resolve(
        &self,
        scope: &Scope,
        kind: NameKind,
        declared: &Symbol,
        canonical: CanonicalName,
        site: &DeclPath
    ) -> Result<CanonicalName, NameConflict> {
        let mut scopes = match self.scopes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner()
        };
        let registrations = scopes.entry(scope.clone()).or_default();

        for existing in registrations.iter() {
            if existing.kind != kind {
                continue;
            }
            if existing.declared == *declared && existing.site == *site {
                if existing.canonical == canonical {
                    return Ok(canonical);
                }
                return Err(NameConflict {
                    scope: scope.clone(),
                    kind,
                    canonical: canonical.to_string(),
                    first: existing.site.clone(),
                    second: site.clone()
                });
            }
            if kind.collides(&existing.canonical, &canonical) {
                return Err(NameConflict {
                    scope: scope.clone(),
                    kind,
                    canonical: canonical.to_string(),
                    first: existing.site.clone(),
                    second: site.clone()
                });
            }
        }

        registrations.push(Registration {
            kind,
            declared: declared.clone(),
            canonical: canonical.clone(),
            site: site.clone()
        });
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Section;

    fn path(entity: &str, section: Section, item: &str) -> DeclPath {
        DeclPath::new(QualifiedName::parse(entity), section).item(Symbol::new(item))
    }

    #[test]
    fn type_ident_pascal_cases() {
        assert_eq!(type_ident(&Symbol::new("register_customer")), "RegisterCustomer");
        assert_eq!(type_ident(&Symbol::new("activate")), "Activate");
    }

    #[test]
    fn canonical_defaults_into_namespace() {
        let ns = QualifiedName::parse("Billing.Commands");
        let name = canonical(&Symbol::new("register_customer"), None, &ns);
        assert_eq!(name.to_string(), "Billing.Commands.RegisterCustomer");
    }

    #[test]
    fn canonical_bare_override_replaces_ident() {
        let ns = QualifiedName::parse("Billing.Commands");
        let name = canonical(
            &Symbol::new("register_customer"),
            Some(&Symbol::new("register")),
            &ns
        );
        assert_eq!(name.to_string(), "Billing.Commands.Register");
    }

    #[test]
    fn canonical_dotted_override_replaces_namespace() {
        let ns = QualifiedName::parse("Billing.Commands");
        let name = canonical(
            &Symbol::new("register_customer"),
            Some(&Symbol::new("Accounts.Intake.Register")),
            &ns
        );
        assert_eq!(name.to_string(), "Accounts.Intake.Register");
    }

    #[test]
    fn resolve_is_idempotent_for_same_site() {
        let resolver = NameResolver::new();
        let scope = Scope::Domain(QualifiedName::parse("Billing"));
        let site = path("Billing.Invoice", Section::Projections, "on_created");
        let name = CanonicalName::new(QualifiedName::parse("Billing.Projections"), "InvoiceProjector");

        let first = resolver
            .resolve(&scope, NameKind::Projector, &Symbol::new("on_created"), name.clone(), &site)
            .unwrap();
        let second = resolver
            .resolve(&scope, NameKind::Projector, &Symbol::new("on_created"), name, &site)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_conflicts_on_shared_canonical() {
        let resolver = NameResolver::new();
        let scope = Scope::Domain(QualifiedName::parse("Accounts"));
        let name = CanonicalName::new(QualifiedName::parse("Accounts.Projections"), "UserProjector");

        let first_site = path("Accounts.User", Section::Projections, "on_registered");
        resolver
            .resolve(&scope, NameKind::Projector, &Symbol::new("on_registered"), name.clone(), &first_site)
            .unwrap();

        let second_site = path("Accounts.Admin.User", Section::Projections, "on_promoted");
        let err = resolver
            .resolve(&scope, NameKind::Projector, &Symbol::new("on_promoted"), name, &second_site)
            .unwrap_err();
        assert_eq!(err.first, first_site);
        assert_eq!(err.second, second_site);
        assert!(err.to_string().contains("UserProjector"));
    }

    #[test]
    fn projector_idents_conflict_across_namespaces() {
        let resolver = NameResolver::new();
        let scope = Scope::Domain(QualifiedName::parse("Accounts"));

        let first_site = path("Accounts.User", Section::Projections, "on_registered");
        resolver
            .resolve(
                &scope,
                NameKind::Projector,
                &Symbol::new("on_registered"),
                CanonicalName::new(QualifiedName::parse("Accounts.Projections"), "UserProjector"),
                &first_site
            )
            .unwrap();

        // Different namespace, same bare identifier: still one slot.
        let second_site = path("Billing.User", Section::Projections, "on_promoted");
        let err = resolver
            .resolve(
                &scope,
                NameKind::Projector,
                &Symbol::new("on_promoted"),
                CanonicalName::new(QualifiedName::parse("Billing.Projections"), "UserProjector"),
                &second_site
            )
            .unwrap_err();
        assert_eq!(err.first, first_site);
        assert_eq!(err.second, second_site);
    }

    #[test]
    fn command_idents_coexist_across_namespaces() {
        let resolver = NameResolver::new();
        let site_a = path("Billing.Customer", Section::Commands, "register");
        let site_b = path("Accounts.User", Section::Commands, "register");

        resolver
            .resolve(
                &Scope::Unit,
                NameKind::Command,
                &Symbol::new("Billing.Commands.Register"),
                CanonicalName::new(QualifiedName::parse("Billing.Commands"), "Register"),
                &site_a
            )
            .unwrap();
        resolver
            .resolve(
                &Scope::Unit,
                NameKind::Command,
                &Symbol::new("Accounts.Commands.Register"),
                CanonicalName::new(QualifiedName::parse("Accounts.Commands"), "Register"),
                &site_b
            )
            .unwrap();
    }

    #[test]
    fn resolve_allows_same_canonical_in_different_scopes() {
        let resolver = NameResolver::new();
        let name = CanonicalName::new(QualifiedName::parse("Projections"), "UserProjector");
        let site_a = path("A.User", Section::Projections, "p");
        let site_b = path("B.User", Section::Projections, "p");

        resolver
            .resolve(
                &Scope::Domain(QualifiedName::parse("A")),
                NameKind::Projector,
                &Symbol::new("p"),
                name.clone(),
                &site_a
            )
            .unwrap();
        resolver
            .resolve(
                &Scope::Domain(QualifiedName::parse("B")),
                NameKind::Projector,
                &Symbol::new("p"),
                name,
                &site_b
            )
            .unwrap();
    }

    #[test]
    fn resolve_allows_same_canonical_across_kinds() {
        let resolver = NameResolver::new();
        let scope = Scope::Domain(QualifiedName::parse("Billing"));
        let name = CanonicalName::new(QualifiedName::parse("Billing"), "Invoice");
        let site = path("Billing.Invoice", Section::Commands, "c");

        resolver
            .resolve(&scope, NameKind::Command, &Symbol::new("c"), name.clone(), &site)
            .unwrap();
        resolver
            .resolve(&scope, NameKind::Event, &Symbol::new("c"), name, &site)
            .unwrap();
    }
}
