// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for structural declaration parsing.

use super::*;
use crate::error::SchemaError;

fn commands_path() -> DeclPath {
    DeclPath::new(QualifiedName::parse("Billing.Customer"), Section::Commands)
}

fn events_path() -> DeclPath {
    DeclPath::new(QualifiedName::parse("Billing.Customer"), Section::Events)
}

fn projections_path() -> DeclPath {
    DeclPath::new(QualifiedName::parse("Billing.Customer"), Section::Projections)
}

fn register_block() -> RawBlock {
    RawBlock::new(commands_path())
        .entry("name", RawValue::symbol("register_customer"))
        .entry("fields", RawValue::symbols(["id", "email"]))
        .entry("identity_field", RawValue::symbol("id"))
}

#[test]
fn parse_minimal_command() {
    let cmd = CommandDecl::from_block(&register_block()).unwrap();
    assert_eq!(cmd.name, Symbol::new("register_customer"));
    assert_eq!(cmd.fields, vec![Symbol::new("id"), Symbol::new("email")]);
    assert_eq!(cmd.identity_field, Symbol::new("id"));
    assert!(cmd.autogenerate_handler);
    assert_eq!(cmd.resolved_action(), &Symbol::new("register_customer"));
    assert_eq!(cmd.handler_ident(), Symbol::new("handle"));
}

#[test]
fn parse_command_with_overrides() {
    let block = register_block()
        .entry("action", RawValue::symbol("register"))
        .entry("command_name", RawValue::symbol("RegisterCmd"))
        .entry("handler_name", RawValue::symbol("handle_register"))
        .entry("autogenerate_handler", RawValue::Bool(false));

    let cmd = CommandDecl::from_block(&block).unwrap();
    assert_eq!(cmd.resolved_action(), &Symbol::new("register"));
    assert_eq!(cmd.command_name, Some(Symbol::new("RegisterCmd")));
    assert_eq!(cmd.handler_ident(), Symbol::new("handle_register"));
    assert!(!cmd.autogenerate_handler);
}

#[test]
fn command_missing_name_fails() {
    let block = RawBlock::new(commands_path()).entry("fields", RawValue::symbols(["id"]));
    let err = CommandDecl::from_block(&block).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { field: "name", .. }));
}

#[test]
fn command_missing_fields_fails() {
    let block = RawBlock::new(commands_path())
        .entry("name", RawValue::symbol("register"))
        .entry("identity_field", RawValue::symbol("id"));
    let err = CommandDecl::from_block(&block).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { field: "fields", .. }));
}

#[test]
fn command_wrong_fields_shape_fails() {
    let block = RawBlock::new(commands_path())
        .entry("name", RawValue::symbol("register"))
        .entry("fields", RawValue::Str("id,email".to_owned()))
        .entry("identity_field", RawValue::symbol("id"));
    let err = CommandDecl::from_block(&block).unwrap_err();
    match err {
        SchemaError::WrongShape { field, expected, found, .. } => {
            assert_eq!(field, "fields");
            assert_eq!(expected, "list of symbols");
            assert_eq!(found, "string");
        }
        other => panic!("expected WrongShape, got {other:?}")
    }
}

#[test]
fn command_unknown_key_fails() {
    let block = register_block().entry("autogenrate_handler", RawValue::Bool(false));
    let err = CommandDecl::from_block(&block).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownField { .. }));
    assert!(err.to_string().contains("autogenrate_handler"));
}

#[test]
fn command_error_carries_declaration_path() {
    let block = register_block().entry("action", RawValue::Int(1));
    let err = CommandDecl::from_block(&block).unwrap_err();
    assert_eq!(
        err.path().to_string(),
        "Billing.Customer/commands/register_customer"
    );
}

#[test]
fn parse_event() {
    let block = RawBlock::new(events_path())
        .entry("name", RawValue::symbol("customer_registered"))
        .entry("fields", RawValue::symbols(["id", "email"]));
    let event = EventDecl::from_block(&block).unwrap();
    assert_eq!(event.name, Symbol::new("customer_registered"));
    assert!(event.has_field(&Symbol::new("email")));
    assert!(!event.has_field(&Symbol::new("ghost")));
}

#[test]
fn event_name_override() {
    let block = RawBlock::new(events_path())
        .entry("name", RawValue::symbol("customer_registered"))
        .entry("fields", RawValue::symbols(["id"]))
        .entry("event_name", RawValue::symbol("Registered"));
    let event = EventDecl::from_block(&block).unwrap();
    assert_eq!(event.event_name, Some(Symbol::new("Registered")));
}

#[test]
fn parse_projection_with_mapped_changes() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("on_registered"))
        .entry("event", RawValue::symbol("customer_registered"))
        .entry("action", RawValue::symbol("create"))
        .entry(
            "changes",
            RawValue::Map(vec![
                ("status".to_owned(), RawValue::constant(Value::Str("pending".to_owned()))),
                ("email".to_owned(), RawValue::symbol("email")),
            ])
        );

    let projection = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap();
    assert_eq!(projection.resolved_event(), &Symbol::new("customer_registered"));
    assert_eq!(projection.action, ProjectionAction::Create);

    let mapped = projection.changes.mapped().unwrap();
    assert_eq!(mapped.len(), 2);
    assert_eq!(
        mapped[0],
        (
            Symbol::new("status"),
            ChangeSource::Const(Value::Str("pending".to_owned()))
        )
    );
    assert_eq!(
        mapped[1],
        (Symbol::new("email"), ChangeSource::FieldRef(Symbol::new("email")))
    );
}

#[test]
fn projection_event_defaults_to_own_name() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("customer_registered"))
        .entry("action", RawValue::symbol("create"))
        .entry("changes", RawValue::Map(Vec::new()));
    let projection = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap();
    assert_eq!(projection.resolved_event(), &Symbol::new("customer_registered"));
}

#[test]
fn projection_custom_action_parses() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("on_archived"))
        .entry("action", RawValue::symbol("archive"))
        .entry("changes", RawValue::Map(Vec::new()));
    let projection = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap();
    assert_eq!(projection.action, ProjectionAction::Custom(Symbol::new("archive")));
}

#[test]
fn projection_changes_wrong_shape_fails() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("bad"))
        .entry("action", RawValue::symbol("create"))
        .entry("changes", RawValue::symbols(["status"]));
    let err = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap_err();
    assert!(matches!(err, SchemaError::WrongShape { field: "changes", .. }));
}

#[test]
fn projection_bad_source_specifier_fails() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("bad"))
        .entry("action", RawValue::symbol("create"))
        .entry(
            "changes",
            RawValue::Map(vec![("status".to_owned(), RawValue::Int(42))])
        );
    let err = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap_err();
    assert!(matches!(err, SchemaError::WrongShape { .. }));
}

#[test]
fn projection_missing_changes_fails() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("bare"))
        .entry("action", RawValue::symbol("create"));
    let err = ProjectionDecl::from_source(&ProjectionSource::declared(block)).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { field: "changes", .. }));
}

#[test]
fn projection_computed_changes() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("computed"))
        .entry("event", RawValue::symbol("customer_registered"))
        .entry("action", RawValue::symbol("update"));
    let computed = ComputedChanges::new(|event| {
        let mut changes = Changeset::new();
        if let Some(email) = event.get(&Symbol::new("email")) {
            changes.set(Symbol::new("contact"), email.clone());
        }
        changes
    });

    let projection =
        ProjectionDecl::from_source(&ProjectionSource::computed(block, computed)).unwrap();
    let Changes::Computed(f) = &projection.changes else {
        panic!("expected computed changes")
    };

    let instance = EventInstance::new().with("email", Value::Str("a@b.c".to_owned()));
    let changes = f.call(&instance);
    assert_eq!(
        changes.get(&Symbol::new("contact")),
        Some(&Value::Str("a@b.c".to_owned()))
    );
}

#[test]
fn projection_both_mapping_and_computed_fails() {
    let block = RawBlock::new(projections_path())
        .entry("name", RawValue::symbol("both"))
        .entry("action", RawValue::symbol("create"))
        .entry("changes", RawValue::Map(Vec::new()));
    let computed = ComputedChanges::new(|_| Changeset::new());
    let err =
        ProjectionDecl::from_source(&ProjectionSource::computed(block, computed)).unwrap_err();
    assert!(matches!(err, SchemaError::Invalid { .. }));
}

#[test]
fn parse_application() {
    let block = RawBlock::new(DeclPath::new(QualifiedName::parse("Billing"), Section::Application))
        .entry("process_group", RawValue::symbol("billing"))
        .entry("event_store", RawValue::Str("EventStore.Postgres".to_owned()));
    let app = ApplicationDecl::from_block(&block).unwrap();
    assert_eq!(app.process_group, Symbol::new("billing"));
    assert_eq!(app.event_store.to_string(), "EventStore.Postgres");
    assert!(app.include_supervisor);
}

#[test]
fn application_missing_event_store_fails() {
    let block = RawBlock::new(DeclPath::new(QualifiedName::parse("Billing"), Section::Application))
        .entry("process_group", RawValue::symbol("billing"));
    let err = ApplicationDecl::from_block(&block).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { field: "event_store", .. }));
}

#[test]
fn qualified_name_helpers() {
    let name = QualifiedName::parse("Billing.Invoice");
    assert_eq!(name.last(), "Invoice");
    assert_eq!(name.parent().unwrap().to_string(), "Billing");
    assert_eq!(name.sibling("Commands").to_string(), "Billing.Commands");
    assert_eq!(QualifiedName::parse("Customer").sibling("Events").to_string(), "Events");
}

#[test]
fn changeset_preserves_declaration_order() {
    let mut changes = Changeset::new();
    changes.set(Symbol::new("b"), Value::Int(1));
    changes.set(Symbol::new("a"), Value::Int(2));
    changes.set(Symbol::new("b"), Value::Int(3));

    let entries: Vec<_> = changes.iter().map(|(t, v)| (t.clone(), v.clone())).collect();
    assert_eq!(
        entries,
        vec![
            (Symbol::new("b"), Value::Int(3)),
            (Symbol::new("a"), Value::Int(2)),
        ]
    );
}
