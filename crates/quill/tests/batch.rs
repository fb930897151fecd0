mod support;
use support::*;

use quill::{
    BatchPlan, Capability, ColumnMapping, Dialect, Engine, KnownColumn, KnownColumns, Record,
    SubPlan, Value,
};
use std_util::{assert_err, assert_ok};

use pretty_assertions::assert_eq;

fn engine(dialect: Dialect, batch_size: usize) -> Engine {
    init_logging();

    Engine::builder()
        .dialect(dialect)
        .batch_size(batch_size)
        .build()
}

fn param_counts(plan: &BatchPlan) -> Vec<usize> {
    plan.statements().map(|stmt| stmt.params.len()).collect()
}

fn people(n: i64) -> Vec<Person> {
    (1..=n).map(|i| person(i, &format!("p{i}"), 20 + i as i32)).collect()
}

#[test]
fn inserts_split_into_sub_batches() {
    let plan = assert_ok!(engine(Dialect::Sqlite, 4).insert_all(&samples()));

    assert_eq!(plan.len(), 3);
    // Two writable columns per row
    assert_eq!(param_counts(&plan), [8, 8, 4]);

    let first = plan.plans[0].as_statement().unwrap();
    assert!(
        first.sql.starts_with(r#"INSERT INTO "Sample" ("Id", "ColumnInt") VALUES (?1, ?2), (?3, ?4)"#),
        "{}",
        first.sql
    );
}

#[test]
fn batches_preserve_row_order() {
    let plan = assert_ok!(engine(Dialect::Sqlite, 3).insert_all(&samples()));

    let ids = plan
        .statements()
        .flat_map(|stmt| stmt.params.iter())
        .filter(|param| param.name.starts_with("Id"))
        .map(|param| param.value.clone())
        .collect::<Vec<_>>();

    assert_eq!(ids, (1..=10).map(Value::I64).collect::<Vec<_>>());
}

#[test]
fn empty_input_plans_nothing() {
    let plan = assert_ok!(engine(Dialect::Sqlite, 4).insert_all::<Sample>(&[]));
    assert!(plan.is_empty());
}

#[test]
fn zero_batch_size_is_rejected() {
    let engine = engine(Dialect::Postgresql, 0);

    let err = assert_err!(engine.insert_all(&samples()));
    assert!(err.is_invalid_operation(), "{err}");

    let err = assert_err!(engine.bulk_insert(&people(2), None));
    assert!(err.is_invalid_operation(), "{err}");
}

#[test]
fn batch_size_is_clamped_to_the_parameter_limit() {
    let engine = Engine::builder()
        .dialect(Dialect::Sqlite)
        .capability(Capability {
            max_parameters: 6,
            ..Capability::SQLITE
        })
        .batch_size(10)
        .build();

    let plan = assert_ok!(engine.insert_all(&samples()));
    assert_eq!(param_counts(&plan), [6, 6, 6, 2]);
}

#[test]
fn drivers_without_multi_row_insert_get_one_statement_per_row() {
    let engine = Engine::builder()
        .dialect(Dialect::Sqlite)
        .capability(Capability {
            multi_row_insert: false,
            ..Capability::SQLITE
        })
        .batch_size(4)
        .build();

    let plan = assert_ok!(engine.insert_all(&samples()));
    assert_eq!(plan.len(), 10);
    assert_eq!(param_counts(&plan), [2; 10]);
}

#[test]
fn updates_are_per_row_without_multi_statement_support() {
    let plan = assert_ok!(engine(Dialect::Sqlite, 4).update_many(&samples()));

    assert_eq!(plan.len(), 10);
    for stmt in plan.statements() {
        assert!(stmt.sql.starts_with(r#"UPDATE "Sample""#), "{}", stmt.sql);
    }
}

#[test]
fn updates_batch_with_multi_statement_support() {
    let plan = assert_ok!(engine(Dialect::Postgresql, 4).update_many(&samples()));
    assert_eq!(plan.len(), 3);
}

#[test]
fn deletes_batch_keys() {
    let plan = assert_ok!(engine(Dialect::Sqlite, 4).delete_many::<Sample>(1..=10i64));

    assert_eq!(param_counts(&plan), [4, 4, 2]);
    assert_eq!(
        plan.plans[2].as_statement().unwrap().sql,
        r#"DELETE FROM "Sample" WHERE "Id" IN (?1, ?2);"#
    );
}

#[test]
fn bulk_load_uses_writable_columns_by_default() {
    let plan = assert_ok!(engine(Dialect::Postgresql, 4).bulk_insert(&people(10), None));

    assert_eq!(plan.len(), 3);

    let SubPlan::Bulk(first) = &plan.plans[0] else {
        panic!("expected a bulk sub-plan");
    };
    assert_eq!(first.table, "Person");
    assert_eq!(first.columns, ["name", "age", "email", "status"]);
    assert_eq!(first.rows.len(), 4);
    assert_eq!(first.rows[0][0], Value::from("p1"));
    assert_eq!(first.rows[0][1], Value::I32(21));

    assert_eq!(plan.plans[2].as_bulk().unwrap().rows.len(), 2);
}

#[test]
fn bulk_load_follows_the_column_map() {
    let mapping = [
        ColumnMapping::new("age", "age"),
        ColumnMapping::new("Name", "NAME"),
    ];

    let plan = assert_ok!(engine(Dialect::Mysql, 10).bulk_insert(&people(2), Some(&mapping)));

    let bulk = plan.plans[0].as_bulk().unwrap();
    assert_eq!(bulk.columns, ["age", "name"]);
    assert_eq!(bulk.rows, [
        vec![Value::I32(21), Value::from("p1")],
        vec![Value::I32(22), Value::from("p2")],
    ]);
}

#[test]
fn bulk_load_requires_driver_support() {
    // Checked before any row is converted
    let err = assert_err!(engine(Dialect::Sqlite, 10).bulk_insert::<Person>(&[], None));
    assert!(err.is_invalid_operation(), "{err}");
}

#[test]
fn bulk_mapping_errors() {
    let engine = engine(Dialect::Postgresql, 10);

    let err = assert_err!(engine.bulk_insert::<Person>(&[], Some(&[ColumnMapping::new("nope", "name")])));
    assert!(err.is_invalid_bulk_mapping(), "{err}");
    assert!(err.to_string().contains("source"), "{err}");

    let err = assert_err!(engine.bulk_insert::<Person>(&[], Some(&[ColumnMapping::new("name", "nope")])));
    assert!(err.is_invalid_bulk_mapping(), "{err}");
    assert!(err.to_string().contains("destination"), "{err}");

    let err = assert_err!(engine.bulk_insert::<Person>(
        &[],
        Some(&[
            ColumnMapping::new("name", "name"),
            ColumnMapping::new("email", "NAME"),
        ])
    ));
    assert!(err.is_invalid_bulk_mapping(), "{err}");
    assert!(err.to_string().contains("duplicate"), "{err}");

    let err = assert_err!(engine.bulk_insert::<Person>(&[], Some(&[])));
    assert!(err.is_invalid_operation(), "{err}");
}

#[test]
fn bulk_load_into_an_unresolved_table_fails() {
    let engine = engine(Dialect::SqlServer, 10);

    let err = assert_err!(engine
        .table("staging")
        .known_columns(KnownColumns::default())
        .bulk_insert(&[Record::new().with("Id", 1i64)], None));
    assert!(err.is_invalid_operation(), "{err}");
}

#[test]
fn dynamic_bulk_load_maps_to_known_columns() {
    let engine = engine(Dialect::SqlServer, 10);
    let known = KnownColumns::new([
        KnownColumn::new("Id").primary_key().identity(),
        KnownColumn::new("Message"),
    ]);

    let records = [
        Record::new().with("Id", 1i64).with("message", "a").with("extra", true),
        Record::new().with("Id", 2i64).with("message", "b").with("extra", false),
    ];

    let plan = assert_ok!(engine.table("audit").known_columns(known).bulk_insert(&records, None));

    let bulk = plan.plans[0].as_bulk().unwrap();
    assert_eq!(bulk.table, "audit");
    assert_eq!(bulk.columns, ["Message"]);
    assert_eq!(bulk.rows, [vec![Value::from("a")], vec![Value::from("b")]]);
}
