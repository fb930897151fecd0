use quill_core::schema::*;
use quill_core::stmt::{Record, Type};
use std::any::TypeId;
use std_util::prelude::*;

struct Person;

fn key<T: 'static>() -> ShapeKey {
    ShapeKey {
        identity: ShapeIdentity::Type(TypeId::of::<T>()),
        known_columns: None,
    }
}

fn person() -> EntityDef {
    EntityDef::new("Person")
        .member(MemberDef::new("PersonId", Type::I64).auto())
        .member(MemberDef::new("Name", Type::String))
        .member(MemberDef::new("Nickname", Type::String).nullable().column("nick"))
        .member(MemberDef::new("CreatedAt", Type::String).read_only())
}

fn shape(def: &EntityDef, convention: &NamingConvention) -> EntityShape {
    assert_ok!(EntityShape::from_def(key::<Person>(), def, convention, None))
}

// ---------------------------------------------------------------------------
// Table and column naming
// ---------------------------------------------------------------------------

#[test]
fn table_defaults_to_entity_name() {
    let shape = shape(&person(), &NamingConvention::default());
    assert_eq!(shape.table, "Person");
}

#[test]
fn explicit_table_wins_over_convention() {
    let convention = NamingConvention {
        table: TableNaming::PluralSnakeCase,
        ..NamingConvention::default()
    };

    assert_eq!(shape(&person(), &convention).table, "people");
    assert_eq!(shape(&person().table("tbl_person"), &convention).table, "tbl_person");
}

#[test]
fn explicit_column_wins_over_convention() {
    let convention = NamingConvention {
        column: ColumnNaming::SnakeCase,
        ..NamingConvention::default()
    };
    let shape = shape(&person(), &convention);

    let names = shape.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["person_id", "name", "nick", "created_at"]);
}

#[test]
fn columns_resolve_by_member_or_column_name_ignoring_case() {
    let shape = shape(&person(), &NamingConvention::default());

    assert_eq!(shape.column("NICK").unwrap().member.name, "Nickname");
    assert_eq!(shape.column("nickname").unwrap().name, "nick");
    assert!(shape.column("Missing").is_none());

    let err = assert_err!(shape.column_or_err("Missing"));
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "mapping error on `Person.Missing`: no column of table `Person` matches the field"
    );
}

// ---------------------------------------------------------------------------
// Primary key and identity
// ---------------------------------------------------------------------------

#[test]
fn primary_key_by_type_name_convention() {
    let shape = shape(&person(), &NamingConvention::default());

    assert_eq!(shape.primary_key, [0]);
    assert!(shape.columns[0].primary_key);
    assert_eq!(shape.identity, Some(0));
}

#[test]
fn primary_key_by_snake_case_convention() {
    let def = EntityDef::new("Person")
        .member(MemberDef::new("name", Type::String))
        .member(MemberDef::new("person_id", Type::I64));

    assert_eq!(shape(&def, &NamingConvention::default()).primary_key, [1]);
}

#[test]
fn id_beats_type_name_convention() {
    let def = EntityDef::new("Person")
        .member(MemberDef::new("PersonId", Type::I64))
        .member(MemberDef::new("Id", Type::I64));

    assert_eq!(shape(&def, &NamingConvention::default()).primary_key, [1]);
}

#[test]
fn explicit_key_wins_over_convention() {
    let def = EntityDef::new("Order")
        .member(MemberDef::new("Id", Type::I64))
        .member(MemberDef::new("Region", Type::String).key())
        .member(MemberDef::new("Number", Type::I64).key());

    let shape = shape(&def, &NamingConvention::default());
    assert_eq!(shape.primary_key, [1, 2]);
    assert!(!shape.columns[0].primary_key);
}

#[test]
fn missing_primary_key_is_reported_when_required() {
    let def = EntityDef::new("Log").member(MemberDef::new("Message", Type::String));
    let shape = shape(&def, &NamingConvention::default());

    assert!(!shape.has_primary_key());
    let err = assert_err!(shape.primary_key_or_err("delete by key"));
    assert!(err.is_primary_key_not_found());
}

#[test]
fn writable_columns_skip_identity_and_read_only() {
    let shape = shape(&person(), &NamingConvention::default());

    let insertable = shape.insertable_columns().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(insertable, ["Name", "nick"]);
}

#[test]
fn updatable_columns_also_skip_the_key() {
    let def = EntityDef::new("Tag")
        .member(MemberDef::new("Code", Type::String).key())
        .member(MemberDef::new("Label", Type::String))
        .member(MemberDef::new("CreatedAt", Type::String).read_only());
    let shape = shape(&def, &NamingConvention::default());

    let insertable = shape.insertable_columns().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(insertable, ["Code", "Label"]);

    let updatable = shape.updatable_columns().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(updatable, ["Label"]);
}

// ---------------------------------------------------------------------------
// Known columns
// ---------------------------------------------------------------------------

fn dynamic_key(table: &str, record: &Record, known: &KnownColumns) -> ShapeKey {
    ShapeKey {
        identity: ShapeIdentity::Dynamic {
            table: table.to_string(),
            fields: record.field_names().map(String::from).collect(),
        },
        known_columns: Some(known.fingerprint()),
    }
}

#[test]
fn known_columns_drop_unmatched_fields_and_supply_flags() {
    let record = quill_core::record! {
        "code" => "A1",
        "Extra" => 1i32,
        "qty" => 5i32,
    };
    let known = KnownColumns::new([
        KnownColumn::new("Code").ty(Type::String).primary_key(),
        KnownColumn::new("Qty").ty(Type::I32),
        KnownColumn::new("RowId").ty(Type::I64).identity(),
    ]);

    let def = EntityDef::from_record("Stock", &record);
    let shape = assert_ok!(EntityShape::from_dynamic(
        dynamic_key("Stock", &record, &known),
        &def,
        &NamingConvention::default(),
        Some(&known),
    ));

    let names = shape.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Code", "Qty"]);
    assert_eq!(shape.primary_key, [0]);
    assert_eq!(shape.identity, None);
}

#[test]
fn known_key_flag_beats_id_convention() {
    let record = quill_core::record! {
        "OrderNo" => 7i32,
        "Id" => 99i64,
    };
    let known = KnownColumns::new([
        KnownColumn::new("OrderNo").primary_key(),
        KnownColumn::new("Id"),
    ]);

    let def = EntityDef::from_record("Orders", &record);
    let shape = assert_ok!(EntityShape::from_dynamic(
        dynamic_key("Orders", &record, &known),
        &def,
        &NamingConvention::default(),
        Some(&known),
    ));

    assert_eq!(shape.primary_key, [0]);
    assert!(!shape.columns[1].primary_key);
}

#[test]
fn null_fields_take_known_column_type() {
    let record = quill_core::record! { "Qty" => quill_core::stmt::Value::Null };
    let known = KnownColumns::new([KnownColumn::new("Qty").ty(Type::I32)]);

    let def = EntityDef::from_record("Stock", &record);
    let shape = assert_ok!(EntityShape::from_dynamic(
        dynamic_key("Stock", &record, &known),
        &def,
        &NamingConvention::default(),
        Some(&known),
    ));

    assert_eq!(shape.columns[0].ty, Type::I32);
}

#[test]
fn empty_known_columns_means_unresolved_table() {
    let record = quill_core::record! { "Qty" => 1i32 };
    let known = KnownColumns::default();

    let def = EntityDef::from_record("Nowhere", &record);
    let err = assert_err!(EntityShape::from_dynamic(
        dynamic_key("Nowhere", &record, &known),
        &def,
        &NamingConvention::default(),
        Some(&known),
    ));

    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "mapping error on `Nowhere`: table `Nowhere` could not be resolved"
    );
}

#[test]
fn no_matching_columns_is_a_mapping_error() {
    let record = quill_core::record! { "Other" => 1i32 };
    let known = KnownColumns::new([KnownColumn::new("Qty")]);

    let def = EntityDef::from_record("Stock", &record);
    let err = assert_err!(EntityShape::from_dynamic(
        dynamic_key("Stock", &record, &known),
        &def,
        &NamingConvention::default(),
        Some(&known),
    ));

    assert_eq!(
        err.to_string(),
        "mapping error on `Stock`: entity has no usable columns"
    );
}
