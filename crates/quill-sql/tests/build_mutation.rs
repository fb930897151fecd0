use pretty_assertions::assert_eq;
use quill_core::{
    filter::{Group, Leaf, Predicate},
    schema::{EntityDef, EntityShape, MemberDef, NamingConvention, ShapeIdentity, ShapeKey},
    stmt::{Type, Value},
};
use quill_sql::{build, Operation, Options, ResultShape, Serializer, StatementPlan};
use std_util::prelude::*;

fn shape(def: EntityDef) -> EntityShape {
    let key = ShapeKey {
        identity: ShapeIdentity::Dynamic {
            table: def.name.clone(),
            fields: def.members.iter().map(|m| m.name.clone()).collect(),
        },
        known_columns: None,
    };

    assert_ok!(EntityShape::from_def(
        key,
        &def,
        &NamingConvention::default(),
        None
    ))
}

fn person() -> EntityShape {
    shape(
        EntityDef::new("Person")
            .member(MemberDef::new("Id", Type::I64).auto())
            .member(MemberDef::new("Name", Type::String))
            .member(MemberDef::new("Age", Type::I32))
            .member(MemberDef::new("Email", Type::String).nullable())
            .member(MemberDef::new("CreatedAt", Type::String).read_only()),
    )
}

fn membership() -> EntityShape {
    shape(
        EntityDef::new("Membership")
            .member(MemberDef::new("UserId", Type::I64).key())
            .member(MemberDef::new("GroupId", Type::I64).key())
            .member(MemberDef::new("Role", Type::String)),
    )
}

fn log_line() -> EntityShape {
    shape(
        EntityDef::new("LogLine")
            .member(MemberDef::new("Message", Type::String))
            .member(MemberDef::new("Level", Type::I32)),
    )
}

fn row(id: impl Into<Value>, name: &str, age: i32) -> Vec<Value> {
    vec![
        id.into(),
        name.into(),
        age.into(),
        Value::Null,
        Value::Null,
    ]
}

fn run(serializer: &Serializer<'_>, operation: Operation) -> StatementPlan {
    assert_ok!(build(
        serializer,
        &person(),
        operation,
        None,
        &Options::default()
    ))
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

#[test]
fn insert_skips_identity_and_read_only_columns() {
    let plan = run(&Serializer::sqlite(), Operation::insert(row(Value::Null, "Ann", 30)));

    assert_eq!(
        plan.sql,
        r#"INSERT INTO "Person" ("Name", "Age", "Email") VALUES (?1, ?2, ?3) RETURNING "Id";"#
    );
    assert_eq!(
        plan.values().cloned().collect::<Vec<_>>(),
        [Value::from("Ann"), Value::I32(30), Value::Null]
    );
    assert_eq!(plan.result, ResultShape::Scalar(Type::I64));
}

#[test]
fn insert_returns_identity_per_dialect() {
    let plan = run(
        &Serializer::sql_server(),
        Operation::insert(row(Value::Null, "Ann", 30)),
    );
    assert_eq!(
        plan.sql,
        "INSERT INTO [Person] ([Name], [Age], [Email]) OUTPUT INSERTED.[Id] VALUES (@Name, @Age, @Email);"
    );

    let plan = run(&Serializer::mysql(), Operation::insert(row(Value::Null, "Ann", 30)));
    assert_eq!(
        plan.sql,
        "INSERT INTO `Person` (`Name`, `Age`, `Email`) VALUES (?, ?, ?);"
    );
    assert_eq!(plan.params[1].placeholder, "?");
    assert_eq!(plan.result, ResultShape::LastInsertId);
}

#[test]
fn insert_casts_values_to_column_types() {
    let mut values = row(Value::Null, "Ann", 0);
    values[2] = Value::I64(30);

    let plan = run(&Serializer::sqlite(), Operation::insert(values));
    assert_eq!(plan.params[1].value, Value::I32(30));

    let mut values = row(Value::Null, "Ann", 0);
    values[2] = Value::from("thirty");

    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::insert(values),
        None,
        &Options::default(),
    ));
    assert!(err.is_conversion());
    assert!(err.to_string().contains("`Person.Age`"));
}

#[test]
fn insert_with_only_generated_columns() {
    let counter = shape(EntityDef::new("Counter").member(MemberDef::new("Id", Type::I64).auto()));
    let insert = |serializer: &Serializer<'_>| {
        assert_ok!(build(
            serializer,
            &counter,
            Operation::insert(vec![Value::Null]),
            None,
            &Options::default()
        ))
        .sql
    };

    assert_eq!(
        insert(&Serializer::postgresql()),
        r#"INSERT INTO "Counter" DEFAULT VALUES RETURNING "Id";"#
    );
    assert_eq!(
        insert(&Serializer::sql_server()),
        "INSERT INTO [Counter] OUTPUT INSERTED.[Id] DEFAULT VALUES;"
    );
    assert_eq!(insert(&Serializer::mysql()), "INSERT INTO `Counter` () VALUES ();");
}

#[test]
fn insert_many_uses_one_multi_row_statement() {
    let plan = run(
        &Serializer::postgresql(),
        Operation::InsertMany {
            rows: vec![row(Value::Null, "Ann", 30), row(Value::Null, "Bob", 40)],
        },
    );

    assert_eq!(
        plan.sql,
        r#"INSERT INTO "Person" ("Name", "Age", "Email") VALUES ($1, $2, $3), ($4, $5, $6) RETURNING "Id";"#
    );
    assert_eq!(
        plan.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        ["Name", "Age", "Email", "Name_1", "Age_1", "Email_1"]
    );
    assert_eq!(plan.result, ResultShape::Rows(vec!["Id".to_string()]));
}

#[test]
fn row_with_wrong_arity_is_rejected() {
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::insert(vec![Value::from("Ann")]),
        None,
        &Options::default(),
    ));

    assert!(err.is_invalid_operation());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_is_scoped_by_primary_key() {
    let plan = run(&Serializer::sqlite(), Operation::update(row(7i64, "Ann", 31)));

    assert_eq!(
        plan.sql,
        r#"UPDATE "Person" SET "Name" = ?1, "Age" = ?2, "Email" = ?3 WHERE "Id" = ?4;"#
    );
    assert_eq!(plan.params[3].value, Value::I64(7));
    assert_eq!(plan.result, ResultShape::RowsAffected);
}

#[test]
fn update_with_filter_renames_colliding_parameters() {
    let filter = Leaf::lt("Age", 18i32).into();
    let plan = assert_ok!(build(
        &Serializer::sql_server(),
        &person(),
        Operation::update(row(Value::Null, "minor", 17)),
        Some(&filter),
        &Options::default()
    ));

    assert_eq!(
        plan.sql,
        "UPDATE [Person] SET [Name] = @Name, [Age] = @Age, [Email] = @Email WHERE [Age] < @Age_1;"
    );
}

#[test]
fn update_without_scope_is_ambiguous() {
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::update(row(Value::Null, "Ann", 31)),
        None,
        &Options::default(),
    ));
    assert!(err.is_ambiguous_scope());

    let err = assert_err!(build(
        &Serializer::sqlite(),
        &log_line(),
        Operation::update(vec![Value::from("hello"), Value::I32(1)]),
        None,
        &Options::default(),
    ));
    assert!(err.is_ambiguous_scope());
}

#[test]
fn update_all_has_no_where_clause() {
    let plan = run(
        &Serializer::mysql(),
        Operation::UpdateAll {
            row: row(Value::Null, "Ann", 31),
        },
    );

    assert_eq!(
        plan.sql,
        "UPDATE `Person` SET `Name` = ?, `Age` = ?, `Email` = ?;"
    );
}

#[test]
fn update_many_is_a_batch_of_keyed_updates() {
    let plan = run(
        &Serializer::postgresql(),
        Operation::UpdateMany {
            rows: vec![row(1i64, "Ann", 31), row(2i64, "Bob", 41)],
        },
    );

    assert_eq!(
        plan.sql,
        r#"UPDATE "Person" SET "Name" = $1, "Age" = $2, "Email" = $3 WHERE "Id" = $4; UPDATE "Person" SET "Name" = $5, "Age" = $6, "Email" = $7 WHERE "Id" = $8;"#
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_requires_a_filter() {
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::Delete,
        None,
        &Options::default(),
    ));
    assert!(err.is_ambiguous_scope());

    let everything = Group::and(Vec::<Predicate>::new()).into();
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::Delete,
        Some(&everything),
        &Options::default(),
    ));
    assert!(err.is_ambiguous_scope());
}

#[test]
fn delete_with_filter() {
    let filter = Leaf::is_null("Email").into();
    let plan = assert_ok!(build(
        &Serializer::sql_server(),
        &person(),
        Operation::Delete,
        Some(&filter),
        &Options::default()
    ));

    assert_eq!(plan.sql, "DELETE FROM [Person] WHERE [Email] IS NULL;");
    assert!(plan.params.is_empty());

    let plan = run(&Serializer::sqlite(), Operation::DeleteAll);
    assert_eq!(plan.sql, r#"DELETE FROM "Person";"#);
}

#[test]
fn delete_many_by_single_key() {
    let plan = run(
        &Serializer::sqlite(),
        Operation::DeleteMany {
            keys: vec![1i64.into(), 2i64.into(), 3i32.into()],
        },
    );

    assert_eq!(plan.sql, r#"DELETE FROM "Person" WHERE "Id" IN (?1, ?2, ?3);"#);
    assert_eq!(plan.params[2].value, Value::I64(3));
}

#[test]
fn delete_many_by_composite_key() {
    let plan = assert_ok!(build(
        &Serializer::sqlite(),
        &membership(),
        Operation::DeleteMany {
            keys: vec![Value::list([1i64, 2]), Value::list([3i64, 4])],
        },
        None,
        &Options::default()
    ));

    assert_eq!(
        plan.sql,
        r#"DELETE FROM "Membership" WHERE ("UserId" = ?1 AND "GroupId" = ?2) OR ("UserId" = ?3 AND "GroupId" = ?4);"#
    );

    let err = assert_err!(build(
        &Serializer::sqlite(),
        &membership(),
        Operation::DeleteMany {
            keys: vec![Value::I64(1)],
        },
        None,
        &Options::default(),
    ));
    assert!(err.is_invalid_operation());
}

#[test]
fn delete_many_without_primary_key() {
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &log_line(),
        Operation::DeleteMany {
            keys: vec![Value::I64(1)],
        },
        None,
        &Options::default(),
    ));

    assert!(err.is_primary_key_not_found());
}

#[test]
fn truncate_per_dialect() {
    assert_eq!(
        run(&Serializer::sqlite(), Operation::Truncate).sql,
        r#"DELETE FROM "Person";"#
    );
    assert_eq!(
        run(&Serializer::postgresql(), Operation::Truncate).sql,
        r#"TRUNCATE TABLE "Person";"#
    );
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[test]
fn upsert_on_conflict() {
    let plan = run(&Serializer::postgresql(), Operation::upsert(row(7i64, "Ann", 30)));

    assert_eq!(
        plan.sql,
        r#"INSERT INTO "Person" ("Id", "Name", "Age", "Email") VALUES ($1, $2, $3, $4) ON CONFLICT ("Id") DO UPDATE SET "Name" = EXCLUDED."Name", "Age" = EXCLUDED."Age", "Email" = EXCLUDED."Email" RETURNING "Id";"#
    );
    assert_eq!(plan.result, ResultShape::Scalar(Type::I64));
}

#[test]
fn upsert_on_duplicate_key() {
    let plan = run(&Serializer::mysql(), Operation::upsert(row(7i64, "Ann", 30)));

    assert_eq!(
        plan.sql,
        "INSERT INTO `Person` (`Id`, `Name`, `Age`, `Email`) VALUES (?, ?, ?, ?) ON DUPLICATE KEY UPDATE \
         `Id` = LAST_INSERT_ID(`Id`), `Name` = VALUES(`Name`), `Age` = VALUES(`Age`), `Email` = VALUES(`Email`);"
    );
    assert_eq!(plan.result, ResultShape::LastInsertId);
}

#[test]
fn upsert_as_merge() {
    let plan = run(
        &Serializer::sql_server(),
        Operation::upsert(row(Value::Null, "Ann", 30)),
    );

    assert_eq!(
        plan.sql,
        "MERGE INTO [Person] AS T USING (SELECT @Id AS [Id], @Name AS [Name], @Age AS [Age], @Email AS [Email]) AS S \
         ON (T.[Id] = S.[Id]) \
         WHEN MATCHED THEN UPDATE SET T.[Name] = S.[Name], T.[Age] = S.[Age], T.[Email] = S.[Email] \
         WHEN NOT MATCHED THEN INSERT ([Name], [Age], [Email]) VALUES (S.[Name], S.[Age], S.[Email]) \
         OUTPUT INSERTED.[Id];"
    );
}

#[test]
fn upsert_with_custom_qualifiers() {
    let plan = assert_ok!(build(
        &Serializer::postgresql(),
        &person(),
        Operation::upsert(row(Value::Null, "Ann", 30)),
        None,
        &Options::new().qualifiers(["email"])
    ));

    assert_eq!(
        plan.sql,
        r#"INSERT INTO "Person" ("Name", "Age", "Email") VALUES ($1, $2, $3) ON CONFLICT ("Email") DO UPDATE SET "Name" = EXCLUDED."Name", "Age" = EXCLUDED."Age" RETURNING "Id";"#
    );
}

#[test]
fn upsert_requires_a_primary_key() {
    let err = assert_err!(build(
        &Serializer::postgresql(),
        &log_line(),
        Operation::upsert(vec![Value::from("hello"), Value::I32(1)]),
        None,
        &Options::default(),
    ));

    assert!(err.is_primary_key_not_found());
}

#[test]
fn merge_many_batches_upserts() {
    let plan = run(
        &Serializer::sqlite(),
        Operation::MergeMany {
            rows: vec![row(1i64, "Ann", 30), row(2i64, "Bob", 40)],
        },
    );

    assert_eq!(plan.sql.matches("INSERT INTO").count(), 2);
    assert_eq!(plan.params.len(), 8);
    assert_eq!(plan.result, ResultShape::Rows(vec!["Id".to_string()]));
}
