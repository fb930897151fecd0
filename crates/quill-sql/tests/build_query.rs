use pretty_assertions::assert_eq;
use quill_core::{
    filter::{Leaf, Predicate},
    schema::{EntityDef, EntityShape, MemberDef, NamingConvention, ShapeIdentity, ShapeKey},
    stmt::{Type, Value},
};
use quill_sql::{
    build,
    stmt::{Aggregate, OrderBy},
    Operation, Options, ResultShape, Serializer, StatementPlan,
};
use std::any::TypeId;
use std_util::prelude::*;

struct Person;

fn person() -> EntityShape {
    let def = EntityDef::new("Person")
        .member(MemberDef::new("Id", Type::I64).auto())
        .member(MemberDef::new("Name", Type::String))
        .member(MemberDef::new("Age", Type::I32))
        .member(MemberDef::new("Email", Type::String).nullable())
        .member(MemberDef::new("CreatedAt", Type::String).read_only());

    let key = ShapeKey {
        identity: ShapeIdentity::Type(TypeId::of::<Person>()),
        known_columns: None,
    };

    assert_ok!(EntityShape::from_def(
        key,
        &def,
        &NamingConvention::default(),
        None
    ))
}

fn select(
    serializer: &Serializer<'_>,
    filter: Option<Predicate>,
    options: &Options,
) -> StatementPlan {
    assert_ok!(build(
        serializer,
        &person(),
        Operation::Select,
        filter.as_ref(),
        options
    ))
}

#[test]
fn select_every_column() {
    let filter = Leaf::gt("Age", 5i32).into();
    let plan = select(&Serializer::sqlite(), Some(filter), &Options::default());

    assert_eq!(
        plan.sql,
        r#"SELECT "Id", "Name", "Age", "Email", "CreatedAt" FROM "Person" WHERE "Age" > ?1;"#
    );
    assert_eq!(plan.params.len(), 1);
    assert_eq!(plan.params[0].placeholder, "?1");
    assert_eq!(plan.params[0].name, "Age");
    assert_eq!(plan.params[0].value, Value::I32(5));
    assert_eq!(plan.params[0].ty, Type::I32);
    assert_eq!(
        plan.result,
        ResultShape::Rows(
            ["Id", "Name", "Age", "Email", "CreatedAt"]
                .map(String::from)
                .to_vec()
        )
    );
}

#[test]
fn select_fields_order_and_limit() {
    let filter = Predicate::and(Leaf::eq("Name", "Ann"), Leaf::ge("Age", 18i32));
    let options = Options::new()
        .fields(["name", "age"])
        .order_by(OrderBy::desc("age"))
        .limit(10);

    let plan = select(&Serializer::postgresql(), Some(filter), &options);

    assert_eq!(
        plan.sql,
        r#"SELECT "Name", "Age" FROM "Person" WHERE "Name" = $1 AND "Age" >= $2 ORDER BY "Age" DESC LIMIT 10;"#
    );
    assert_eq!(
        plan.values().cloned().collect::<Vec<_>>(),
        [Value::from("Ann"), Value::I32(18)]
    );
}

#[test]
fn select_limit_on_sql_server_uses_top() {
    let plan = select(&Serializer::sql_server(), None, &Options::new().limit(5));

    assert_eq!(
        plan.sql,
        "SELECT TOP (5) [Id], [Name], [Age], [Email], [CreatedAt] FROM [Person];"
    );
}

#[test]
fn paged_select_per_dialect() {
    let options = Options::new().order_by(OrderBy::asc("Id"));
    let page = Operation::SelectPaged {
        page: 2,
        rows_per_batch: 20,
    };

    let plan = assert_ok!(build(
        &Serializer::sql_server(),
        &person(),
        page.clone(),
        None,
        &options
    ));
    assert_eq!(
        plan.sql,
        "SELECT [Id], [Name], [Age], [Email], [CreatedAt] FROM [Person] \
         ORDER BY [Id] ASC OFFSET 40 ROWS FETCH NEXT 20 ROWS ONLY;"
    );

    let plan = assert_ok!(build(&Serializer::mysql(), &person(), page, None, &options));
    assert_eq!(
        plan.sql,
        "SELECT `Id`, `Name`, `Age`, `Email`, `CreatedAt` FROM `Person` \
         ORDER BY `Id` ASC LIMIT 20 OFFSET 40;"
    );
}

#[test]
fn paged_select_breaks_ties_on_the_primary_key() {
    let page = Operation::SelectPaged {
        page: 1,
        rows_per_batch: 5,
    };

    let options = Options::new().order_by(OrderBy::desc("Age"));
    let plan = assert_ok!(build(&Serializer::sqlite(), &person(), page.clone(), None, &options));
    assert!(
        plan.sql.ends_with(r#"ORDER BY "Age" DESC, "Id" ASC LIMIT 5 OFFSET 5;"#),
        "{}",
        plan.sql
    );

    // An explicit key order is kept as given
    let options = Options::new().order_by(OrderBy::desc("id"));
    let plan = assert_ok!(build(&Serializer::sqlite(), &person(), page, None, &options));
    assert!(
        plan.sql.ends_with(r#"ORDER BY "Id" DESC LIMIT 5 OFFSET 5;"#),
        "{}",
        plan.sql
    );
}

#[test]
fn paged_select_requires_order() {
    let page = Operation::SelectPaged {
        page: 0,
        rows_per_batch: 10,
    };

    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        page,
        None,
        &Options::default()
    ));
    assert!(err.is_invalid_operation());
}

#[test]
fn table_hints_per_dialect() {
    let filter = Leaf::eq("Id", 1i64).into();

    let plan = select(
        &Serializer::sql_server(),
        Some(filter),
        &Options::new().hint("nolock"),
    );
    assert_eq!(
        plan.sql,
        "SELECT [Id], [Name], [Age], [Email], [CreatedAt] FROM [Person] WITH (NOLOCK) WHERE [Id] = @Id;"
    );

    let filter = Leaf::eq("Id", 1i64).into();
    let plan = select(
        &Serializer::postgresql(),
        Some(filter),
        &Options::new().hint("for update"),
    );
    assert_eq!(
        plan.sql,
        r#"SELECT "Id", "Name", "Age", "Email", "CreatedAt" FROM "Person" WHERE "Id" = $1 FOR UPDATE;"#
    );
}

#[test]
fn unknown_table_hint_is_rejected() {
    let err = assert_err!(build(
        &Serializer::postgresql(),
        &person(),
        Operation::Select,
        None,
        &Options::new().hint("NOLOCK"),
    ));

    assert!(err.is_invalid_operation());
    assert!(err
        .to_string()
        .contains("unknown table hint `NOLOCK` for PostgreSQL"));
}

#[test]
fn repeated_column_gets_distinct_parameter_names() {
    let filter = Predicate::or(Leaf::eq("Age", 30i32), Leaf::eq("Age", 40i32));
    let plan = select(&Serializer::sql_server(), Some(filter), &Options::default());

    assert!(plan.sql.ends_with("WHERE [Age] = @Age OR [Age] = @Age_1;"));
    assert_eq!(
        plan.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        ["Age", "Age_1"]
    );
}

#[test]
fn bound_leaf_uses_its_parameter_name() {
    let filter = Leaf::ge("Age", 21i32).bind("minAge").into();
    let plan = select(&Serializer::sql_server(), Some(filter), &Options::default());

    assert!(plan.sql.ends_with("WHERE [Age] >= @minAge;"));
}

#[test]
fn bound_leaf_used_twice_gets_distinct_parameter_names() {
    let leaf = Leaf::ge("Age", 21i32).bind("minAge");
    let filter = Predicate::or(leaf.clone(), leaf);
    let plan = select(&Serializer::sql_server(), Some(filter), &Options::default());

    assert!(plan.sql.ends_with("WHERE [Age] >= @minAge OR [Age] >= @minAge_1;"));
    assert_eq!(
        plan.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        ["minAge", "minAge_1"]
    );
}

#[test]
fn rebuilding_a_predicate_starts_from_fresh_names() {
    let filter = Predicate::and(
        Leaf::ge("Age", 21i32).bind("minAge"),
        Leaf::eq("Name", "Ann"),
    );
    let original = filter.clone();

    let first = select(&Serializer::sql_server(), Some(filter.clone()), &Options::default());
    let second = select(&Serializer::sql_server(), Some(filter.clone()), &Options::default());

    assert_eq!(first, second);
    assert!(first.sql.ends_with("WHERE [Age] >= @minAge AND [Name] = @Name;"));
    assert_eq!(filter, original);
}

#[test]
fn nested_groups_are_parenthesized() {
    let filter = Predicate::or(
        Predicate::and(Leaf::gt("Age", 18i32), Leaf::is_null("Email")),
        Leaf::eq("Name", "root"),
    );
    let plan = select(&Serializer::sqlite(), Some(filter), &Options::default());

    assert!(plan
        .sql
        .ends_with(r#"WHERE ("Age" > ?1 AND "Email" IS NULL) OR "Name" = ?2;"#));
}

#[test]
fn long_in_list_is_chunked_without_array_parameters() {
    let filter = Leaf::in_list("Id", 0..1001i64).into();
    let plan = select(&Serializer::sqlite(), Some(filter), &Options::default());

    assert_eq!(plan.params.len(), 1001);
    assert!(plan.sql.contains(r#"WHERE ("Id" IN (?1, ?2, "#));
    assert!(plan.sql.ends_with(r#"?1000) OR "Id" IN (?1001));"#));
}

#[test]
fn long_in_list_binds_one_array_on_postgres() {
    let filter = Leaf::in_list("Id", 0..1001i64).into();
    let plan = select(&Serializer::postgresql(), Some(filter), &Options::default());

    assert!(plan.sql.ends_with(r#"WHERE "Id" = ANY($1);"#));
    assert_eq!(plan.params.len(), 1);
    assert_eq!(plan.params[0].ty, Type::list(Type::I64));
}

#[test]
fn too_many_parameters_is_rejected() {
    let filter = Leaf::in_list("Id", 0..2101i64).into();
    let err = assert_err!(build(
        &Serializer::sql_server(),
        &person(),
        Operation::Select,
        Some(&filter),
        &Options::default(),
    ));

    assert!(err.is_invalid_operation());
}

#[test]
fn unknown_filter_field_is_a_mapping_error() {
    let filter = Leaf::eq("Salary", 10i32).into();
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::Select,
        Some(&filter),
        &Options::default(),
    ));

    assert!(err.is_mapping());
}

#[test]
fn count_rows() {
    let plan = assert_ok!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::count(),
        None,
        &Options::default()
    ));
    assert_eq!(plan.sql, r#"SELECT COUNT(*) FROM "Person";"#);
    assert_eq!(plan.result, ResultShape::Scalar(Type::I64));

    let plan = assert_ok!(build(
        &Serializer::sql_server(),
        &person(),
        Operation::count(),
        None,
        &Options::default()
    ));
    assert_eq!(plan.sql, "SELECT COUNT_BIG(*) FROM [Person];");
}

#[test]
fn average_of_integers_keeps_the_fraction() {
    let plan = assert_ok!(build(
        &Serializer::postgresql(),
        &person(),
        Operation::aggregate(Aggregate::Avg, "Age"),
        None,
        &Options::default()
    ));

    assert_eq!(
        plan.sql,
        r#"SELECT AVG(CAST("Age" AS DOUBLE PRECISION)) FROM "Person";"#
    );
    assert_eq!(plan.result, ResultShape::Scalar(Type::F64));
}

#[test]
fn sum_min_and_max_result_types() {
    let build_aggregate = |func, field| {
        assert_ok!(build(
            &Serializer::mysql(),
            &person(),
            Operation::aggregate(func, field),
            None,
            &Options::default()
        ))
    };

    let plan = build_aggregate(Aggregate::Sum, "Age");
    assert_eq!(plan.sql, "SELECT SUM(`Age`) FROM `Person`;");
    assert_eq!(plan.result, ResultShape::Scalar(Type::I64));

    let plan = build_aggregate(Aggregate::Max, "Name");
    assert_eq!(plan.sql, "SELECT MAX(`Name`) FROM `Person`;");
    assert_eq!(plan.result, ResultShape::Scalar(Type::String));
}

#[test]
fn sum_of_text_is_rejected() {
    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::aggregate(Aggregate::Sum, "Name"),
        None,
        &Options::default(),
    ));
    assert!(err.is_invalid_operation());

    let err = assert_err!(build(
        &Serializer::sqlite(),
        &person(),
        Operation::Aggregate {
            func: Aggregate::Max,
            field: None,
        },
        None,
        &Options::default(),
    ));
    assert!(err.is_invalid_operation());
}
