use pretty_assertions::assert_eq;
use quill_core::filter::*;
use quill_core::schema::*;
use quill_core::stmt::{Expr, Type, Value};
use std::any::TypeId;
use std_util::prelude::*;

struct Item;

fn shape() -> EntityShape {
    let def = EntityDef::new("Item")
        .member(MemberDef::new("Id", Type::I32))
        .member(MemberDef::new("ColumnInt", Type::I32))
        .member(MemberDef::new("Name", Type::String).nullable())
        .member(MemberDef::new("Active", Type::Bool));

    let key = ShapeKey {
        identity: ShapeIdentity::Type(TypeId::of::<Item>()),
        known_columns: None,
    };

    assert_ok!(EntityShape::from_def(key, &def, &NamingConvention::default(), None))
}

fn translate(input: impl Into<Where>) -> Predicate {
    assert_ok!(quill_core::filter::translate(&shape(), &input.into()))
}

fn translate_err(input: impl Into<Where>) -> quill_core::Error {
    assert_err!(quill_core::filter::translate(&shape(), &input.into()))
}

fn range() -> Predicate {
    Group::and([Leaf::gt("ColumnInt", 5i32), Leaf::le("ColumnInt", 8i32)]).into()
}

// ---------------------------------------------------------------------------
// Equivalent inputs
// ---------------------------------------------------------------------------

#[test]
fn expression_translates_to_leaves() {
    let expr = Expr::and(
        Expr::gt(Expr::field("ColumnInt"), 5i32),
        Expr::le(Expr::field("ColumnInt"), 8i32),
    );

    assert_eq!(translate(expr), range());
}

#[test]
fn leaf_list_matches_expression() {
    let leaves = vec![Leaf::gt("columnint", 5i32), Leaf::le("COLUMNINT", 8i32)];
    assert_eq!(translate(leaves), range());
}

#[test]
fn group_matches_expression() {
    let group = Group::and([Leaf::gt("ColumnInt", 5i64), Leaf::le("ColumnInt", 8i64)]);
    assert_eq!(translate(group), range());
}

#[test]
fn reversed_operands_mirror_the_operator() {
    let expr = Expr::and(
        Expr::lt(5i32, Expr::field("ColumnInt")),
        Expr::ge(8i32, Expr::field("ColumnInt")),
    );

    assert_eq!(translate(expr), range());
}

#[test]
fn negated_expression_is_pushed_down() {
    // !(ColumnInt <= 5 || ColumnInt > 8)
    let expr = Expr::not(Expr::or(
        Expr::le(Expr::field("ColumnInt"), 5i32),
        Expr::gt(Expr::field("ColumnInt"), 8i32),
    ));

    assert_eq!(translate(expr), range());
}

#[test]
fn record_is_implicit_equality() {
    let record = quill_core::record! { "Name" => "widget", "columnint" => 7i64 };

    assert_eq!(
        translate(record),
        Group::and([Leaf::eq("Name", "widget"), Leaf::eq("ColumnInt", 7i32)]).into()
    );
}

#[test]
fn key_is_equality_on_the_primary_key() {
    assert_eq!(translate(Where::key(3i32)), Leaf::eq("Id", 3i32).into());
    assert_eq!(translate(Where::key("3")), Leaf::eq("Id", 3i32).into());
}

// ---------------------------------------------------------------------------
// Boolean normalization
// ---------------------------------------------------------------------------

#[test]
fn boolean_forms_collapse_to_one_leaf() {
    let expected: Predicate = Leaf::eq("Active", true).into();

    assert_eq!(translate(Expr::field("Active")), expected);
    assert_eq!(translate(Expr::eq(Expr::field("Active"), true)), expected);
    assert_eq!(translate(Expr::ne(Expr::field("Active"), false)), expected);
    assert_eq!(translate(Expr::not(Expr::eq(Expr::field("Active"), false))), expected);
}

#[test]
fn negated_boolean_forms_collapse_to_one_leaf() {
    let expected: Predicate = Leaf::eq("Active", false).into();

    assert_eq!(translate(Expr::not(Expr::field("Active"))), expected);
    assert_eq!(translate(Expr::eq(Expr::field("Active"), false)), expected);
    assert_eq!(translate(Expr::ne(Expr::field("Active"), true)), expected);
}

#[test]
fn comparison_equal_to_true_is_the_comparison() {
    let cmp = Expr::gt(Expr::field("ColumnInt"), 5i32);

    assert_eq!(translate(Expr::eq(cmp.clone(), true)), Leaf::gt("ColumnInt", 5i32).into());
    assert_eq!(translate(Expr::eq(cmp, false)), Leaf::le("ColumnInt", 5i32).into());
}

#[test]
fn null_comparison_is_null_test() {
    assert_eq!(
        translate(Expr::eq(Expr::field("Name"), Value::Null)),
        Leaf::is_null("Name").into()
    );
    assert_eq!(
        translate(Expr::not(Expr::is_null(Expr::field("Name")))),
        Leaf::is_not_null("Name").into()
    );
}

#[test]
fn null_leaf_matches_record_and_expression_forms() {
    let expected: Predicate = Leaf::is_null("Name").into();

    assert_eq!(translate(Leaf::eq("name", Value::Null)), expected);
    assert_eq!(translate(quill_core::record! { "Name" => Value::Null }), expected);
    assert_eq!(translate(Expr::eq(Expr::field("Name"), Value::Null)), expected);

    assert_eq!(
        translate(Leaf::ne("Name", Value::Null)),
        Leaf::is_not_null("Name").into()
    );
}

#[test]
fn ordering_leaf_against_null_is_unsupported() {
    let err = translate_err(Leaf::lt("ColumnInt", Value::Null));
    assert!(err.is_unsupported_predicate(), "{err}");
}

// ---------------------------------------------------------------------------
// Membership and substring
// ---------------------------------------------------------------------------

#[test]
fn list_contains_field_is_in() {
    let expr = Expr::contains(Value::list([1i64, 2, 3]), Expr::field("ColumnInt"));

    assert_eq!(
        translate(expr),
        Leaf::in_list("ColumnInt", [1i32, 2, 3]).into()
    );
}

#[test]
fn negated_in_list_is_not_in() {
    let expr = Expr::not(Expr::in_list(Expr::field("ColumnInt"), Value::list([1i32, 2])));

    assert_eq!(
        translate(expr),
        Leaf::new("ColumnInt", Operator::NotIn, Value::list([1i32, 2])).into()
    );
}

#[test]
fn substring_methods_escape_wildcards() {
    assert_eq!(
        translate(Expr::contains(Expr::field("Name"), "50%")),
        Leaf::new("Name", Operator::Like, r"%50\%%").into()
    );
    assert_eq!(
        translate(Expr::starts_with(Expr::field("Name"), "a_b")),
        Leaf::new("Name", Operator::Like, r"a\_b%").into()
    );
    assert_eq!(
        translate(Expr::not(Expr::ends_with(Expr::field("Name"), "z"))),
        Leaf::new("Name", Operator::NotLike, "%z").into()
    );
}

#[test]
fn between_keeps_both_bounds() {
    let expr = Expr::between(Expr::field("ColumnInt"), 6i32, 8i32);
    assert_eq!(translate(expr), Leaf::between("ColumnInt", 6i32, 8i32).into());
}

#[test]
fn bound_parameter_name_survives_translation() {
    let leaf = Leaf::eq("ColumnInt", 1i32).bind("threshold");
    assert_eq!(translate(leaf.clone()), Predicate::Leaf(leaf));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_method_is_unsupported() {
    let expr = Expr::call(
        Expr::field("Name"),
        quill_core::stmt::Method::Other("to_lowercase".to_string()),
        vec![],
    );

    let err = translate_err(expr);
    assert!(err.is_unsupported_predicate());
    assert_eq!(
        err.to_string(),
        "unsupported predicate on `Item`: method `to_lowercase`"
    );
}

#[test]
fn field_to_field_comparison_is_unsupported() {
    let err = translate_err(Expr::eq(Expr::field("Id"), Expr::field("ColumnInt")));
    assert_eq!(
        err.to_string(),
        "unsupported predicate on `Item`: comparison between fields `Id` and `ColumnInt`"
    );
}

#[test]
fn constant_only_comparison_is_unsupported() {
    let err = translate_err(Expr::eq(1i32, 1i32));
    assert!(err.is_unsupported_predicate());
}

#[test]
fn non_string_substring_argument_is_unsupported() {
    let err = translate_err(Expr::contains(Expr::field("Name"), 5i32));
    assert_eq!(
        err.to_string(),
        "unsupported predicate on `Item`: non-string argument to `contains`"
    );
}

#[test]
fn unknown_field_is_a_mapping_error() {
    let err = translate_err(Leaf::eq("Missing", 1i32));
    assert!(err.is_mapping());
}

#[test]
fn unconvertible_value_is_a_conversion_error() {
    let err = translate_err(Leaf::eq("ColumnInt", "seven"));
    assert!(err.is_conversion());
    assert_eq!(
        err.to_string(),
        "conversion error on `Item.ColumnInt`: cannot convert String to I32"
    );
}
