#![allow(dead_code)]

use quill::{Entity, Enum};
use quill_core::{
    filter::{Conjunction, Group, Leaf, Operator, Predicate},
    stmt::{Record, Value},
};

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Default, Entity)]
#[table = "Sample"]
pub struct Sample {
    #[key]
    #[column("Id")]
    pub id: i64,

    #[column("ColumnInt")]
    pub column_int: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Enum)]
pub enum Status {
    #[default]
    Active,
    Suspended,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Default, Entity)]
pub struct Person {
    #[key]
    #[auto]
    pub id: i64,

    pub name: String,

    pub age: i32,

    pub email: Option<String>,

    pub status: Status,

    #[read_only]
    pub created_at: Option<String>,

    #[skip]
    pub dirty: bool,
}

/// Routes `log` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn person(id: i64, name: &str, age: i32) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
        email: None,
        status: Status::Active,
        created_at: None,
        dirty: false,
    }
}

pub fn samples() -> Vec<Sample> {
    (1..=10)
        .map(|i| Sample {
            id: i,
            column_int: i as i32,
        })
        .collect()
}

/// Evaluates a canonical predicate against a row keyed by column name,
/// with SQL's null semantics: comparisons against `NULL` never hold.
pub fn eval(predicate: &Predicate, row: &Record) -> bool {
    match predicate {
        Predicate::Leaf(leaf) => eval_leaf(leaf, row),
        Predicate::Group(Group {
            conjunction: Conjunction::And,
            children,
        }) => children.iter().all(|child| eval(child, row)),
        Predicate::Group(Group {
            conjunction: Conjunction::Or,
            children,
        }) => children.iter().any(|child| eval(child, row)),
    }
}

fn eval_leaf(leaf: &Leaf, row: &Record) -> bool {
    let value = row.get_ignore_case(&leaf.field).cloned().unwrap_or_default();
    let cmp = |other: &Value| value.partial_cmp(other);

    match leaf.op {
        Operator::IsNull => value.is_null(),
        Operator::IsNotNull => !value.is_null(),
        _ if value.is_null() => false,
        Operator::Eq => cmp(&leaf.value) == Some(Ordering::Equal),
        Operator::Ne => matches!(cmp(&leaf.value), Some(Ordering::Less | Ordering::Greater)),
        Operator::Lt => cmp(&leaf.value) == Some(Ordering::Less),
        Operator::Le => matches!(cmp(&leaf.value), Some(Ordering::Less | Ordering::Equal)),
        Operator::Gt => cmp(&leaf.value) == Some(Ordering::Greater),
        Operator::Ge => matches!(cmp(&leaf.value), Some(Ordering::Greater | Ordering::Equal)),
        Operator::In => in_list(&value, &leaf.value),
        Operator::NotIn => !in_list(&value, &leaf.value),
        Operator::Between => between(&value, &leaf.value),
        Operator::NotBetween => !between(&value, &leaf.value),
        Operator::Like => like(&value, &leaf.value),
        Operator::NotLike => !like(&value, &leaf.value),
    }
}

fn in_list(value: &Value, list: &Value) -> bool {
    list.as_list()
        .unwrap_or_default()
        .iter()
        .any(|item| value.partial_cmp(item) == Some(Ordering::Equal))
}

fn between(value: &Value, bounds: &Value) -> bool {
    match bounds.as_list() {
        Some([low, high]) => {
            matches!(value.partial_cmp(low), Some(Ordering::Greater | Ordering::Equal))
                && matches!(value.partial_cmp(high), Some(Ordering::Less | Ordering::Equal))
        }
        _ => false,
    }
}

fn like(value: &Value, pattern: &Value) -> bool {
    match (value.as_str(), pattern.as_str()) {
        (Some(value), Some(pattern)) => {
            let value = value.chars().collect::<Vec<_>>();
            let pattern = pattern.chars().collect::<Vec<_>>();
            like_match(&value, &pattern)
        }
        _ => false,
    }
}

/// `%` matches any run, `_` one character, `\` escapes the next character.
fn like_match(value: &[char], pattern: &[char]) -> bool {
    match pattern {
        [] => value.is_empty(),
        ['%', rest @ ..] => (0..=value.len()).any(|skip| like_match(&value[skip..], rest)),
        ['_', rest @ ..] => !value.is_empty() && like_match(&value[1..], rest),
        ['\\', escaped, rest @ ..] => value.first() == Some(escaped) && like_match(&value[1..], rest),
        [c, rest @ ..] => value.first() == Some(c) && like_match(&value[1..], rest),
    }
}
