use super::{Group, Leaf, Predicate};
use crate::stmt::{Expr, Record, Value};

/// Every form a caller may use to say which rows an operation targets.
///
/// All forms translate to the same canonical [`Predicate`], so equivalent
/// inputs produce identical SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    /// A boolean expression, usually lowered from the typed filter DSL
    Expr(Expr),

    /// A single condition
    Leaf(Leaf),

    /// Conditions that must all hold
    Leaves(Vec<Leaf>),

    /// A pre-built group
    Group(Group),

    /// Field/value pairs that must all be equal
    Record(Record),

    /// Primary key value. Composite keys are given as a list, in key column
    /// order.
    Key(Value),
}

impl Where {
    pub fn key(value: impl Into<Value>) -> Self {
        Self::Key(value.into())
    }
}

impl From<Expr> for Where {
    fn from(value: Expr) -> Self {
        Self::Expr(value)
    }
}

impl From<Leaf> for Where {
    fn from(value: Leaf) -> Self {
        Self::Leaf(value)
    }
}

impl From<Vec<Leaf>> for Where {
    fn from(value: Vec<Leaf>) -> Self {
        Self::Leaves(value)
    }
}

impl From<Group> for Where {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl From<Predicate> for Where {
    fn from(value: Predicate) -> Self {
        match value {
            Predicate::Leaf(leaf) => Self::Leaf(leaf),
            Predicate::Group(group) => Self::Group(group),
        }
    }
}

impl From<Record> for Where {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}
