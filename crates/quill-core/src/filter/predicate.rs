use super::Operator;
use crate::{schema::EntityShape, stmt::Value, Result};

/// A node of the canonical predicate tree.
///
/// The tree holds no negation: the translator pushes every `NOT` down into
/// leaf operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Leaf(Leaf),
    Group(Group),
}

/// A single `field operator value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub field: String,
    pub op: Operator,
    pub value: Value,

    /// Placeholder name requested for the leaf's value. Set when the leaf has
    /// been bound; reusing a bound leaf in a later build (or twice in one
    /// statement) gets a fresh name for each use instead of colliding.
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub conjunction: Conjunction,
    pub children: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    And,
    Or,
}

impl Predicate {
    /// ANDs two predicates, flattening nested AND groups.
    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Group::new(Conjunction::And, vec![lhs.into(), rhs.into()]).into()
    }

    /// ORs two predicates, flattening nested OR groups.
    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Group::new(Conjunction::Or, vec![lhs.into(), rhs.into()]).into()
    }

    /// The predicate that holds exactly when `self` does not, with the
    /// negation pushed into the leaves (De Morgan).
    pub fn negate(self) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(Leaf {
                op: leaf.op.negate(),
                ..leaf
            }),
            Self::Group(group) => Group::new(
                group.conjunction.flip(),
                group.children.into_iter().map(Predicate::negate).collect(),
            )
            .into(),
        }
    }

    /// Visits every leaf, depth first, in source order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = vec![];
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, dst: &mut Vec<&'a Leaf>) {
        match self {
            Self::Leaf(leaf) => dst.push(leaf),
            Self::Group(group) => {
                for child in &group.children {
                    child.collect_leaves(dst);
                }
            }
        }
    }

    /// Checks that every leaf names a column of `shape`.
    pub fn validate(&self, shape: &EntityShape) -> Result<()> {
        for leaf in self.leaves() {
            shape.column_or_err(&leaf.field)?;
        }

        Ok(())
    }

    /// An empty AND group, which matches every row.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Group(Group { conjunction: Conjunction::And, children }) if children.is_empty())
    }
}

impl Leaf {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
            parameter: None,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Lt, value)
    }

    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Le, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Gt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Ge, value)
    }

    pub fn in_list<T: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(field, Operator::In, Value::list(values))
    }

    pub fn between(field: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::new(field, Operator::Between, Value::List(vec![low.into(), high.into()]))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, Operator::IsNull, Value::Null)
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, Operator::IsNotNull, Value::Null)
    }

    /// Requests a placeholder name for the leaf's value.
    pub fn bind(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn is_bound(&self) -> bool {
        self.parameter.is_some()
    }
}

impl Group {
    /// Creates a group, splicing in children that are groups of the same
    /// conjunction.
    pub fn new(conjunction: Conjunction, children: Vec<Predicate>) -> Self {
        let mut flattened = Vec::with_capacity(children.len());

        for child in children {
            match child {
                Predicate::Group(group) if group.conjunction == conjunction => {
                    flattened.extend(group.children);
                }
                child => flattened.push(child),
            }
        }

        Self {
            conjunction,
            children: flattened,
        }
    }

    pub fn and(children: impl IntoIterator<Item = impl Into<Predicate>>) -> Self {
        Self::new(Conjunction::And, children.into_iter().map(Into::into).collect())
    }

    pub fn or(children: impl IntoIterator<Item = impl Into<Predicate>>) -> Self {
        Self::new(Conjunction::Or, children.into_iter().map(Into::into).collect())
    }
}

impl Conjunction {
    pub fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

impl From<Leaf> for Predicate {
    fn from(value: Leaf) -> Self {
        Self::Leaf(value)
    }
}

impl From<Group> for Predicate {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}
