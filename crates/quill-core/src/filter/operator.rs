use crate::stmt::BinaryOp;

use std::fmt;

/// Operator of a canonical predicate leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    /// The leaf value is a list
    In,
    NotIn,

    /// The leaf value is a pattern using `\` as its escape character
    Like,
    NotLike,

    /// The leaf value is a two-item list, inclusive on both ends
    Between,
    NotBetween,

    /// The leaf value is ignored
    IsNull,
    IsNotNull,
}

impl Operator {
    /// The operator that holds exactly when `self` does not.
    pub fn negate(self) -> Self {
        use Operator::*;

        match self {
            Eq => Ne,
            Ne => Eq,
            Lt => Ge,
            Le => Gt,
            Gt => Le,
            Ge => Lt,
            In => NotIn,
            NotIn => In,
            Like => NotLike,
            NotLike => Like,
            Between => NotBetween,
            NotBetween => Between,
            IsNull => IsNotNull,
            IsNotNull => IsNull,
        }
    }

    /// Whether the operator binds a value at all.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    pub fn is_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    pub fn is_range(self) -> bool {
        matches!(self, Self::Between | Self::NotBetween)
    }
}

impl From<BinaryOp> for Operator {
    fn from(value: BinaryOp) -> Self {
        match value {
            BinaryOp::Eq => Self::Eq,
            BinaryOp::Ne => Self::Ne,
            BinaryOp::Ge => Self::Ge,
            BinaryOp::Gt => Self::Gt,
            BinaryOp::Le => Self::Le,
            BinaryOp::Lt => Self::Lt,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Operator::*;

        match self {
            Eq => "=".fmt(f),
            Ne => "<>".fmt(f),
            Lt => "<".fmt(f),
            Le => "<=".fmt(f),
            Gt => ">".fmt(f),
            Ge => ">=".fmt(f),
            In => "IN".fmt(f),
            NotIn => "NOT IN".fmt(f),
            Like => "LIKE".fmt(f),
            NotLike => "NOT LIKE".fmt(f),
            Between => "BETWEEN".fmt(f),
            NotBetween => "NOT BETWEEN".fmt(f),
            IsNull => "IS NULL".fmt(f),
            IsNotNull => "IS NOT NULL".fmt(f),
        }
    }
}
