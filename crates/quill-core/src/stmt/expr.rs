use super::*;

/// An untyped boolean or scalar expression over the fields of one entity.
///
/// This is what the typed filter DSL lowers into and what the predicate
/// translator consumes. It is deliberately richer than the canonical
/// [`Predicate`](crate::filter::Predicate) tree: it may contain negation,
/// method calls, and comparisons in either operand order.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Method call on a receiver, e.g. `name.starts_with("A")`
    Call(ExprCall),

    /// Reference to a field of the entity
    Field(ExprField),

    /// In list
    InList(ExprInList),

    /// Whether an expression is (or is not) null
    IsNull(ExprIsNull),

    /// Negates a boolean expression
    Not(ExprNot),

    /// OR a set of binary expressions
    Or(ExprOr),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn field(name: impl Into<String>) -> Self {
        ExprField { name: name.into() }.into()
    }

    /// Is a value that evaluates to null
    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Returns true if the expression is the `true` boolean expression
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    /// Returns `true` if the expression is the `false` boolean expression
    pub fn is_false(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(false)))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(..))
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(..))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&ExprField> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Value(Value::Null))
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::Value(Value::default())
    }
}

impl<T: Into<Value>> From<T> for Expr {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}
