use super::Expr;

/// Reference to a field by name. Matched against the shape's member names
/// and column names, ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprField {
    pub name: String,
}

impl From<ExprField> for Expr {
    fn from(value: ExprField) -> Self {
        Self::Field(value)
    }
}
