use super::Param;

/// Insert a row, or update the row it collides with on the qualifier
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    pub table: String,

    /// Every column the row supplies, aligned with `row`
    pub columns: Vec<String>,
    pub row: Vec<Param>,

    /// Subset of `columns` written when the row is new
    pub insert_columns: Vec<String>,

    /// Columns deciding whether the row already exists
    pub qualifiers: Vec<String>,

    /// Subset of `columns` written when the row exists
    pub update_columns: Vec<String>,

    /// Key columns to return, existing or newly generated
    pub returning: Vec<String>,

    /// Identity column, if the table has one
    pub identity: Option<String>,
}
