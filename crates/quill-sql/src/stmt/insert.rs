use super::Param;

/// `INSERT` of one or more rows. No columns means every column takes its
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Param>>,

    /// Columns to return for each inserted row
    pub returning: Vec<String>,
}
