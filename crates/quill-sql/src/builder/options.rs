use crate::stmt::OrderBy;

/// Per-statement options. Field names resolve against the shape like
/// predicate fields do.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Options {
    /// Columns to select; empty selects every mapped column
    pub fields: Vec<String>,

    pub order_by: Vec<OrderBy>,

    /// Row limit of a plain select
    pub limit: Option<usize>,

    /// Table hints, checked against the dialect's whitelist
    pub hints: Vec<String>,

    /// Columns matching an upsert's row to an existing one; empty uses the
    /// primary key
    pub qualifiers: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<T: Into<String>>(mut self, fields: impl IntoIterator<Item = T>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn qualifiers<T: Into<String>>(mut self, qualifiers: impl IntoIterator<Item = T>) -> Self {
        self.qualifiers = qualifiers.into_iter().map(Into::into).collect();
        self
    }
}
