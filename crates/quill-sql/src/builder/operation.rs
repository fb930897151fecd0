use crate::stmt::Aggregate;

use quill_core::stmt::Value;

/// A statement to build. Rows hold one value per shape column, in column
/// order; keys hold one primary key value each, a list for composite keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select,

    /// One page of an ordered select. Pages are numbered from zero.
    SelectPaged {
        page: usize,
        rows_per_batch: usize,
    },

    /// `COUNT`, `SUM`, `AVG`, `MIN` or `MAX`. `COUNT` without a field counts
    /// rows.
    Aggregate {
        func: Aggregate,
        field: Option<String>,
    },

    Insert {
        row: Vec<Value>,
    },
    InsertMany {
        rows: Vec<Vec<Value>>,
    },

    /// Update scoped by the filter, or by the row's primary key without one.
    Update {
        row: Vec<Value>,
    },
    UpdateAll {
        row: Vec<Value>,
    },

    /// One update per row, each scoped by the row's primary key.
    UpdateMany {
        rows: Vec<Vec<Value>>,
    },

    /// Delete scoped by the filter, which is required.
    Delete,
    DeleteAll,
    DeleteMany {
        keys: Vec<Value>,
    },

    Upsert {
        row: Vec<Value>,
    },
    MergeMany {
        rows: Vec<Vec<Value>>,
    },

    Truncate,
}

impl Operation {
    pub fn insert(row: impl Into<Vec<Value>>) -> Self {
        Self::Insert { row: row.into() }
    }

    pub fn update(row: impl Into<Vec<Value>>) -> Self {
        Self::Update { row: row.into() }
    }

    pub fn upsert(row: impl Into<Vec<Value>>) -> Self {
        Self::Upsert { row: row.into() }
    }

    pub fn count() -> Self {
        Self::Aggregate {
            func: Aggregate::Count,
            field: None,
        }
    }

    pub fn aggregate(func: Aggregate, field: impl Into<String>) -> Self {
        Self::Aggregate {
            func,
            field: Some(field.into()),
        }
    }
}
