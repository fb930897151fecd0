//! Splits set-based operations into size-bounded sub-batches.

mod bulk;
pub use bulk::{BulkLoad, ColumnMapping};

mod planner;
pub(crate) use planner::Planner;

use quill_sql::StatementPlan;

use std::num::NonZeroUsize;

/// Default number of entities per sub-batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// The ordered sub-batches of a set-based operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub plans: Vec<SubPlan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubPlan {
    /// A parameterized statement
    Statement(StatementPlan),

    /// Rows handed to the driver's native bulk loader
    Bulk(BulkLoad),
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &SubPlan> + '_ {
        self.plans.iter()
    }

    pub fn statements(&self) -> impl Iterator<Item = &StatementPlan> + '_ {
        self.plans.iter().filter_map(SubPlan::as_statement)
    }
}

impl SubPlan {
    pub fn as_statement(&self) -> Option<&StatementPlan> {
        match self {
            Self::Statement(plan) => Some(plan),
            Self::Bulk(_) => None,
        }
    }

    pub fn as_bulk(&self) -> Option<&BulkLoad> {
        match self {
            Self::Bulk(load) => Some(load),
            Self::Statement(_) => None,
        }
    }
}

impl IntoIterator for BatchPlan {
    type Item = SubPlan;
    type IntoIter = std::vec::IntoIter<SubPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.plans.into_iter()
    }
}

/// Splits `items` into groups of `size`, in order. The last group holds the
/// remainder when `size` does not divide the input evenly.
pub fn partition<T>(items: impl IntoIterator<Item = T>, size: NonZeroUsize) -> Vec<Vec<T>> {
    let mut batches = vec![];
    let mut current = Vec::with_capacity(size.get());

    for item in items {
        current.push(item);

        if current.len() == size.get() {
            batches.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(size.get()),
            ));
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
