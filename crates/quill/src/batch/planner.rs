use super::{bulk, partition, BatchPlan, BulkLoad, ColumnMapping, SubPlan};
use crate::Result;

use quill_core::{
    schema::{EntityShape, KnownColumns},
    stmt::Value,
    Error,
};
use quill_sql::{Operation, Options, Serializer, StatementPlan};

use std::num::NonZeroUsize;

/// Plans set-based operations over one shape.
pub(crate) struct Planner<'a> {
    serializer: &'a Serializer<'a>,
    shape: &'a EntityShape,
    options: &'a Options,
    batch_size: usize,
}

impl<'a> Planner<'a> {
    pub(crate) fn new(
        serializer: &'a Serializer<'a>,
        shape: &'a EntityShape,
        options: &'a Options,
        batch_size: usize,
    ) -> Self {
        Self {
            serializer,
            shape,
            options,
            batch_size,
        }
    }

    pub(crate) fn insert(&self, rows: Vec<Vec<Value>>) -> Result<BatchPlan> {
        if !self.serializer.capability().multi_row_insert {
            return self.per_row(rows, |row| Operation::Insert { row });
        }

        self.batched(rows, self.shape.columns.len(), |rows| {
            Operation::InsertMany { rows }
        })
    }

    pub(crate) fn update(&self, rows: Vec<Vec<Value>>) -> Result<BatchPlan> {
        if !self.serializer.capability().multi_statement {
            return self.per_row(rows, |row| Operation::Update { row });
        }

        self.batched(rows, self.shape.columns.len(), |rows| {
            Operation::UpdateMany { rows }
        })
    }

    pub(crate) fn merge(&self, rows: Vec<Vec<Value>>) -> Result<BatchPlan> {
        if !self.serializer.capability().multi_statement {
            return self.per_row(rows, |row| Operation::Upsert { row });
        }

        self.batched(rows, self.shape.columns.len(), |rows| {
            Operation::MergeMany { rows }
        })
    }

    pub(crate) fn delete(&self, keys: Vec<Value>) -> Result<BatchPlan> {
        self.batched(keys, self.shape.primary_key.len(), |keys| {
            Operation::DeleteMany { keys }
        })
    }

    /// Validates the column map, then converts rows into bulk-load batches.
    /// `rows` is not consumed until validation passes.
    pub(crate) fn bulk(
        &self,
        rows: impl IntoIterator<Item = Vec<Value>>,
        known: Option<&KnownColumns>,
        mapping: Option<&[ColumnMapping]>,
    ) -> Result<BatchPlan> {
        let resolved = bulk::validate(self.shape, self.serializer.capability(), known, mapping)?;
        let size = self.size(0)?;

        let plans = partition(rows, size)
            .into_iter()
            .map(|batch| {
                let rows = batch
                    .iter()
                    .map(|row| resolved.convert(self.shape, row))
                    .collect::<Result<Vec<_>>>()?;

                Ok(SubPlan::Bulk(BulkLoad {
                    table: self.shape.table.clone(),
                    columns: resolved.destinations.clone(),
                    rows,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "planned bulk load of `{}`; batches={}",
            self.shape.table,
            plans.len()
        );

        Ok(BatchPlan { plans })
    }

    fn batched<T>(
        &self,
        items: Vec<T>,
        params_per_item: usize,
        operation: impl Fn(Vec<T>) -> Operation,
    ) -> Result<BatchPlan> {
        let size = self.size(params_per_item)?;

        let plans = partition(items, size)
            .into_iter()
            .map(|batch| self.build(operation(batch)))
            .collect::<Result<Vec<_>>>()?;

        log::trace!(
            "planned {} sub-batches for `{}`; batch_size={size}",
            plans.len(),
            self.shape.name
        );

        Ok(BatchPlan { plans })
    }

    fn per_row<T>(&self, items: Vec<T>, operation: impl Fn(T) -> Operation) -> Result<BatchPlan> {
        self.size(0)?;

        let plans = items
            .into_iter()
            .map(|item| self.build(operation(item)))
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchPlan { plans })
    }

    fn build(&self, operation: Operation) -> Result<SubPlan> {
        let plan: StatementPlan =
            quill_sql::build(self.serializer, self.shape, operation, None, self.options)?;
        Ok(SubPlan::Statement(plan))
    }

    /// The configured batch size, clamped to the driver's parameter limit.
    fn size(&self, params_per_item: usize) -> Result<NonZeroUsize> {
        let Some(requested) = NonZeroUsize::new(self.batch_size) else {
            return Err(Error::invalid_operation(
                &self.shape.name,
                "batch size must be at least 1",
            ));
        };

        if params_per_item == 0 {
            return Ok(requested);
        }

        let limit = self.serializer.capability().max_parameters / params_per_item;
        match NonZeroUsize::new(limit) {
            Some(limit) if limit < requested => {
                log::debug!(
                    "clamping batch size for `{}` from {requested} to {limit}",
                    self.shape.name
                );
                Ok(limit)
            }
            Some(_) => Ok(requested),
            None => Ok(NonZeroUsize::MIN),
        }
    }
}
