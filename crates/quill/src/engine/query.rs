use super::Engine;
use crate::{stmt::OrderBy, Entity, Result};

use quill_core::{
    filter::{self, Predicate, Where},
    schema::EntityShape,
};
use quill_sql::{stmt::Aggregate, Operation, Options, StatementPlan};

use std::{fmt, marker::PhantomData};

/// Reads or changes the rows of entity `E` selected by a filter.
///
/// Filters added with [`filter`](Self::filter) are combined with `AND`.
pub struct Query<'a, E> {
    engine: &'a Engine,
    filters: Vec<Where>,
    options: Options,
    _p: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> Query<'a, E> {
    pub(super) fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            filters: vec![],
            options: Options::default(),
            _p: PhantomData,
        }
    }

    pub fn filter(mut self, filter: impl Into<Where>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.options.order_by.push(order_by);
        self
    }

    pub fn fields<T: Into<String>>(mut self, fields: impl IntoIterator<Item = T>) -> Self {
        self.options = self.options.fields(fields);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.options.hints.push(hint.into());
        self
    }

    pub fn select(&self) -> Result<StatementPlan> {
        self.build(Operation::Select)
    }

    /// Page `page` (from zero) of `rows_per_batch` rows. Requires an order.
    pub fn paged(&self, page: usize, rows_per_batch: usize) -> Result<StatementPlan> {
        self.build(Operation::SelectPaged {
            page,
            rows_per_batch,
        })
    }

    pub fn count(&self) -> Result<StatementPlan> {
        self.build(Operation::count())
    }

    pub fn sum(&self, field: &str) -> Result<StatementPlan> {
        self.build(Operation::aggregate(Aggregate::Sum, field))
    }

    pub fn avg(&self, field: &str) -> Result<StatementPlan> {
        self.build(Operation::aggregate(Aggregate::Avg, field))
    }

    pub fn min(&self, field: &str) -> Result<StatementPlan> {
        self.build(Operation::aggregate(Aggregate::Min, field))
    }

    pub fn max(&self, field: &str) -> Result<StatementPlan> {
        self.build(Operation::aggregate(Aggregate::Max, field))
    }

    /// Deletes the selected rows. Fails without a filter; use
    /// [`delete_all`](Self::delete_all) to delete every row.
    pub fn delete(&self) -> Result<StatementPlan> {
        self.build(Operation::Delete)
    }

    pub fn delete_all(&self) -> Result<StatementPlan> {
        self.build(Operation::DeleteAll)
    }

    /// Writes the entity's values to the selected rows, or to the entity's
    /// own row when the query has no filter.
    pub fn update(&self, entity: &E) -> Result<StatementPlan> {
        let row = self.engine.accessor::<E>()?.to_row(entity);
        self.build(Operation::Update { row })
    }

    pub fn update_all(&self, entity: &E) -> Result<StatementPlan> {
        let row = self.engine.accessor::<E>()?.to_row(entity);
        self.build(Operation::UpdateAll { row })
    }

    fn build(&self, operation: Operation) -> Result<StatementPlan> {
        let shape = self.engine.shape::<E>()?;
        let filter = translate_all(&shape, &self.filters)?;
        self.engine
            .plan(&shape, operation, filter.as_ref(), &self.options)
    }
}

/// Translates each filter and combines them with `AND`.
pub(super) fn translate_all(shape: &EntityShape, filters: &[Where]) -> Result<Option<Predicate>> {
    let mut combined: Option<Predicate> = None;

    for input in filters {
        let predicate = filter::translate(shape, input)?;
        combined = Some(match combined {
            Some(lhs) => Predicate::and(lhs, predicate),
            None => predicate,
        });
    }

    Ok(combined)
}

impl<E> fmt::Debug for Query<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filters", &self.filters)
            .field("options", &self.options)
            .finish()
    }
}
