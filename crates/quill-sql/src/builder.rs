//! Lowers an operation on a resolved [`EntityShape`] into a
//! [`StatementPlan`] for the serializer's dialect.

mod condition;

mod options;
pub use options::Options;

mod operation;
pub use operation::Operation;

mod select;
mod upsert;
mod write;

use crate::{stmt::Param, ResultShape, Serializer, Statement, StatementPlan};

use quill_core::{
    filter::Predicate,
    schema::{Column, EntityShape},
    stmt::Value,
    Error, Result,
};

/// Builds the plan for `operation` on `shape`.
///
/// `filter` must already be translated against `shape`: fields name columns
/// and values carry the column types.
pub fn build(
    serializer: &Serializer<'_>,
    shape: &EntityShape,
    operation: Operation,
    filter: Option<&Predicate>,
    options: &Options,
) -> Result<StatementPlan> {
    let builder = Builder {
        serializer,
        shape,
        options,
    };

    let (stmt, result) = builder.lower(operation, filter)?;
    let plan = StatementPlan::new(serializer, &stmt, result);

    let max = serializer.capability().max_parameters;
    if plan.params.len() > max {
        return Err(Error::invalid_operation(
            &shape.name,
            format!(
                "statement binds {} parameters; {} allows at most {max}",
                plan.params.len(),
                serializer.dialect()
            ),
        ));
    }

    log::trace!("built {} statement; sql={}", shape.name, plan.sql);

    Ok(plan)
}

struct Builder<'a> {
    serializer: &'a Serializer<'a>,
    shape: &'a EntityShape,
    options: &'a Options,
}

impl Builder<'_> {
    fn lower(
        &self,
        operation: Operation,
        filter: Option<&Predicate>,
    ) -> Result<(Statement, ResultShape)> {
        match operation {
            Operation::Select => self.select(filter, None),
            Operation::SelectPaged {
                page,
                rows_per_batch,
            } => self.select_paged(filter, page, rows_per_batch),
            Operation::Aggregate { func, field } => self.aggregate(filter, func, field.as_deref()),
            Operation::Insert { row } => self.insert(row),
            Operation::InsertMany { rows } => self.insert_many(rows),
            Operation::Update { row } => self.update(row, filter),
            Operation::UpdateAll { row } => self.update_all(row),
            Operation::UpdateMany { rows } => self.update_many(rows),
            Operation::Delete => self.delete(filter),
            Operation::DeleteAll => Ok(self.delete_all()),
            Operation::DeleteMany { keys } => self.delete_many(keys),
            Operation::Upsert { row } => self.upsert(row),
            Operation::MergeMany { rows } => self.merge_many(rows),
            Operation::Truncate => Ok(self.truncate()),
        }
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::invalid_operation(&self.shape.name, message)
    }

    /// Casts `value` to the column type, naming the column on failure.
    fn cast(&self, column: &Column, value: Value) -> Result<Value> {
        match column.ty.cast(value.clone()) {
            Ok(value) => Ok(value),
            Err(_) => Err(Error::conversion(
                &self.shape.name,
                &column.name,
                &value,
                &column.ty,
            )),
        }
    }

    fn param(&self, column: &Column, value: Value) -> Result<Param> {
        let value = self.cast(column, value)?;
        Ok(Param::new(&column.name, value, column.ty.clone()))
    }

    /// Rows hold one value per shape column, in column order.
    fn check_row(&self, row: &[Value]) -> Result<()> {
        if row.len() != self.shape.columns.len() {
            return Err(self.err(format!(
                "row has {} values; table `{}` maps {} columns",
                row.len(),
                self.shape.table,
                self.shape.columns.len()
            )));
        }

        Ok(())
    }

    /// Validates the configured table hints.
    fn hints(&self) -> Result<Vec<String>> {
        self.serializer
            .validate_hints(&self.options.hints)
            .map_err(|hint| {
                self.err(format!(
                    "unknown table hint `{hint}` for {}",
                    self.serializer.dialect()
                ))
            })
    }

    /// What an insert hands back: the generated identity when the dialect
    /// can return it.
    fn insert_result(&self, many: bool) -> (Vec<String>, ResultShape) {
        let Some(identity) = self.shape.identity_column() else {
            return (vec![], ResultShape::RowsAffected);
        };

        if !self.serializer.capability().returning {
            return (vec![], ResultShape::LastInsertId);
        }

        let result = if many {
            ResultShape::Rows(vec![identity.name.clone()])
        } else {
            ResultShape::Scalar(identity.ty.clone())
        };

        (vec![identity.name.clone()], result)
    }
}
