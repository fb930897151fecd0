use super::Builder;
use crate::{
    stmt::{Assignment, Condition, Delete, Insert, Param, Truncate, Update},
    ResultShape, Statement,
};

use quill_core::{filter::Predicate, stmt::Value, Error, Result};

impl Builder<'_> {
    pub(super) fn insert(&self, row: Vec<Value>) -> Result<(Statement, ResultShape)> {
        let (returning, result) = self.insert_result(false);
        let stmt = Insert {
            table: self.shape.table.clone(),
            columns: self.insert_columns(),
            rows: vec![self.insert_row(row)?],
            returning,
        };

        Ok((stmt.into(), result))
    }

    /// A single multi-row insert where the dialect has one, otherwise a
    /// batch of single-row inserts.
    pub(super) fn insert_many(&self, rows: Vec<Vec<Value>>) -> Result<(Statement, ResultShape)> {
        if rows.is_empty() {
            return Err(self.err("no rows to insert"));
        }

        let columns = self.insert_columns();
        let (returning, result) = self.insert_result(true);
        let rows = rows
            .into_iter()
            .map(|row| self.insert_row(row))
            .collect::<Result<Vec<_>>>()?;

        // Without columns every row is `DEFAULT VALUES`, which has no
        // multi-row form.
        if self.serializer.capability().multi_row_insert && !columns.is_empty() {
            let stmt = Insert {
                table: self.shape.table.clone(),
                columns,
                rows,
                returning,
            };

            return Ok((stmt.into(), result));
        }

        let stmts = rows
            .into_iter()
            .map(|row| {
                Statement::from(Insert {
                    table: self.shape.table.clone(),
                    columns: columns.clone(),
                    rows: vec![row],
                    returning: returning.clone(),
                })
            })
            .collect();

        Ok((Statement::Batch(stmts), result))
    }

    fn insert_columns(&self) -> Vec<String> {
        self.shape
            .insertable_columns()
            .map(|column| column.name.clone())
            .collect()
    }

    fn insert_row(&self, row: Vec<Value>) -> Result<Vec<Param>> {
        self.check_row(&row)?;

        self.shape
            .columns
            .iter()
            .zip(row)
            .filter(|(column, _)| column.is_writable())
            .map(|(column, value)| self.param(column, value))
            .collect()
    }

    /// Update scoped by `filter`; without one, by the row's primary key.
    pub(super) fn update(
        &self,
        row: Vec<Value>,
        filter: Option<&Predicate>,
    ) -> Result<(Statement, ResultShape)> {
        let filter = match self.filter(filter)? {
            Some(filter) => filter,
            None => {
                self.check_row(&row)?;
                self.key_condition(&row, "update")?
            }
        };

        let stmt = self.update_stmt(row, Some(filter))?;
        Ok((stmt.into(), ResultShape::RowsAffected))
    }

    pub(super) fn update_all(&self, row: Vec<Value>) -> Result<(Statement, ResultShape)> {
        let stmt = self.update_stmt(row, None)?;
        Ok((stmt.into(), ResultShape::RowsAffected))
    }

    pub(super) fn update_many(&self, rows: Vec<Vec<Value>>) -> Result<(Statement, ResultShape)> {
        if rows.is_empty() {
            return Err(self.err("no rows to update"));
        }

        let stmts = rows
            .into_iter()
            .map(|row| {
                self.check_row(&row)?;
                let filter = self.key_condition(&row, "update")?;
                Ok(Statement::from(self.update_stmt(row, Some(filter))?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((Statement::Batch(stmts), ResultShape::RowsAffected))
    }

    fn update_stmt(&self, row: Vec<Value>, filter: Option<Condition>) -> Result<Update> {
        self.check_row(&row)?;

        let assignments = self
            .shape
            .columns
            .iter()
            .zip(row)
            .filter(|(column, _)| column.is_updatable())
            .map(|(column, value)| {
                Ok(Assignment {
                    column: column.name.clone(),
                    value: self.param(column, value)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if assignments.is_empty() {
            return Err(self.err(format!(
                "table `{}` has no writable columns to update",
                self.shape.table
            )));
        }

        Ok(Update {
            table: self.shape.table.clone(),
            assignments,
            filter,
        })
    }

    /// Delete scoped by `filter`, which must restrict the rows.
    pub(super) fn delete(&self, filter: Option<&Predicate>) -> Result<(Statement, ResultShape)> {
        let Some(filter) = self.filter(filter)? else {
            return Err(Error::ambiguous_scope(&self.shape.name, "delete"));
        };

        Ok((self.delete_stmt(Some(filter)), ResultShape::RowsAffected))
    }

    pub(super) fn delete_all(&self) -> (Statement, ResultShape) {
        (self.delete_stmt(None), ResultShape::RowsAffected)
    }

    pub(super) fn delete_many(&self, keys: Vec<Value>) -> Result<(Statement, ResultShape)> {
        let filter = self.keys_condition(keys)?;
        Ok((self.delete_stmt(Some(filter)), ResultShape::RowsAffected))
    }

    fn delete_stmt(&self, filter: Option<Condition>) -> Statement {
        Delete {
            table: self.shape.table.clone(),
            filter,
        }
        .into()
    }

    pub(super) fn truncate(&self) -> (Statement, ResultShape) {
        let stmt = Truncate {
            table: self.shape.table.clone(),
        };

        (stmt.into(), ResultShape::RowsAffected)
    }
}
