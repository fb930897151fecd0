use super::Builder;
use crate::{
    stmt::{Type, Upsert},
    ResultShape, Statement,
};

use quill_core::{driver::Dialect, stmt::Value, Result};

impl Builder<'_> {
    pub(super) fn upsert(&self, row: Vec<Value>) -> Result<(Statement, ResultShape)> {
        let stmt = self.upsert_stmt(row)?;
        let result = self.upsert_result(&stmt, false);

        Ok((stmt.into(), result))
    }

    /// One upsert per row, sent as a single batch.
    pub(super) fn merge_many(&self, rows: Vec<Vec<Value>>) -> Result<(Statement, ResultShape)> {
        let stmts = rows
            .into_iter()
            .map(|row| self.upsert_stmt(row))
            .collect::<Result<Vec<_>>>()?;

        let Some(first) = stmts.first() else {
            return Err(self.err("no rows to merge"));
        };

        let result = self.upsert_result(first, true);
        let stmts = stmts.into_iter().map(Statement::from).collect();

        Ok((Statement::Batch(stmts), result))
    }

    fn upsert_stmt(&self, row: Vec<Value>) -> Result<Upsert> {
        self.check_row(&row)?;

        let qualifiers = if self.options.qualifiers.is_empty() {
            self.shape
                .primary_key_or_err("merge")?
                .into_iter()
                .map(|column| column.name.clone())
                .collect::<Vec<_>>()
        } else {
            self.options
                .qualifiers
                .iter()
                .map(|name| Ok(self.shape.column_or_err(name)?.name.clone()))
                .collect::<Result<Vec<_>>>()?
        };

        let is_qualifier = |name: &str| qualifiers.iter().any(|q| q == name);

        let mut columns = vec![];
        let mut params = vec![];
        let mut insert_columns = vec![];
        let mut update_columns = vec![];

        for (column, value) in self.shape.columns.iter().zip(row) {
            if column.excluded {
                continue;
            }

            let qualifier = is_qualifier(&column.name);

            // An unset identity is generated by the database. It is only
            // carried along when the merge matches on it.
            if column.identity && value.is_null() && !qualifier {
                continue;
            }

            // SQL Server never accepts explicit identity values
            let insert = !column.identity
                || (!value.is_null() && self.serializer.dialect() != Dialect::SqlServer);

            if insert {
                insert_columns.push(column.name.clone());
            }

            if !qualifier && !column.primary_key && !column.identity {
                update_columns.push(column.name.clone());
            }

            params.push(self.param(column, value)?);
            columns.push(column.name.clone());
        }

        Ok(Upsert {
            table: self.shape.table.clone(),
            columns,
            row: params,
            insert_columns,
            qualifiers,
            update_columns,
            returning: self.upsert_returning(),
            identity: self.shape.identity_column().map(|c| c.name.clone()),
        })
    }

    /// The identity column, or else the primary key, when the dialect can
    /// return it.
    fn upsert_returning(&self) -> Vec<String> {
        if !self.serializer.capability().returning {
            return vec![];
        }

        match self.shape.identity_column() {
            Some(identity) => vec![identity.name.clone()],
            None => self
                .shape
                .primary_key_columns()
                .map(|column| column.name.clone())
                .collect(),
        }
    }

    fn upsert_result(&self, stmt: &Upsert, many: bool) -> ResultShape {
        match &stmt.returning[..] {
            [] if stmt.identity.is_some() => ResultShape::LastInsertId,
            [] => ResultShape::RowsAffected,
            [name] if !many => {
                let ty = self
                    .shape
                    .column(name)
                    .map_or(Type::Unknown, |column| column.ty.clone());

                ResultShape::Scalar(ty)
            }
            returning => ResultShape::Rows(returning.to_vec()),
        }
    }
}
