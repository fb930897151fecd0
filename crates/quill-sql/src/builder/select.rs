use super::Builder;
use crate::{
    stmt::{Aggregate, Limit, OrderBy, Projection, Select, Type},
    ResultShape, Statement,
};

use quill_core::{filter::Predicate, Result};

impl Builder<'_> {
    pub(super) fn select(
        &self,
        filter: Option<&Predicate>,
        limit: Option<Limit>,
    ) -> Result<(Statement, ResultShape)> {
        self.select_ordered(filter, limit, self.order_by()?)
    }

    fn select_ordered(
        &self,
        filter: Option<&Predicate>,
        limit: Option<Limit>,
        order_by: Vec<OrderBy>,
    ) -> Result<(Statement, ResultShape)> {
        let columns = if self.options.fields.is_empty() {
            self.shape.columns.iter().map(|c| c.name.clone()).collect()
        } else {
            self.options
                .fields
                .iter()
                .map(|field| Ok(self.shape.column_or_err(field)?.name.clone()))
                .collect::<Result<Vec<_>>>()?
        };

        let limit = limit.or(self.options.limit.map(|limit| Limit {
            limit,
            offset: None,
        }));

        let stmt = Select {
            table: self.shape.table.clone(),
            projection: Projection::Columns(columns.clone()),
            filter: self.filter(filter)?,
            order_by,
            limit,
            hints: self.hints()?,
        };

        Ok((stmt.into(), ResultShape::Rows(columns)))
    }

    pub(super) fn select_paged(
        &self,
        filter: Option<&Predicate>,
        page: usize,
        rows_per_batch: usize,
    ) -> Result<(Statement, ResultShape)> {
        if self.options.order_by.is_empty() {
            return Err(self.err("paged select requires an explicit order"));
        }

        if rows_per_batch == 0 {
            return Err(self.err("paged select requires a positive page size"));
        }

        let offset = page
            .checked_mul(rows_per_batch)
            .ok_or_else(|| self.err(format!("page {page} is out of range")))?;

        // Primary key columns break ties so consecutive pages never overlap
        let mut order_by = self.order_by()?;
        for column in self.shape.primary_key_columns() {
            if !order_by.iter().any(|order_by| order_by.field == column.name) {
                order_by.push(OrderBy::asc(&column.name));
            }
        }

        self.select_ordered(
            filter,
            Some(Limit {
                limit: rows_per_batch,
                offset: Some(offset),
            }),
            order_by,
        )
    }

    pub(super) fn aggregate(
        &self,
        filter: Option<&Predicate>,
        func: Aggregate,
        field: Option<&str>,
    ) -> Result<(Statement, ResultShape)> {
        let column = match field {
            Some(field) => Some(self.shape.column_or_err(field)?),
            None if func == Aggregate::Count => None,
            None => return Err(self.err(format!("{func:?} requires a field"))),
        };

        let numeric = column.map_or(true, |column| column.ty.is_numeric() || column.ty.is_unknown());

        if matches!(func, Aggregate::Sum | Aggregate::Avg) && !numeric {
            return Err(self.err(format!(
                "{func:?} requires a numeric column; `{}` is not",
                column.map_or("*", |column| &column.name)
            )));
        }

        let integer = column.is_some_and(|column| column.ty.is_integer());

        let ty = match (func, column) {
            (Aggregate::Count, _) => Type::I64,
            (Aggregate::Sum, _) if integer => Type::I64,
            (Aggregate::Sum | Aggregate::Avg, _) => Type::F64,
            (Aggregate::Min | Aggregate::Max, Some(column)) => column.ty.clone(),
            (Aggregate::Min | Aggregate::Max, None) => Type::Unknown,
        };

        let stmt = Select {
            table: self.shape.table.clone(),
            projection: Projection::Aggregate {
                func,
                column: column.map(|column| column.name.clone()),
                float: func == Aggregate::Avg && integer,
            },
            filter: self.filter(filter)?,
            order_by: vec![],
            limit: None,
            hints: self.hints()?,
        };

        Ok((stmt.into(), ResultShape::Scalar(ty)))
    }

    fn order_by(&self) -> Result<Vec<OrderBy>> {
        self.options
            .order_by
            .iter()
            .map(|order_by| {
                Ok(OrderBy {
                    field: self.shape.column_or_err(&order_by.field)?.name.clone(),
                    direction: order_by.direction,
                })
            })
            .collect()
    }
}
