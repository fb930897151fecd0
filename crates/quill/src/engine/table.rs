use super::{query::translate_all, Engine};
use crate::{
    batch::{BatchPlan, ColumnMapping, Planner},
    Result,
};

use quill_core::{
    filter::Where,
    schema::{EntityShape, KnownColumns},
    stmt::{Record, Row, Value},
    Error,
};
use quill_sql::{Operation, Options, StatementPlan};

use std::sync::Arc;

/// Plans statements for dynamic records against a table named at runtime.
///
/// Records map onto the table field by field. When the table's columns are
/// known, fields without a matching column are dropped.
#[derive(Debug)]
pub struct Table<'a> {
    engine: &'a Engine,
    name: String,
    known: Option<KnownColumns>,
}

impl<'a> Table<'a> {
    pub(super) fn new(engine: &'a Engine, name: String) -> Self {
        Self {
            engine,
            name,
            known: None,
        }
    }

    /// The live columns of the table. An empty set means the table could
    /// not be resolved.
    pub fn known_columns(mut self, known: KnownColumns) -> Self {
        self.known = Some(known);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self, record: &Record) -> Result<Arc<EntityShape>> {
        self.engine
            .shared
            .resolver
            .resolve_dynamic(&self.name, record, self.known.as_ref())
    }

    pub fn insert(&self, record: &Record) -> Result<StatementPlan> {
        let (shape, row) = self.row(record)?;
        self.engine
            .plan(&shape, Operation::Insert { row }, None, &Options::default())
    }

    pub fn insert_all(&self, records: &[Record]) -> Result<BatchPlan> {
        let Some(first) = records.first() else {
            return Ok(BatchPlan { plans: vec![] });
        };

        let shape = self.shape(first)?;
        let rows = self.rows(&shape, records);
        self.planner(&shape, &Options::default(), |planner| planner.insert(rows))
    }

    /// Updates the row identified by the record's primary key fields. Fails
    /// with an ambiguous scope error when the record carries no key.
    pub fn update(&self, record: &Record) -> Result<StatementPlan> {
        let (shape, row) = self.row(record)?;
        self.engine
            .plan(&shape, Operation::Update { row }, None, &Options::default())
    }

    /// Writes the record's values to every row matching `filter`.
    pub fn update_where(&self, record: &Record, filter: impl Into<Where>) -> Result<StatementPlan> {
        let (shape, row) = self.row(record)?;
        let filter = translate_all(&shape, &[filter.into()])?;
        self.engine.plan(
            &shape,
            Operation::Update { row },
            filter.as_ref(),
            &Options::default(),
        )
    }

    pub fn merge(&self, record: &Record, options: &Options) -> Result<StatementPlan> {
        let (shape, row) = self.row(record)?;
        self.engine.plan(&shape, Operation::Upsert { row }, None, options)
    }

    /// Selects the rows matching `filter`. The record names the fields to
    /// read; its values are ignored.
    pub fn query(
        &self,
        fields: &Record,
        filter: impl Into<Where>,
        options: &Options,
    ) -> Result<StatementPlan> {
        let shape = self.shape(fields)?;
        let filter = translate_all(&shape, &[filter.into()])?;
        self.engine
            .plan(&shape, Operation::Select, filter.as_ref(), options)
    }

    /// Deletes the rows matching `filter`. A record filter over the table's
    /// key columns deletes one row.
    pub fn delete(&self, filter: Record) -> Result<StatementPlan> {
        let shape = self.shape(&filter)?;
        let filter = translate_all(&shape, &[Where::Record(filter)])?;
        self.engine
            .plan(&shape, Operation::Delete, filter.as_ref(), &Options::default())
    }

    /// Plans a native bulk load of records sharing the first record's fields.
    pub fn bulk_insert(
        &self,
        records: &[Record],
        mapping: Option<&[ColumnMapping]>,
    ) -> Result<BatchPlan> {
        if self.known.as_ref().is_some_and(KnownColumns::is_empty) {
            return Err(Error::invalid_operation(
                &self.name,
                format!("bulk load target table `{}` could not be resolved", self.name),
            ));
        }

        let Some(first) = records.first() else {
            return Ok(BatchPlan { plans: vec![] });
        };

        let shape = self.shape(first)?;
        let accessor = self.engine.shared.accessors.record(&shape);
        let rows = records.iter().map(|record| accessor.to_row(record));

        self.planner(&shape, &Options::default(), |planner| {
            planner.bulk(rows, self.known.as_ref(), mapping)
        })
    }

    /// Loads a driver row into a record keyed by member name. The row's
    /// columns are resolved like a record with those fields.
    pub fn load(&self, row: &Row) -> Result<Record> {
        let fields = row
            .columns()
            .iter()
            .map(|column| (column.as_str(), Value::Null))
            .collect::<Record>();

        let shape = self.shape(&fields)?;
        self.engine.shared.accessors.record(&shape).from_row(row)
    }

    fn row(&self, record: &Record) -> Result<(Arc<EntityShape>, Vec<Value>)> {
        let shape = self.shape(record)?;
        let row = self.engine.shared.accessors.record(&shape).to_row(record);
        Ok((shape, row))
    }

    fn rows(&self, shape: &Arc<EntityShape>, records: &[Record]) -> Vec<Vec<Value>> {
        let accessor = self.engine.shared.accessors.record(shape);
        records.iter().map(|record| accessor.to_row(record)).collect()
    }

    fn planner<T>(
        &self,
        shape: &EntityShape,
        options: &Options,
        f: impl FnOnce(&Planner<'_>) -> Result<T>,
    ) -> Result<T> {
        self.engine.planner(shape, options, f)
    }
}
