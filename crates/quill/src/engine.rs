mod builder;
pub use builder::Builder;

mod query;
pub use query::Query;

mod table;
pub use table::Table;

use crate::{
    accessor::AccessorCache,
    batch::{BatchPlan, ColumnMapping, Planner},
    Accessor, Entity, Resolver, Result,
};

use quill_core::{
    driver::{Capability, Dialect},
    filter::{self, Predicate, Where},
    schema::EntityShape,
    stmt::{Row, Value},
    Error,
};
use quill_sql::{Operation, Options, Serializer, StatementPlan};

use std::sync::Arc;

/// Plans statements for one dialect.
///
/// Cloning is cheap; clones share the shape and accessor caches.
#[derive(Debug, Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    dialect: Dialect,
    capability: Capability,
    resolver: Resolver,
    accessors: AccessorCache,
    batch_size: usize,
}

impl Engine {
    /// An engine with the default configuration for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self::builder().dialect(dialect).build()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn dialect(&self) -> Dialect {
        self.shared.dialect
    }

    pub fn capability(&self) -> &Capability {
        &self.shared.capability
    }

    pub fn batch_size(&self) -> usize {
        self.shared.batch_size
    }

    pub fn resolver(&self) -> &Resolver {
        &self.shared.resolver
    }

    /// Number of accessors compiled so far.
    pub fn accessor_builds(&self) -> usize {
        self.shared.accessors.build_count()
    }

    /// Drops every cached shape and accessor. Call this whenever the
    /// database schema may have changed.
    pub fn invalidate(&self) {
        log::debug!("invalidating shape and accessor caches");
        self.shared.resolver.clear();
        self.shared.accessors.clear();
    }

    pub fn shape<E: Entity>(&self) -> Result<Arc<EntityShape>> {
        self.shared.resolver.resolve::<E>(None)
    }

    pub fn accessor<E: Entity>(&self) -> Result<Arc<Accessor<E>>> {
        let shape = self.shape::<E>()?;
        Ok(self.shared.accessors.entity::<E>(&shape))
    }

    /// Starts a query over entity `E`.
    pub fn query<E: Entity>(&self) -> Query<'_, E> {
        Query::new(self)
    }

    /// A handle for dynamic records targeting `table` by name.
    pub fn table(&self, table: impl Into<String>) -> Table<'_> {
        Table::new(self, table.into())
    }

    pub fn insert<E: Entity>(&self, entity: &E) -> Result<StatementPlan> {
        let accessor = self.accessor::<E>()?;
        let row = accessor.to_row(entity);
        self.plan(accessor.shape(), Operation::Insert { row }, None, &Options::default())
    }

    pub fn insert_all<E: Entity>(&self, entities: &[E]) -> Result<BatchPlan> {
        let accessor = self.accessor::<E>()?;
        let rows = to_rows(&accessor, entities);
        self.planner(accessor.shape(), &Options::default(), |planner| {
            planner.insert(rows)
        })
    }

    /// Updates the entity's row, scoped by its primary key.
    pub fn update<E: Entity>(&self, entity: &E) -> Result<StatementPlan> {
        let accessor = self.accessor::<E>()?;
        let row = accessor.to_row(entity);
        self.plan(accessor.shape(), Operation::Update { row }, None, &Options::default())
    }

    /// One primary-key scoped update per entity.
    pub fn update_many<E: Entity>(&self, entities: &[E]) -> Result<BatchPlan> {
        let accessor = self.accessor::<E>()?;
        let rows = to_rows(&accessor, entities);
        self.planner(accessor.shape(), &Options::default(), |planner| {
            planner.update(rows)
        })
    }

    /// Deletes the entity's row, scoped by its primary key.
    pub fn delete<E: Entity>(&self, entity: &E) -> Result<StatementPlan> {
        let accessor = self.accessor::<E>()?;
        let shape = accessor.shape();
        let row = accessor.to_row(entity);

        let key = key_of(shape, &row, "delete")?;
        let filter = filter::translate(shape, &Where::Key(key))?;
        self.plan(shape, Operation::Delete, Some(&filter), &Options::default())
    }

    /// Deletes rows by primary key. Composite keys are given as lists, in
    /// key column order.
    pub fn delete_many<E: Entity>(&self, keys: impl IntoIterator<Item = impl Into<Value>>) -> Result<BatchPlan> {
        let shape = self.shape::<E>()?;
        let keys = keys.into_iter().map(Into::into).collect();
        self.planner(&shape, &Options::default(), |planner| planner.delete(keys))
    }

    /// Inserts the entity, or updates the row matching it on the qualifier
    /// columns (the primary key unless `options` names others).
    pub fn merge<E: Entity>(&self, entity: &E, options: &Options) -> Result<StatementPlan> {
        let accessor = self.accessor::<E>()?;
        let row = accessor.to_row(entity);
        self.plan(accessor.shape(), Operation::Upsert { row }, None, options)
    }

    pub fn merge_all<E: Entity>(&self, entities: &[E], options: &Options) -> Result<BatchPlan> {
        let accessor = self.accessor::<E>()?;
        let rows = to_rows(&accessor, entities);
        self.planner(accessor.shape(), options, |planner| planner.merge(rows))
    }

    pub fn truncate<E: Entity>(&self) -> Result<StatementPlan> {
        let shape = self.shape::<E>()?;
        self.plan(&shape, Operation::Truncate, None, &Options::default())
    }

    /// Plans a native bulk load. The column map, when given, maps entity
    /// members to table columns; without one every insertable column loads
    /// into its own column.
    pub fn bulk_insert<E: Entity>(
        &self,
        entities: &[E],
        mapping: Option<&[ColumnMapping]>,
    ) -> Result<BatchPlan> {
        let accessor = self.accessor::<E>()?;
        let shape = accessor.shape();

        let rows = entities.iter().map(|entity| accessor.to_row(entity));
        self.planner(shape, &Options::default(), |planner| {
            planner.bulk(rows, None, mapping)
        })
    }

    pub fn load<E: Entity>(&self, row: &Row) -> Result<E> {
        self.accessor::<E>()?.from_row(row)
    }

    pub fn load_all<'a, E: Entity>(&self, rows: impl IntoIterator<Item = &'a Row>) -> Result<Vec<E>> {
        let accessor = self.accessor::<E>()?;
        rows.into_iter().map(|row| accessor.from_row(row)).collect()
    }

    fn serializer(&self) -> Serializer<'_> {
        Serializer::new(self.shared.dialect, &self.shared.capability)
    }

    fn plan(
        &self,
        shape: &EntityShape,
        operation: Operation,
        filter: Option<&Predicate>,
        options: &Options,
    ) -> Result<StatementPlan> {
        quill_sql::build(&self.serializer(), shape, operation, filter, options)
    }

    fn planner<T>(
        &self,
        shape: &EntityShape,
        options: &Options,
        f: impl FnOnce(&Planner<'_>) -> Result<T>,
    ) -> Result<T> {
        let serializer = self.serializer();
        let planner = Planner::new(&serializer, shape, options, self.shared.batch_size);
        f(&planner)
    }
}

fn to_rows<E: Entity>(accessor: &Accessor<E>, entities: &[E]) -> Vec<Vec<Value>> {
    entities.iter().map(|entity| accessor.to_row(entity)).collect()
}

/// The primary key of a row: the key value, or a list for composite keys.
fn key_of(shape: &EntityShape, row: &[Value], operation: &str) -> Result<Value> {
    let columns = &shape.primary_key;

    if columns.is_empty() {
        return Err(Error::primary_key_not_found(&shape.name, operation));
    }

    let mut key = Vec::with_capacity(columns.len());
    for &index in columns {
        let value = row.get(index).cloned().unwrap_or_default();
        if value.is_null() {
            return Err(Error::ambiguous_scope(&shape.name, operation));
        }
        key.push(value);
    }

    Ok(match <[Value; 1]>::try_from(key) {
        Ok([value]) => value,
        Err(key) => Value::List(key),
    })
}
