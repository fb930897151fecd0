use super::Column;
use crate::{Error, Result};

use std::any::TypeId;

/// The resolved mapping of an entity type or dynamic record onto a table.
///
/// Shapes are built once per [`ShapeKey`] and shared, immutable, for the
/// lifetime of the cache that owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityShape {
    /// Cache key the shape was built for
    pub key: ShapeKey,

    /// Name of the entity, used in error messages
    pub name: String,

    /// Table the entity maps to
    pub table: String,

    /// Mapped columns, in member declaration order
    pub columns: Vec<Column>,

    /// Indices into `columns` of the primary key, in declaration order
    pub primary_key: Vec<usize>,

    /// Index into `columns` of the identity column, if any
    pub identity: Option<usize>,

    /// Number of members of the entity definition, mapped or not
    pub member_count: usize,
}

/// Identifies a shape in the resolver cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    pub identity: ShapeIdentity,

    /// Fingerprint of the known-columns set the shape was resolved against
    pub known_columns: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeIdentity {
    /// A statically typed entity
    Type(TypeId),

    /// A dynamic record targeting a table by name
    Dynamic { table: String, fields: Vec<String> },
}

impl EntityShape {
    /// Finds a column by column name or member name, ignoring ASCII case.
    /// Exact column name matches win.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .or_else(|| self.columns.iter().find(|column| column.matches(name)))
    }

    /// Like [`column`](Self::column), failing with a mapping error.
    pub fn column_or_err(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| {
            Error::mapping(
                &self.name,
                Some(name),
                format!("no column of table `{}` matches the field", self.table),
            )
        })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let column = self.column(name)?;
        self.columns.iter().position(|c| std::ptr::eq(c, column))
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key.iter().map(|index| &self.columns[*index])
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// The primary key columns, failing when the shape has none.
    pub fn primary_key_or_err(&self, operation: &str) -> Result<Vec<&Column>> {
        if self.primary_key.is_empty() {
            return Err(Error::primary_key_not_found(&self.name, operation));
        }

        Ok(self.primary_key_columns().collect())
    }

    pub fn identity_column(&self) -> Option<&Column> {
        self.identity.map(|index| &self.columns[index])
    }

    /// Columns written by insert statements.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.is_writable())
    }

    /// Columns assigned by update statements: writable and not part of the
    /// primary key.
    pub fn updatable_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.is_updatable())
    }
}
