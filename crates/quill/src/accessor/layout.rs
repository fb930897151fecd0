use crate::Result;

use quill_core::{
    schema::{Column, EntityShape},
    stmt::Value,
    Error,
};

use dashmap::DashMap;
use std::sync::Arc;

/// Maps the columns of one row layout onto shape columns.
#[derive(Debug)]
pub(super) struct Layout {
    /// For each row column, the matching shape column
    slots: Vec<Option<usize>>,
}

impl Layout {
    fn compile(shape: &EntityShape, columns: &[String]) -> Self {
        Self {
            slots: columns
                .iter()
                .map(|name| shape.column_index(name))
                .collect(),
        }
    }

    /// Pairs of (row column index, shape column index) for matched columns.
    pub(super) fn columns(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|column| (index, column)))
    }

    pub(super) fn cast(&self, shape: &EntityShape, column: &Column, value: &Value) -> Result<Value> {
        column
            .ty
            .cast(value.clone())
            .map_err(|_| Error::conversion(&shape.name, &column.name, value, &column.ty))
    }
}

/// Compiled layouts, keyed by the row's column list.
#[derive(Debug, Default)]
pub(super) struct Layouts {
    compiled: DashMap<Arc<[String]>, Arc<Layout>>,
}

impl Layouts {
    pub(super) fn get_or_compile(&self, shape: &EntityShape, columns: &Arc<[String]>) -> Arc<Layout> {
        if let Some(layout) = self.compiled.get(columns) {
            return layout.clone();
        }

        log::trace!("compiling row layout for `{}`; columns={columns:?}", shape.name);

        let layout = Arc::new(Layout::compile(shape, columns));
        self.compiled
            .entry(columns.clone())
            .or_insert(layout)
            .clone()
    }

    pub(super) fn len(&self) -> usize {
        self.compiled.len()
    }
}
