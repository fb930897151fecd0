use crate::{Entity, Result};

use quill_core::{
    schema::{EntityDef, EntityShape, KnownColumns, NamingConvention, ShapeIdentity, ShapeKey},
    stmt::Record,
};

use dashmap::DashMap;
use std::{
    any::TypeId,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Resolves entity types and dynamic records to their [`EntityShape`].
///
/// Shapes are built on first request and cached for the lifetime of the
/// resolver. The cache is write-once per key: two callers racing on the same
/// key may both build, but only the first shape is published.
#[derive(Debug)]
pub struct Resolver {
    convention: NamingConvention,
    shapes: DashMap<ShapeKey, Arc<EntityShape>>,
    builds: AtomicUsize,
}

impl Resolver {
    pub fn new(convention: NamingConvention) -> Self {
        Self {
            convention,
            shapes: DashMap::new(),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Resolves the shape of entity type `E`, optionally against the columns
    /// of the live table.
    pub fn resolve<E: Entity>(&self, known: Option<&KnownColumns>) -> Result<Arc<EntityShape>> {
        let key = ShapeKey {
            identity: ShapeIdentity::Type(TypeId::of::<E>()),
            known_columns: known.map(KnownColumns::fingerprint),
        };

        self.get_or_build(key, |key| {
            EntityShape::from_def(key, &E::definition(), &self.convention, known)
        })
    }

    /// Resolves the shape of a dynamic record targeting `table`. The shape is
    /// keyed by the table name and the record's field names, in order.
    pub fn resolve_dynamic(
        &self,
        table: &str,
        record: &Record,
        known: Option<&KnownColumns>,
    ) -> Result<Arc<EntityShape>> {
        let key = ShapeKey {
            identity: ShapeIdentity::Dynamic {
                table: table.to_string(),
                fields: record.field_names().map(str::to_string).collect(),
            },
            known_columns: known.map(KnownColumns::fingerprint),
        };

        self.get_or_build(key, |key| {
            let def = EntityDef::from_record(table, record);
            EntityShape::from_dynamic(key, &def, &self.convention, known)
        })
    }

    fn get_or_build(
        &self,
        key: ShapeKey,
        build: impl FnOnce(ShapeKey) -> Result<EntityShape>,
    ) -> Result<Arc<EntityShape>> {
        if let Some(shape) = self.shapes.get(&key) {
            log::trace!("shape cache hit; table={}", shape.table);
            return Ok(shape.clone());
        }

        // Failed builds are not cached; the next request retries.
        let shape = Arc::new(build(key.clone())?);
        self.builds.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "resolved shape `{}`; table={} columns={} primary_key={:?}",
            shape.name,
            shape.table,
            shape.columns.len(),
            shape
                .primary_key_columns()
                .map(|column| column.name.as_str())
                .collect::<Vec<_>>()
        );

        Ok(self.shapes.entry(key).or_insert(shape).clone())
    }

    /// Number of shapes actually built, as opposed to served from cache.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&self) {
        self.shapes.clear();
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(NamingConvention::default())
    }
}
