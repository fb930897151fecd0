use super::{Accessor, RecordAccessor};
use crate::Entity;

use quill_core::schema::{EntityShape, ShapeKey};

use dashmap::DashMap;
use std::{
    any::Any,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Accessors keyed by the shape they were compiled for.
#[derive(Debug, Default)]
pub(crate) struct AccessorCache {
    entities: DashMap<ShapeKey, Arc<dyn Any + Send + Sync>>,
    records: DashMap<ShapeKey, Arc<RecordAccessor>>,
    builds: AtomicUsize,
}

impl AccessorCache {
    pub(crate) fn entity<E: Entity>(&self, shape: &Arc<EntityShape>) -> Arc<Accessor<E>> {
        if let Some(accessor) = self.entities.get(&shape.key) {
            if let Ok(accessor) = accessor.clone().downcast::<Accessor<E>>() {
                log::trace!("accessor cache hit; entity={}", shape.name);
                return accessor;
            }
        }

        log::debug!("compiling accessor for `{}`", shape.name);
        self.builds.fetch_add(1, Ordering::Relaxed);

        let accessor = Arc::new(Accessor::<E>::new(shape.clone()));
        let erased: Arc<dyn Any + Send + Sync> = accessor.clone();
        let published = self
            .entities
            .entry(shape.key.clone())
            .or_insert(erased)
            .clone();

        published.downcast::<Accessor<E>>().unwrap_or(accessor)
    }

    pub(crate) fn record(&self, shape: &Arc<EntityShape>) -> Arc<RecordAccessor> {
        if let Some(accessor) = self.records.get(&shape.key) {
            log::trace!("accessor cache hit; table={}", shape.table);
            return accessor.clone();
        }

        log::debug!("compiling record accessor for `{}`", shape.table);
        self.builds.fetch_add(1, Ordering::Relaxed);

        self.records
            .entry(shape.key.clone())
            .or_insert_with(|| Arc::new(RecordAccessor::new(shape.clone())))
            .clone()
    }

    pub(crate) fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub(crate) fn clear(&self) {
        self.entities.clear();
        self.records.clear();
    }
}
