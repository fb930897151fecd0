use super::{Engine, Shared};
use crate::{accessor::AccessorCache, batch::DEFAULT_BATCH_SIZE, Resolver};

use quill_core::{
    driver::{Capability, Dialect},
    schema::{ColumnNaming, NamingConvention, TableNaming},
};

use std::sync::Arc;

#[derive(Debug)]
pub struct Builder {
    dialect: Dialect,

    /// Overrides the dialect's default capabilities
    capability: Option<Capability>,

    convention: NamingConvention,
    batch_size: usize,
}

impl Builder {
    pub fn dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    /// Describes what the driver can do, when it differs from the dialect's
    /// defaults.
    pub fn capability(&mut self, capability: Capability) -> &mut Self {
        self.capability = Some(capability);
        self
    }

    pub fn naming_convention(&mut self, convention: NamingConvention) -> &mut Self {
        self.convention = convention;
        self
    }

    pub fn table_naming(&mut self, naming: TableNaming) -> &mut Self {
        self.convention.table = naming;
        self
    }

    pub fn column_naming(&mut self, naming: ColumnNaming) -> &mut Self {
        self.convention.column = naming;
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.convention.table_prefix = Some(prefix.to_string());
        self
    }

    /// Default number of entities per sub-batch of a set-based operation.
    pub fn batch_size(&mut self, batch_size: usize) -> &mut Self {
        self.batch_size = batch_size;
        self
    }

    pub fn build(&self) -> Engine {
        let capability = self
            .capability
            .clone()
            .unwrap_or_else(|| self.dialect.capability().clone());

        log::debug!(
            "building engine; dialect={} batch_size={}",
            self.dialect,
            self.batch_size
        );

        Engine {
            shared: Arc::new(Shared {
                dialect: self.dialect,
                capability,
                resolver: Resolver::new(self.convention.clone()),
                accessors: AccessorCache::default(),
                batch_size: self.batch_size,
            }),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dialect: Dialect::Sqlite,
            capability: None,
            convention: NamingConvention::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}
