use super::Serializer;

use quill_core::driver::{Capability, Dialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
    SqlServer,
}

impl Serializer<'static> {
    pub fn sqlite() -> Serializer<'static> {
        Serializer {
            flavor: Flavor::Sqlite,
            capability: &Capability::SQLITE,
        }
    }

    pub fn postgresql() -> Serializer<'static> {
        Serializer {
            flavor: Flavor::Postgresql,
            capability: &Capability::POSTGRESQL,
        }
    }

    pub fn mysql() -> Serializer<'static> {
        Serializer {
            flavor: Flavor::Mysql,
            capability: &Capability::MYSQL,
        }
    }

    pub fn sql_server() -> Serializer<'static> {
        Serializer {
            flavor: Flavor::SqlServer,
            capability: &Capability::SQLSERVER,
        }
    }
}

impl Serializer<'_> {
    pub(super) fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }

    pub(super) fn is_sql_server(&self) -> bool {
        self.flavor == Flavor::SqlServer
    }
}

impl From<Dialect> for Flavor {
    fn from(value: Dialect) -> Self {
        match value {
            Dialect::Sqlite => Flavor::Sqlite,
            Dialect::Postgresql => Flavor::Postgresql,
            Dialect::Mysql => Flavor::Mysql,
            Dialect::SqlServer => Flavor::SqlServer,
        }
    }
}

impl From<Flavor> for Dialect {
    fn from(value: Flavor) -> Self {
        match value {
            Flavor::Sqlite => Dialect::Sqlite,
            Flavor::Postgresql => Dialect::Postgresql,
            Flavor::Mysql => Dialect::Mysql,
            Flavor::SqlServer => Dialect::SqlServer,
        }
    }
}
