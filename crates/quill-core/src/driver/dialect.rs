use super::Capability;

use std::fmt;

/// The SQL dialect statements are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Sqlite,
    Postgresql,
    Mysql,
    SqlServer,
}

impl Dialect {
    /// The capabilities a driver for this dialect has unless configured
    /// otherwise.
    pub const fn capability(self) -> &'static Capability {
        match self {
            Self::Sqlite => &Capability::SQLITE,
            Self::Postgresql => &Capability::POSTGRESQL,
            Self::Mysql => &Capability::MYSQL,
            Self::SqlServer => &Capability::SQLSERVER,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => "SQLite".fmt(f),
            Self::Postgresql => "PostgreSQL".fmt(f),
            Self::Mysql => "MySQL".fmt(f),
            Self::SqlServer => "SQL Server".fmt(f),
        }
    }
}
