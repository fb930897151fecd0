use std_util::str;

/// How table and column names are derived from entity and member names when
/// no explicit override is given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    pub table: TableNaming,
    pub column: ColumnNaming,

    /// Prepended to every table name derived from a static entity.
    pub table_prefix: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TableNaming {
    /// `OrderItem` -> `OrderItem`
    #[default]
    AsIs,

    /// `OrderItem` -> `order_item`
    SnakeCase,

    /// `OrderItem` -> `order_items`
    PluralSnakeCase,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColumnNaming {
    /// `createdAt` -> `createdAt`
    #[default]
    AsIs,

    /// `createdAt` -> `created_at`
    SnakeCase,
}

impl NamingConvention {
    /// The table for an entity. An explicit name is kept verbatim but still
    /// receives the prefix.
    pub fn table_name(&self, entity: &str, explicit: Option<&str>) -> String {
        let base = match explicit {
            Some(table) => table.to_string(),
            None => match self.table {
                TableNaming::AsIs => entity.to_string(),
                TableNaming::SnakeCase => str::snake_case(entity),
                TableNaming::PluralSnakeCase => str::pluralize(&str::snake_case(entity)),
            },
        };

        match &self.table_prefix {
            Some(prefix) => format!("{prefix}{base}"),
            None => base,
        }
    }

    pub fn column_name(&self, member: &str) -> String {
        match self.column {
            ColumnNaming::AsIs => member.to_string(),
            ColumnNaming::SnakeCase => str::snake_case(member),
        }
    }
}
