/// What the driver behind a dialect can do. Planning consults it to pick
/// statement forms and batch sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Supports `INSERT .. VALUES (..), (..)` with several rows.
    pub multi_row_insert: bool,

    /// Has a native bulk-load path (`COPY`, `LOAD DATA`, bulk copy).
    pub bulk_load: bool,

    /// Supports `RETURNING` (or `OUTPUT INSERTED`) on insert statements.
    pub returning: bool,

    /// Accepts several `;`-separated statements in one command.
    pub multi_statement: bool,

    /// Maximum number of bound parameters in one statement.
    pub max_parameters: usize,

    /// Accepts a list bound as a single array parameter.
    pub array_parameters: bool,

    /// IN lists longer than this are bound as an array parameter when
    /// supported, else split into OR-ed IN groups.
    pub max_in_list: usize,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        multi_row_insert: true,
        bulk_load: false,
        returning: true,
        multi_statement: false,

        // SQLITE_MAX_VARIABLE_NUMBER defaults to 32766 since 3.32.0
        max_parameters: 32_766,
        array_parameters: false,
        max_in_list: 1_000,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        bulk_load: true,
        multi_statement: true,

        // The bind message encodes the parameter count as an i16
        max_parameters: 65_535,
        array_parameters: true,
        ..Self::SQLITE
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        bulk_load: true,
        returning: false,
        multi_statement: true,
        max_parameters: 65_535,
        ..Self::SQLITE
    };

    /// SQL Server capabilities
    pub const SQLSERVER: Self = Self {
        bulk_load: true,
        multi_statement: true,

        // RPC requests carry at most 2100 parameters
        max_parameters: 2_100,
        ..Self::SQLITE
    };
}
