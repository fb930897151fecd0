use super::{Flavor, Formatter, Params, ToSql};

const SQL_SERVER: &[&str] = &[
    "NOLOCK",
    "READUNCOMMITTED",
    "READCOMMITTED",
    "REPEATABLEREAD",
    "SERIALIZABLE",
    "HOLDLOCK",
    "UPDLOCK",
    "XLOCK",
    "ROWLOCK",
    "PAGLOCK",
    "TABLOCK",
    "TABLOCKX",
    "READPAST",
    "NOWAIT",
];

const POSTGRESQL: &[&str] = &[
    "FOR UPDATE",
    "FOR NO KEY UPDATE",
    "FOR SHARE",
    "FOR KEY SHARE",
    "NOWAIT",
    "SKIP LOCKED",
];

const MYSQL: &[&str] = &[
    "FOR UPDATE",
    "FOR SHARE",
    "LOCK IN SHARE MODE",
    "NOWAIT",
    "SKIP LOCKED",
];

impl Flavor {
    fn hints(self) -> &'static [&'static str] {
        match self {
            Flavor::SqlServer => SQL_SERVER,
            Flavor::Postgresql => POSTGRESQL,
            Flavor::Mysql => MYSQL,
            Flavor::Sqlite => &[],
        }
    }

    /// Normalizes `hint` (case and whitespace) and checks it against the
    /// whitelist. On failure the offending token is returned.
    pub(super) fn validate_hint(self, hint: &str) -> Result<String, String> {
        let normalized = hint
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        if self.hints().contains(&normalized.as_str()) {
            Ok(normalized)
        } else {
            Err(hint.to_string())
        }
    }
}

/// Hints placed right after the table name: `WITH (NOLOCK)`
pub(super) struct TableHints<'a>(pub(super) &'a [String]);

/// Hints placed at the end of the statement: `FOR UPDATE`
pub(super) struct TrailingHints<'a>(pub(super) &'a [String]);

impl ToSql for TableHints<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if f.serializer.is_sql_server() && !self.0.is_empty() {
            fmt!(f, " WITH (" super::Comma(self.0) ")");
        }
    }
}

impl ToSql for TrailingHints<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if !f.serializer.is_sql_server() {
            for hint in self.0 {
                fmt!(f, " " hint);
            }
        }
    }
}
