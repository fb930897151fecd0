use crate::stmt;

/// A mapped column of an entity shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The entity member the column reads from and writes to.
    pub member: MemberId,

    /// The column type, from the entity's point of view.
    pub ty: stmt::Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is part of the primary key
    pub primary_key: bool,

    /// True if the database generates the column's value on insert
    pub identity: bool,

    /// True if the column is read-only (computed, or declared `#[read_only]`).
    /// Excluded columns are selected but never written.
    pub excluded: bool,
}

/// Identifies the member of an entity a column maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberId {
    /// Position of the member in the entity definition
    pub index: usize,

    /// Name of the member as declared
    pub name: String,
}

impl Column {
    /// Whether insert, update and merge statements write this column.
    pub fn is_writable(&self) -> bool {
        !self.identity && !self.excluded
    }

    /// Whether update statements assign this column.
    pub fn is_updatable(&self) -> bool {
        self.is_writable() && !self.primary_key
    }

    /// Matches the column by column name or member name, ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.member.name.eq_ignore_ascii_case(name)
    }
}
