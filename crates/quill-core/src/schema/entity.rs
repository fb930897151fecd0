use crate::stmt::{Record, Type};

/// Declarative description of an entity, produced by `#[derive(Entity)]` or
/// built from a dynamic record.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDef {
    /// Name of the entity type
    pub name: String,

    /// Explicit table name, from `#[table = "..."]`
    pub table: Option<String>,

    /// Mapped members in declaration order. Members marked `#[skip]` are
    /// not listed.
    pub members: Vec<MemberDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,

    /// Explicit column name, from `#[column("...")]`
    pub column: Option<String>,

    /// `#[key]`
    pub key: bool,

    /// `#[auto]`
    pub auto: bool,

    /// `#[read_only]`
    pub read_only: bool,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            members: vec![],
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    /// Describes a dynamic payload targeting `table`. Field types are inferred
    /// from the record's values; every field is nullable.
    pub fn from_record(table: &str, record: &Record) -> Self {
        Self {
            name: table.to_string(),
            table: Some(table.to_string()),
            members: record
                .iter()
                .map(|(name, value)| MemberDef::new(name, value.infer_ty()).nullable())
                .collect(),
        }
    }
}

impl MemberDef {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
            column: None,
            key: false,
            auto: false,
            read_only: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn auto(mut self) -> Self {
        self.auto = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}
