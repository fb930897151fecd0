//! SQL statement tree. Statements name tables and columns as the database
//! knows them and carry every value as a typed [`Param`].

mod condition;
pub use condition::Condition;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod param;
pub use param::Param;

mod select;
pub use select::{Aggregate, Direction, Limit, OrderBy, Projection, Select};

mod truncate;
pub use truncate::Truncate;

mod update;
pub use update::{Assignment, Update};

mod upsert;
pub use upsert::Upsert;

pub use quill_core::filter::{Conjunction, Operator};
pub use quill_core::stmt::{Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Truncate(Truncate),
    Update(Update),
    Upsert(Upsert),

    /// Several statements sent as one command
    Batch(Vec<Statement>),
}

macro_rules! impl_from_statement {
    ( $( $variant:ident ),* ) => {
        $(
            impl From<$variant> for Statement {
                fn from(value: $variant) -> Self {
                    Statement::$variant(value)
                }
            }
        )*
    };
}

impl_from_statement!(Delete, Insert, Select, Truncate, Update, Upsert);
