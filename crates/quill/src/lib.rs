pub mod accessor;
pub use accessor::{Accessor, RecordAccessor};

pub mod batch;
pub use batch::{BatchPlan, BulkLoad, ColumnMapping, SubPlan};

mod engine;
pub use engine::{Builder, Engine, Query, Table};

mod entity;
pub use entity::Entity;

mod resolver;
pub use resolver::Resolver;

pub mod stmt;

pub use quill_core::{
    driver::{Capability, Dialect},
    filter::{Leaf, Predicate, Where},
    schema::{ColumnNaming, EntityShape, KnownColumn, KnownColumns, NamingConvention, TableNaming},
    stmt::{Record, Row, Value},
    Error, Result,
};
pub use quill_macros::{Entity, Enum};
pub use quill_sql::{Options, Parameter, ResultShape, StatementPlan};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        stmt::{load_member, Expr, IntoExpr, Path, Primitive},
        Entity, Result,
    };
    pub use quill_core::{
        schema::{EntityDef, MemberDef},
        stmt::{Type, TypeEnum, Value, ValueEnum},
        Error,
    };
    pub use std::{default::Default, option::Option, vec::Vec};
}
