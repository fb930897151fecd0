mod column;
pub use column::{Column, MemberId};

mod entity;
pub use entity::{EntityDef, MemberDef};

mod known;
pub use known::{KnownColumn, KnownColumns};

mod naming;
pub use naming::{ColumnNaming, NamingConvention, TableNaming};

mod shape;
pub use shape::{EntityShape, ShapeIdentity, ShapeKey};

mod shape_builder;
