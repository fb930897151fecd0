//! Typed filter expressions over entity members.

mod expr;
pub use expr::Expr;

mod into_expr;
pub use into_expr::IntoExpr;

mod path;
pub use path::Path;

mod primitive;
pub use primitive::{load_member, Primitive};

pub use quill_sql::stmt::{Aggregate, Direction, OrderBy};
