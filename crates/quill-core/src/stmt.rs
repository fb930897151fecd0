mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_call;
pub use expr_call::{ExprCall, Method};

mod expr_field;
pub use expr_field::ExprField;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod num;

mod op_binary;
pub use op_binary::BinaryOp;

mod record;
pub use record::Record;

mod row;
pub use row::Row;

mod ty;
pub use ty::Type;

mod ty_enum;
pub use ty_enum::TypeEnum;

mod value;
pub use value::Value;

mod value_cmp;

mod value_enum;
pub use value_enum::ValueEnum;

mod value_json;
