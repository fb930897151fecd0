use crate::{stmt::Statement, Binder, Serializer};

use quill_core::stmt::{Type, Value};

/// SQL text plus everything needed to execute it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPlan {
    pub sql: String,

    /// One entry per placeholder in `sql`, in order of appearance
    pub params: Vec<Parameter>,

    /// What executing the statement yields
    pub result: ResultShape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The placeholder as written in the SQL text: `?1`, `$1`, `?` or `@Name`
    pub placeholder: String,

    /// Unique name of the parameter within the statement
    pub name: String,
    pub value: Value,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultShape {
    /// The number of affected rows
    RowsAffected,

    /// Rows with the given columns
    Rows(Vec<String>),

    /// A single value of the given type
    Scalar(Type),

    /// The identity generated by the last insert, read through the driver
    LastInsertId,
}

impl StatementPlan {
    pub fn new(serializer: &Serializer<'_>, stmt: &Statement, result: ResultShape) -> Self {
        let mut binder = Binder::new();
        let sql = serializer.serialize(stmt, &mut binder);

        let params = binder
            .into_values()
            .into_iter()
            .map(|(placeholder, value, ty)| Parameter {
                placeholder: serializer.placeholder(&placeholder),
                name: placeholder.name,
                value,
                ty,
            })
            .collect();

        Self { sql, params, result }
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + '_ {
        self.params.iter().map(|param| &param.value)
    }
}
