use super::{Type, Value};

/// A value to bind, with its column type and the name its placeholder is
/// derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, ty: Type) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ty,
        }
    }
}
