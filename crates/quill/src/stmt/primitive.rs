use crate::Result;

use quill_core::{
    stmt::{Type, Value},
    Error,
};

/// A Rust type stored in a single column.
pub trait Primitive: Sized {
    fn ty() -> Type;

    /// Returns `true` if the primitive represents a nullable type (e.g. `Option`).
    fn nullable() -> bool {
        false
    }

    fn load(value: Value) -> Result<Self>;

    fn into_value(self) -> Value;
}

macro_rules! impl_primitive {
    ( $( $t:ty => $ty:ident, )* ) => {
        $(
            impl Primitive for $t {
                fn ty() -> Type {
                    Type::$ty
                }

                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    uuid::Uuid => Uuid,
}

impl<T: Primitive> Primitive for Option<T> {
    fn ty() -> Type {
        T::ty()
    }

    fn nullable() -> bool {
        true
    }

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}

/// Loads one member of `entity` from a row value.
///
/// A member the row did not carry (`None`) takes its default. The value is
/// cast to the member type before loading.
pub fn load_member<T: Primitive + Default>(
    entity: &str,
    member: &str,
    value: Option<Value>,
) -> Result<T> {
    let Some(value) = value else {
        return Ok(T::default());
    };

    let ty = T::ty();
    let cast = match ty.cast(value.clone()) {
        Ok(cast) => cast,
        Err(_) => return Err(Error::conversion(entity, member, &value, &ty)),
    };

    if cast.is_null() && !T::nullable() {
        return Err(Error::conversion(entity, member, &value, &ty));
    }

    T::load(cast).map_err(|_| Error::conversion(entity, member, &value, &ty))
}
