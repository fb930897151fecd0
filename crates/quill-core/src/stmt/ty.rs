use super::{TypeEnum, Value, ValueEnum};
use crate::Result;

/// A column or value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Raw bytes
    Bytes,

    /// An enumeration stored by variant name
    Enum(TypeEnum),

    /// 32-bit float
    F32,

    /// 64-bit float
    F64,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// A list of a single type
    List(Box<Type>),

    /// String type
    String,

    /// Unsigned 8-bit integer
    U8,

    /// Unsigned 16-bit integer
    U16,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// UUID
    Uuid,

    /// A type that could not be inferred, e.g. a dynamic field holding `Null`.
    /// Values of unknown type are bound as-is.
    Unknown,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Converts `value` into this type.
    ///
    /// Conversion is best-effort: integers widen (and narrow when the value
    /// fits), integers become floats, strings parse into numbers, UUIDs and
    /// enum variants (matched case-insensitively), and `0` / `1` become
    /// booleans. `Null` passes through. Anything else is an error.
    pub fn cast(&self, value: Value) -> Result<Value> {
        if value.is_null() || self.is_unknown() || value.is_a(self) {
            return Ok(value);
        }

        Ok(match (self, value) {
            (Self::I8, value) => Value::I8(value.try_into()?),
            (Self::I16, value) => Value::I16(value.try_into()?),
            (Self::I32, value) => Value::I32(value.try_into()?),
            (Self::I64, value) => Value::I64(value.try_into()?),
            (Self::U8, value) => Value::U8(value.try_into()?),
            (Self::U16, value) => Value::U16(value.try_into()?),
            (Self::U32, value) => Value::U32(value.try_into()?),
            (Self::U64, value) => Value::U64(value.try_into()?),
            (Self::F32, value) => Value::F32(value.try_into()?),
            (Self::F64, value) => Value::F64(value.try_into()?),
            (Self::Bool, value) => match value.as_i64() {
                Some(0) => Value::Bool(false),
                Some(1) => Value::Bool(true),
                _ => match value.as_str() {
                    Some(s) if s.eq_ignore_ascii_case("true") => Value::Bool(true),
                    Some(s) if s.eq_ignore_ascii_case("false") => Value::Bool(false),
                    _ => crate::bail!("cannot convert {:?} to Bool", value.infer_ty()),
                },
            },
            (Self::String, Value::Enum(value)) => Value::String(value.name),
            (Self::String, Value::Uuid(value)) => Value::String(value.to_string()),
            (Self::Uuid, Value::String(value)) => Value::Uuid(value.trim().parse()?),
            (Self::Uuid, Value::Bytes(value)) => Value::Uuid(uuid::Uuid::from_slice(&value)?),
            (Self::Enum(ty), value) => Value::Enum(ty.resolve(value)?),
            (Self::List(item_ty), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item| item_ty.cast(item))
                    .collect::<Result<_>>()?,
            ),
            (ty, value) => crate::bail!("cannot convert {:?} to {ty:?}", value.infer_ty()),
        })
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl From<TypeEnum> for Type {
    fn from(value: TypeEnum) -> Self {
        Self::Enum(value)
    }
}

impl TypeEnum {
    /// Resolves a string (variant name, case-insensitive) or integer
    /// (variant index) into a variant of this enum.
    pub fn resolve(&self, value: Value) -> Result<ValueEnum> {
        let variant = match &value {
            Value::String(name) => self.variant_by_name(name),
            Value::Enum(other) => self.variant_by_name(&other.name),
            value => value
                .as_i64()
                .and_then(|index| usize::try_from(index).ok())
                .filter(|index| *index < self.variants.len()),
        };

        match variant {
            Some(variant) => Ok(ValueEnum {
                variant,
                name: self.variants[variant].clone(),
            }),
            None => crate::bail!(
                "{value:?} is not a variant of {}; variants={:?}",
                self.name,
                self.variants
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Type {
        Type::Enum(TypeEnum::new("Status", ["Active", "Archived"]))
    }

    #[test]
    fn cast_widens_integers() {
        assert_eq!(Type::I64.cast(Value::I32(5)).unwrap(), Value::I64(5));
        assert_eq!(Type::F64.cast(Value::I32(5)).unwrap(), Value::F64(5.0));
    }

    #[test]
    fn cast_passes_null_through() {
        assert_eq!(Type::I32.cast(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn cast_string_to_enum_ignores_case() {
        let value = status().cast(Value::from("archived")).unwrap();
        assert_eq!(
            value,
            Value::Enum(ValueEnum {
                variant: 1,
                name: "Archived".to_string()
            })
        );
    }

    #[test]
    fn cast_integer_to_enum_uses_index() {
        let value = status().cast(Value::I32(0)).unwrap();
        assert_eq!(
            value,
            Value::Enum(ValueEnum {
                variant: 0,
                name: "Active".to_string()
            })
        );
        assert!(status().cast(Value::I32(7)).is_err());
    }

    #[test]
    fn cast_bool_from_integer() {
        assert_eq!(Type::Bool.cast(Value::I64(1)).unwrap(), Value::Bool(true));
        assert!(Type::Bool.cast(Value::I64(2)).is_err());
    }

    #[test]
    fn cast_rejects_unrelated_types() {
        let err = Type::Uuid.cast(Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert Bool to Uuid");
    }
}
