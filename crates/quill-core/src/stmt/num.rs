use super::{Type, Value};

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty) {
                $is:ident
            } )*
    ) => {
        impl Type {
            $(
                pub fn $is(&self) -> bool {
                    matches!(self, Self::$variant)
                }
            )*
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }
        )*
    };
}

impl_num! {
    I8(i8) {
        is_i8
    }
    I16(i16) {
        is_i16
    }
    I32(i32) {
        is_i32
    }
    I64(i64) {
        is_i64
    }
    U8(u8) {
        is_u8
    }
    U16(u16) {
        is_u16
    }
    U32(u32) {
        is_u32
    }
    U64(u64) {
        is_u64
    }
    F32(f32) {
        is_f32
    }
    F64(f64) {
        is_f64
    }
}

// Cross-type numeric conversions. Every integer variant converts into every
// integer type when the value fits; strings are parsed.

macro_rules! try_convert_range {
    ($val:expr, $target_ty:ty) => {
        $val.try_into().map_err(|_| {
            crate::err!(
                "value {} is out of range for {}",
                $val,
                stringify!($target_ty)
            )
        })
    };
}

macro_rules! parse_string {
    ($s:expr, $target_ty:ty) => {
        $s.trim()
            .parse::<$target_ty>()
            .map_err(|_| crate::err!("cannot parse '{}' as {}", $s, stringify!($target_ty)))
    };
}

macro_rules! conversion_fallback {
    ($value:expr, $target_ty:ty) => {
        crate::bail!(
            "cannot convert {:?} to {}",
            $value.infer_ty(),
            stringify!($target_ty)
        )
    };
}

macro_rules! impl_try_from_int {
    ( $( $variant:ident($ty:ty) ),* ) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = crate::Error;

                #[allow(unreachable_patterns)]
                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(val) => Ok(val),
                        Value::I8(val) => try_convert_range!(val, $ty),
                        Value::I16(val) => try_convert_range!(val, $ty),
                        Value::I32(val) => try_convert_range!(val, $ty),
                        Value::I64(val) => try_convert_range!(val, $ty),
                        Value::U8(val) => try_convert_range!(val, $ty),
                        Value::U16(val) => try_convert_range!(val, $ty),
                        Value::U32(val) => try_convert_range!(val, $ty),
                        Value::U64(val) => try_convert_range!(val, $ty),
                        Value::String(ref s) => parse_string!(s, $ty),
                        _ => conversion_fallback!(value, $ty),
                    }
                }
            }
        )*
    };
}

impl_try_from_int!(
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64)
);

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F64(val) => Ok(val),
            Value::F32(val) => Ok(val.into()),
            Value::String(ref s) => parse_string!(s, f64),
            ref value => match value.as_f64() {
                Some(val) => Ok(val),
                None => conversion_fallback!(value, f64),
            },
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F32(val) => Ok(val),
            Value::I8(val) => Ok(val.into()),
            Value::I16(val) => Ok(val.into()),
            Value::U8(val) => Ok(val.into()),
            Value::U16(val) => Ok(val.into()),
            Value::String(ref s) => parse_string!(s, f32),
            _ => conversion_fallback!(value, f32),
        }
    }
}
