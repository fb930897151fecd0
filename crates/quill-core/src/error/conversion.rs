use super::Error;
use crate::stmt::{Type, Value};

/// Error when a value cannot be converted to the type of the column it is
/// loaded into or bound against.
#[derive(Debug)]
pub(super) struct ConversionError {
    shape: Box<str>,
    column: Box<str>,
    from: Type,
    to: Type,
}

impl std::error::Error for ConversionError {}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "conversion error on `{}.{}`: cannot convert {:?} to {:?}",
            self.shape, self.column, self.from, self.to
        )
    }
}

impl Error {
    /// Creates a conversion error naming the shape and column that rejected
    /// `value`.
    pub fn conversion(
        shape: impl Into<String>,
        column: impl Into<String>,
        value: &Value,
        to: &Type,
    ) -> Error {
        Error::from(super::ErrorKind::Conversion(ConversionError {
            shape: shape.into().into(),
            column: column.into().into(),
            from: value.infer_ty(),
            to: to.clone(),
        }))
    }

    /// Returns `true` if this error is a conversion error.
    pub fn is_conversion(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Conversion(_)))
    }
}
