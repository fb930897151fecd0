use super::Error;

/// Error when an operation needs a primary key that the shape lacks.
#[derive(Debug)]
pub(super) struct PrimaryKeyNotFoundError {
    shape: Box<str>,
    operation: Box<str>,
}

impl std::error::Error for PrimaryKeyNotFoundError {}

impl core::fmt::Display for PrimaryKeyNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "primary key not found on `{}`: {} requires a primary key",
            self.shape, self.operation
        )
    }
}

impl Error {
    /// Creates a primary key not found error. `operation` names what needed
    /// the key, e.g. "upsert" or "delete by key".
    pub fn primary_key_not_found(shape: impl Into<String>, operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PrimaryKeyNotFound(
            PrimaryKeyNotFoundError {
                shape: shape.into().into(),
                operation: operation.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a primary key not found error.
    pub fn is_primary_key_not_found(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::PrimaryKeyNotFound(_)))
    }
}
