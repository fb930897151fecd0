use super::Error;

/// Error when an operation is malformed for the shape or driver it targets.
///
/// This occurs when:
/// - A paged select has no ordering
/// - A batch size of zero is requested
/// - A bulk load targets a table that could not be resolved, or a driver
///   without a native bulk loader
/// - A table hint is not known to the dialect
/// - An aggregate is applied to a column of the wrong type
#[derive(Debug)]
pub(super) struct InvalidOperationError {
    shape: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidOperationError {}

impl core::fmt::Display for InvalidOperationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid operation on `{}`: {}",
            self.shape, self.message
        )
    }
}

impl Error {
    /// Creates an invalid operation error.
    pub fn invalid_operation(shape: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOperation(InvalidOperationError {
            shape: shape.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid operation error.
    pub fn is_invalid_operation(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidOperation(_)))
    }
}
