use super::Error;

/// Error when an entity shape cannot be mapped onto columns.
///
/// This occurs when:
/// - A shape ends up with no usable columns
/// - A predicate, projection or ordering names a field that does not resolve
///   to a column of the shape
/// - A known-columns set drops every field of a dynamic payload
#[derive(Debug)]
pub(super) struct MappingError {
    shape: Box<str>,
    field: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "mapping error on `{}.{}`: {}",
                self.shape, field, self.message
            ),
            None => write!(f, "mapping error on `{}`: {}", self.shape, self.message),
        }
    }
}

impl Error {
    /// Creates a mapping error for `shape`, optionally naming the field that
    /// failed to resolve.
    pub fn mapping(
        shape: impl Into<String>,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            shape: shape.into().into(),
            field: field.map(Into::into),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::Mapping(_)))
    }
}
