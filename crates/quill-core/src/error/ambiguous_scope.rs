use super::Error;

/// Error when a mutation has no explicit scope.
///
/// An update or delete without a predicate, issued with a payload that
/// carries no primary key value, would touch every row. Mass mutations must be
/// requested through the explicit `update_all` / `delete_all` operations.
#[derive(Debug)]
pub(super) struct AmbiguousScopeError {
    shape: Box<str>,
    operation: Box<str>,
}

impl std::error::Error for AmbiguousScopeError {}

impl core::fmt::Display for AmbiguousScopeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous scope on `{}`: {} has neither a predicate nor a primary key value; \
             use the `_all` variant to target every row",
            self.shape, self.operation
        )
    }
}

impl Error {
    /// Creates an ambiguous scope error for `operation` on `shape`.
    pub fn ambiguous_scope(shape: impl Into<String>, operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AmbiguousScope(AmbiguousScopeError {
            shape: shape.into().into(),
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error is an ambiguous scope error.
    pub fn is_ambiguous_scope(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::AmbiguousScope(_)))
    }
}
