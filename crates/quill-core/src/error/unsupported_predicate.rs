use super::Error;

/// Error when a filter expression uses a construct the translator does not
/// understand.
///
/// Unsupported constructs are never evaluated on the client instead; the
/// build fails.
#[derive(Debug)]
pub(super) struct UnsupportedPredicateError {
    shape: Box<str>,
    construct: Box<str>,
}

impl std::error::Error for UnsupportedPredicateError {}

impl core::fmt::Display for UnsupportedPredicateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported predicate on `{}`: {}",
            self.shape, self.construct
        )
    }
}

impl Error {
    /// Creates an unsupported predicate error. `construct` describes the
    /// rejected part of the expression.
    pub fn unsupported_predicate(shape: impl Into<String>, construct: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedPredicate(
            UnsupportedPredicateError {
                shape: shape.into().into(),
                construct: construct.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported predicate error.
    pub fn is_unsupported_predicate(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::UnsupportedPredicate(_)))
    }
}
