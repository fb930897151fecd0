use super::Error;

/// Which side of a bulk column mapping failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSide {
    /// The member or field the value is read from.
    Source,

    /// The table column the value is written to.
    Destination,
}

/// Error when a caller-supplied bulk column map does not fit the resolved
/// entity shape.
#[derive(Debug)]
pub(super) struct InvalidBulkMappingError {
    shape: Box<str>,
    side: MappingSide,
    column: Box<str>,

    /// The column resolved, but another mapping already targets it
    duplicate: bool,
}

impl std::error::Error for InvalidBulkMappingError {}

impl core::fmt::Display for InvalidBulkMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let side = match self.side {
            MappingSide::Source => "source",
            MappingSide::Destination => "destination",
        };

        let problem = if self.duplicate { "duplicate" } else { "unknown" };

        write!(
            f,
            "invalid bulk mapping on `{}`: {problem} {side} column `{}`",
            self.shape, self.column
        )
    }
}

impl Error {
    /// Creates an invalid bulk mapping error.
    pub fn invalid_bulk_mapping(
        shape: impl Into<String>,
        side: MappingSide,
        column: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidBulkMapping(
            InvalidBulkMappingError {
                shape: shape.into().into(),
                side,
                column: column.into().into(),
                duplicate: false,
            },
        ))
    }

    /// Creates an invalid bulk mapping error for a destination column named
    /// by more than one mapping.
    pub fn duplicate_bulk_destination(
        shape: impl Into<String>,
        column: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidBulkMapping(
            InvalidBulkMappingError {
                shape: shape.into().into(),
                side: MappingSide::Destination,
                column: column.into().into(),
                duplicate: true,
            },
        ))
    }

    /// Returns `true` if this error is an invalid bulk mapping error.
    pub fn is_invalid_bulk_mapping(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidBulkMapping(_)))
    }
}
