#[macro_use]
mod macros;

pub mod driver;

mod error;
pub use error::{Error, IntoError, MappingSide};

pub mod filter;

pub mod schema;

pub mod stmt;

/// A Result type alias that uses Quill's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
