mod capability;
pub use capability::Capability;

mod dialect;
pub use dialect::Dialect;
