pub mod builder;
pub use builder::{build, Operation, Options};

mod plan;
pub use plan::{Parameter, ResultShape, StatementPlan};

pub mod serializer;
pub use serializer::{Binder, Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::Statement;
