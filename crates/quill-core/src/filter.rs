//! The canonical predicate tree and the translator that normalizes every
//! supported filter input into it.

mod input;
pub use input::Where;

mod operator;
pub use operator::Operator;

mod predicate;
pub use predicate::{Conjunction, Group, Leaf, Predicate};

mod translate;
pub use translate::translate;
