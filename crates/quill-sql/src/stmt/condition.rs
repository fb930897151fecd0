use super::{Conjunction, Operator, Param};

/// A `WHERE` condition over resolved columns.
///
/// For `IN` and `BETWEEN` leaves the param's value is a list and its type
/// is the item type.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf {
        column: String,
        op: Operator,
        param: Param,
    },
    Group {
        conjunction: Conjunction,
        children: Vec<Condition>,
    },
}
