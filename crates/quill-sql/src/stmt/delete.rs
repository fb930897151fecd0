use super::Condition;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,

    /// `None` deletes every row
    pub filter: Option<Condition>,
}
