#[derive(Debug, Clone, PartialEq)]
pub struct Truncate {
    pub table: String,
}
