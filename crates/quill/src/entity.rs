use quill_core::{schema::EntityDef, stmt::Value, Result};

/// A statically typed entity mapped onto a table.
///
/// Implemented by `#[derive(Entity)]`. Members are the mapped fields of the
/// struct, in declaration order; fields marked `#[skip]` are not members.
pub trait Entity: Sized + 'static {
    /// Typed paths to the entity's members, used to build filters
    type Fields;

    /// Describes the entity's members and their mapping attributes.
    fn definition() -> EntityDef;

    fn fields() -> Self::Fields;

    /// The value of every member, in declaration order.
    fn field_values(&self) -> Vec<Value>;

    /// Builds an instance from member values in declaration order. `None`
    /// marks a member the source row did not carry; it takes its default.
    fn load(values: Vec<Option<Value>>) -> Result<Self>;
}
