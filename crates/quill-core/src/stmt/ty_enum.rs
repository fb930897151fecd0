/// An enumeration type, described by its variant names in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TypeEnum {
    /// Name of the enum, used in error messages
    pub name: String,

    /// Variant names; a variant's index is its discriminant
    pub variants: Vec<String>,
}

impl TypeEnum {
    pub fn new<S: Into<String>>(name: impl Into<String>, variants: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Finds a variant by name, ignoring ASCII case.
    pub fn variant_by_name(&self, name: &str) -> Option<usize> {
        self.variants
            .iter()
            .position(|variant| variant.eq_ignore_ascii_case(name))
    }
}
