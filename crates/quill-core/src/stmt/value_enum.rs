use super::TypeEnum;

/// A value of an enumerated type. Bound as its variant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueEnum {
    /// Index of the variant within its enum
    pub variant: usize,

    /// Name of the variant
    pub name: String,
}

impl ValueEnum {
    pub fn new(variant: usize, name: impl Into<String>) -> Self {
        Self {
            variant,
            name: name.into(),
        }
    }

    /// The narrowest type describing this value. Only the variant itself is
    /// known, so the enum is anonymous.
    pub(crate) fn ty(&self) -> TypeEnum {
        let mut variants = vec![String::new(); self.variant];
        variants.push(self.name.clone());
        TypeEnum {
            name: String::new(),
            variants,
        }
    }
}
