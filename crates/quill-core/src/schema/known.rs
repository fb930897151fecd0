use crate::stmt::Type;

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Columns of a live table, as reported by the caller's database metadata.
///
/// When operating by table name with a dynamic payload, fields are matched
/// against this set ignoring ASCII case and unmatched fields are dropped. An
/// empty set means the table could not be resolved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KnownColumns {
    columns: Vec<KnownColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnownColumn {
    pub name: String,
    pub ty: Option<Type>,
    pub primary_key: bool,
    pub identity: bool,
}

impl KnownColumns {
    pub fn new(columns: impl IntoIterator<Item = KnownColumn>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&KnownColumn> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &KnownColumn> + '_ {
        self.columns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Hash of the set, independent of column order and name case. Part of
    /// the cache key of shapes resolved against this set.
    pub fn fingerprint(&self) -> u64 {
        let mut entries = self
            .columns
            .iter()
            .map(|column| {
                (
                    column.name.to_ascii_lowercase(),
                    &column.ty,
                    column.primary_key,
                    column.identity,
                )
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut hasher = DefaultHasher::new();
        entries.hash(&mut hasher);
        hasher.finish()
    }
}

impl KnownColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            primary_key: false,
            identity: false,
        }
    }

    pub fn ty(mut self, ty: impl Into<Type>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

impl FromIterator<KnownColumn> for KnownColumns {
    fn from_iter<T: IntoIterator<Item = KnownColumn>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_order_and_case() {
        let a = KnownColumns::new([KnownColumn::new("Id").primary_key(), KnownColumn::new("Name")]);
        let b = KnownColumns::new([KnownColumn::new("name"), KnownColumn::new("ID").primary_key()]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_sees_flags() {
        let a = KnownColumns::new([KnownColumn::new("Id").primary_key()]);
        let b = KnownColumns::new([KnownColumn::new("Id")]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
