use super::{Formatter, ToSql};

use quill_core::stmt::{Type, Value};
use std::collections::HashSet;

pub trait Params {
    /// Stores a value and returns the placeholder referring to it.
    /// `name` is the preferred placeholder name.
    fn push(&mut self, name: &str, value: &Value, ty: &Type) -> Placeholder;
}

/// A bound parameter's position (1-based) and unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub index: usize,
    pub name: String,
}

/// Collects the parameters of one statement (or batch), giving each a name
/// that is unique within it. A name already taken gets the first free
/// numeric suffix: `Name`, `Name_1`, `Name_2`.
#[derive(Debug, Default)]
pub struct Binder {
    values: Vec<(Placeholder, Value, Type)>,
    names: HashSet<String>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<(Placeholder, Value, Type)> {
        self.values
    }

    fn unique_name(&mut self, name: &str) -> String {
        let base = sanitize(name);
        let mut candidate = base.clone();
        let mut suffix = 0;

        // SQL Server compares parameter names ignoring case
        while !self.names.insert(candidate.to_ascii_lowercase()) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }

        candidate
    }
}

impl Params for Binder {
    fn push(&mut self, name: &str, value: &Value, ty: &Type) -> Placeholder {
        let placeholder = Placeholder {
            index: self.values.len() + 1,
            name: self.unique_name(name),
        };
        self.values
            .push((placeholder.clone(), value.clone(), ty.clone()));
        placeholder
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) {
        let text = f.serializer.placeholder(&self);
        f.dst.push_str(&text);
    }
}

/// Keeps ASCII alphanumerics and `_`; anything else becomes `_`. Names
/// must not start with a digit.
fn sanitize(name: &str) -> String {
    let mut sanitized = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();

    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, 'p');
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_names_get_suffixes() {
        let mut binder = Binder::new();

        let names = ["Name", "name", "Name", "Name_1", "first name", "1st"]
            .iter()
            .map(|name| binder.push(name, &Value::Null, &Type::Unknown).name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["Name", "name_1", "Name_2", "Name_1_1", "first_name", "p1st"]);
    }

    #[test]
    fn indices_are_one_based() {
        let mut binder = Binder::new();
        assert_eq!(binder.push("a", &Value::Null, &Type::Unknown).index, 1);
        assert_eq!(binder.push("b", &Value::Null, &Type::Unknown).index, 2);
    }
}
