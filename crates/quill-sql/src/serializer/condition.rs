use super::{Comma, Delimited, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::{Condition, Conjunction, Operator, Param, Type, Value};

impl ToSql for &Condition {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Condition::Leaf { column, op, param } => leaf(f, column, *op, param),
            Condition::Group {
                conjunction,
                children,
            } => match (&children[..], conjunction) {
                ([], Conjunction::And) => fmt!(f, "1 = 1"),
                ([], Conjunction::Or) => fmt!(f, "1 = 0"),
                ([child], _) => fmt!(f, child),
                (children, Conjunction::And) => {
                    fmt!(f, Delimited(children.iter().map(Nested), " AND "))
                }
                (children, Conjunction::Or) => {
                    fmt!(f, Delimited(children.iter().map(Nested), " OR "))
                }
            },
        }
    }
}

impl ToSql for Operator {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a String cannot fail
        let _ = write!(f.dst, "{self}");
    }
}

/// A condition nested in a group; groups of several children are
/// parenthesized.
struct Nested<'a>(&'a Condition);

impl ToSql for Nested<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Condition::Group { children, .. } if children.len() > 1 => fmt!(f, "(" self.0 ")"),
            condition => fmt!(f, condition),
        }
    }
}

/// A bound value
struct Bind<'a> {
    name: &'a str,
    value: &'a Value,
    ty: &'a Type,
}

impl ToSql for Bind<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.name, self.value, self.ty);
        fmt!(f, placeholder);
    }
}

impl<'a> From<&'a Param> for Bind<'a> {
    fn from(param: &'a Param) -> Self {
        Bind {
            name: &param.name,
            value: &param.value,
            ty: &param.ty,
        }
    }
}

impl ToSql for &Param {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        Bind::from(self).to_sql(f);
    }
}

fn leaf<P: Params>(f: &mut Formatter<'_, P>, column: &str, op: Operator, param: &Param) {
    let column = Ident(column);

    match op {
        Operator::IsNull | Operator::IsNotNull => fmt!(f, column " " op),
        Operator::In | Operator::NotIn => in_list(f, column.0, op, param),
        Operator::Between | Operator::NotBetween => {
            let bounds = param.value.as_list().unwrap_or_default();
            let (Some(low), Some(high)) = (bounds.first(), bounds.get(1)) else {
                // Bounds are checked when the predicate is translated
                return fmt!(f, "1 = 0");
            };
            let low = Bind {
                name: &param.name,
                value: low,
                ty: &param.ty,
            };
            let high = Bind {
                name: &param.name,
                value: high,
                ty: &param.ty,
            };
            fmt!(f, column " " op " " low " AND " high)
        }
        Operator::Like | Operator::NotLike => {
            let escape = match f.serializer.flavor {
                // Backslash escapes inside MySQL string literals
                Flavor::Mysql => r"'\\'",
                _ => r"'\'",
            };
            fmt!(f, column " " op " " param " ESCAPE " escape)
        }
        _ => fmt!(f, column " " op " " param),
    }
}

fn in_list<P: Params>(f: &mut Formatter<'_, P>, column: &str, op: Operator, param: &Param) {
    let negate = op == Operator::NotIn;
    let single = std::slice::from_ref(&param.value);
    let values = param.value.as_list().unwrap_or(single);

    if values.is_empty() {
        return fmt!(f, if negate { "1 = 1" } else { "1 = 0" });
    }

    let capability = f.serializer.capability;
    let max = capability.max_in_list.max(1);

    if values.len() <= max {
        let binds = values.iter().map(|value| Bind {
            name: &param.name,
            value,
            ty: &param.ty,
        });
        return fmt!(f, Ident(column) " " op " (" Comma(binds) ")");
    }

    if capability.array_parameters && f.serializer.flavor == Flavor::Postgresql {
        let list = Value::List(values.to_vec());
        let ty = Type::list(param.ty.clone());
        let bind = Bind {
            name: &param.name,
            value: &list,
            ty: &ty,
        };
        let op = if negate { " <> ALL(" } else { " = ANY(" };
        return fmt!(f, Ident(column) op bind ")");
    }

    let chunks = values
        .chunks(max)
        .map(|chunk| Condition::Leaf {
            column: column.to_string(),
            op,
            param: Param {
                name: param.name.clone(),
                value: Value::List(chunk.to_vec()),
                ty: param.ty.clone(),
            },
        })
        .collect::<Vec<_>>();
    let conjunction = if negate { " AND " } else { " OR " };

    fmt!(f, "(" Delimited(&chunks, conjunction) ")");
}
