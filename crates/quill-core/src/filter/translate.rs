use super::{Conjunction, Group, Leaf, Operator, Predicate, Where};
use crate::{
    schema::{Column, EntityShape},
    stmt::{BinaryOp, Expr, ExprBinaryOp, ExprCall, Method, Type, Value},
    Error, Result,
};

/// Translates a filter input into the canonical predicate tree of `shape`.
///
/// Leaf fields are resolved to column names and leaf values are converted to
/// the column's type. Negation is pushed down so the result holds none.
pub fn translate(shape: &EntityShape, input: &Where) -> Result<Predicate> {
    let cx = Translate { shape };

    match input {
        Where::Expr(expr) => cx.expr(expr, false),
        Where::Leaf(leaf) => cx.leaf(leaf).map(Predicate::Leaf),
        Where::Leaves(leaves) => Ok(Group::and(
            leaves.iter().map(|leaf| cx.leaf(leaf)).collect::<Result<Vec<_>>>()?,
        )
        .into()),
        Where::Group(group) => cx.group(group),
        Where::Record(record) => Ok(Group::and(
            record
                .iter()
                .map(|(field, value)| {
                    let column = shape.column_or_err(field)?;
                    cx.compare(column, BinaryOp::Eq, value.clone(), false)
                })
                .collect::<Result<Vec<_>>>()?,
        )
        .into()),
        Where::Key(value) => cx.key(value),
    }
}

struct Translate<'a> {
    shape: &'a EntityShape,
}

impl Translate<'_> {
    fn unsupported(&self, construct: impl Into<String>) -> Error {
        Error::unsupported_predicate(&self.shape.name, construct)
    }

    fn leaf(&self, leaf: &Leaf) -> Result<Leaf> {
        let column = self.shape.column_or_err(&leaf.field)?;

        // `= null` is `IS NULL`
        let op = match (leaf.op, leaf.value.is_null()) {
            (Operator::Eq, true) => Operator::IsNull,
            (Operator::Ne, true) => Operator::IsNotNull,
            (Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge, true) => {
                return Err(self.unsupported(format!(
                    "ordering comparison `{}` of `{}` with null",
                    leaf.op, leaf.field
                )))
            }
            (op, _) => op,
        };

        let value = match op {
            Operator::IsNull | Operator::IsNotNull => Value::Null,
            Operator::In | Operator::NotIn | Operator::Between | Operator::NotBetween => {
                self.cast(column, &Type::list(column.ty.clone()), leaf.value.clone())?
            }
            Operator::Like | Operator::NotLike => self.cast(column, &Type::String, leaf.value.clone())?,
            _ => self.cast(column, &column.ty, leaf.value.clone())?,
        };

        if op.is_range() && value.as_list().map(<[Value]>::len) != Some(2) {
            return Err(self.unsupported(format!(
                "`{op}` on `{}` requires exactly two bounds",
                leaf.field
            )));
        }

        Ok(Leaf {
            field: column.name.clone(),
            op,
            value,
            parameter: leaf.parameter.clone(),
        })
    }

    fn group(&self, group: &Group) -> Result<Predicate> {
        let children = group
            .children
            .iter()
            .map(|child| match child {
                Predicate::Leaf(leaf) => self.leaf(leaf).map(Predicate::Leaf),
                Predicate::Group(group) => self.group(group),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Group::new(group.conjunction, children).into())
    }

    fn key(&self, value: &Value) -> Result<Predicate> {
        let columns = self.shape.primary_key_or_err("filter by primary key")?;

        if let [column] = &columns[..] {
            return self.compare(column, BinaryOp::Eq, value.clone(), false);
        }

        let values = match value.as_list() {
            Some(values) if values.len() == columns.len() => values,
            _ => {
                return Err(Error::invalid_operation(
                    &self.shape.name,
                    format!(
                        "composite primary key expects {} values; got {value:?}",
                        columns.len()
                    ),
                ))
            }
        };

        let leaves = columns
            .iter()
            .zip(values)
            .map(|(column, value)| self.compare(column, BinaryOp::Eq, value.clone(), false))
            .collect::<Result<Vec<_>>>()?;

        Ok(Group::and(leaves).into())
    }

    fn expr(&self, expr: &Expr, negate: bool) -> Result<Predicate> {
        match expr {
            Expr::And(and) => self.conjunction(Conjunction::And, &and.operands, negate),
            Expr::Or(or) => self.conjunction(Conjunction::Or, &or.operands, negate),
            Expr::Not(not) => self.expr(&not.expr, !negate),
            Expr::Field(field) => {
                let column = self.shape.column_or_err(&field.name)?;
                if !column.ty.is_bool() && !column.ty.is_unknown() {
                    return Err(self.unsupported(format!(
                        "non-boolean field `{}` used as a condition",
                        column.member.name
                    )));
                }
                self.compare(column, BinaryOp::Eq, Value::Bool(true), negate)
            }
            Expr::BinaryOp(binary_op) => self.binary_op(binary_op, negate),
            Expr::InList(in_list) => {
                let column = self.field(&in_list.expr, "IN")?;
                let Expr::Value(list) = &*in_list.list else {
                    return Err(self.unsupported("IN over a non-constant list"));
                };
                let list = match list {
                    Value::List(_) => list.clone(),
                    value => Value::List(vec![value.clone()]),
                };
                self.membership(column, list, negate)
            }
            Expr::IsNull(is_null) => {
                let column = self.field(&is_null.expr, "IS NULL")?;
                let op = if is_null.negate ^ negate {
                    Operator::IsNotNull
                } else {
                    Operator::IsNull
                };
                Ok(Leaf::new(&column.name, op, Value::Null).into())
            }
            Expr::Call(call) => self.call(call, negate),
            Expr::Value(value) => Err(self.unsupported(format!("constant-only condition `{value:?}`"))),
        }
    }

    fn conjunction(&self, conjunction: Conjunction, operands: &[Expr], negate: bool) -> Result<Predicate> {
        let conjunction = if negate { conjunction.flip() } else { conjunction };

        let children = operands
            .iter()
            .map(|operand| self.expr(operand, negate))
            .collect::<Result<Vec<_>>>()?;

        Ok(Group::new(conjunction, children).into())
    }

    fn binary_op(&self, binary_op: &ExprBinaryOp, negate: bool) -> Result<Predicate> {
        let ExprBinaryOp { lhs, op, rhs } = binary_op;

        match (&**lhs, &**rhs) {
            (Expr::Field(field), Expr::Value(value)) => {
                let column = self.shape.column_or_err(&field.name)?;
                self.compare(column, *op, value.clone(), negate)
            }
            (Expr::Value(value), Expr::Field(field)) => {
                let column = self.shape.column_or_err(&field.name)?;
                self.compare(column, op.reverse(), value.clone(), negate)
            }
            (Expr::Field(lhs), Expr::Field(rhs)) => Err(self.unsupported(format!(
                "comparison between fields `{}` and `{}`",
                lhs.name, rhs.name
            ))),
            (Expr::Value(lhs), Expr::Value(rhs)) => Err(self.unsupported(format!(
                "constant-only comparison `{lhs:?} {op} {rhs:?}`"
            ))),
            // `(condition) == true` and friends
            (expr, Expr::Value(Value::Bool(b))) | (Expr::Value(Value::Bool(b)), expr)
                if op.is_eq() || op.is_ne() =>
            {
                let holds = *b == op.is_eq();
                self.expr(expr, negate ^ !holds)
            }
            _ => Err(self.unsupported(format!("`{op}` between compound expressions"))),
        }
    }

    /// Compares a column against a constant.
    fn compare(&self, column: &Column, op: BinaryOp, value: Value, negate: bool) -> Result<Predicate> {
        let op = if negate { op.negate() } else { op };

        if value.is_null() {
            let op = match op {
                BinaryOp::Eq => Operator::IsNull,
                BinaryOp::Ne => Operator::IsNotNull,
                _ => {
                    return Err(self.unsupported(format!(
                        "ordering comparison `{op}` of `{}` with null",
                        column.member.name
                    )))
                }
            };
            return Ok(Leaf::new(&column.name, op, Value::Null).into());
        }

        let mut value = self.cast(column, &column.ty, value)?;
        let mut op = Operator::from(op);

        // `flag != false` is `flag = true`
        if let (Value::Bool(b), Operator::Ne) = (&value, op) {
            let b = *b;
            value = Value::Bool(!b);
            op = Operator::Eq;
        }

        Ok(Leaf::new(&column.name, op, value).into())
    }

    fn membership(&self, column: &Column, list: Value, negate: bool) -> Result<Predicate> {
        let list = self.cast(column, &Type::list(column.ty.clone()), list)?;
        let op = if negate { Operator::NotIn } else { Operator::In };
        Ok(Leaf::new(&column.name, op, list).into())
    }

    fn call(&self, call: &ExprCall, negate: bool) -> Result<Predicate> {
        let ExprCall {
            receiver,
            method,
            args,
        } = call;

        match (method, &**receiver, &args[..]) {
            // `list.contains(field)` is membership
            (Method::Contains, Expr::Value(list @ Value::List(_)), [Expr::Field(field)]) => {
                let column = self.shape.column_or_err(&field.name)?;
                self.membership(column, list.clone(), negate)
            }
            (Method::Contains | Method::StartsWith | Method::EndsWith, receiver, [arg]) => {
                let column = self.field(receiver, &method.to_string())?;
                let Expr::Value(Value::String(text)) = arg else {
                    return Err(self.unsupported(format!("non-string argument to `{method}`")));
                };

                let escaped = escape_like(text);
                let pattern = match method {
                    Method::Contains => format!("%{escaped}%"),
                    Method::StartsWith => format!("{escaped}%"),
                    _ => format!("%{escaped}"),
                };

                let op = if negate { Operator::NotLike } else { Operator::Like };
                Ok(Leaf::new(&column.name, op, pattern).into())
            }
            (Method::Like, receiver, [arg]) => {
                let column = self.field(receiver, "like")?;
                let Expr::Value(Value::String(pattern)) = arg else {
                    return Err(self.unsupported("non-string argument to `like`"));
                };
                let op = if negate { Operator::NotLike } else { Operator::Like };
                Ok(Leaf::new(&column.name, op, pattern.clone()).into())
            }
            (Method::Between, receiver, [Expr::Value(low), Expr::Value(high)]) => {
                let column = self.field(receiver, "between")?;
                let bounds = self.cast(
                    column,
                    &Type::list(column.ty.clone()),
                    Value::List(vec![low.clone(), high.clone()]),
                )?;
                let op = if negate {
                    Operator::NotBetween
                } else {
                    Operator::Between
                };
                Ok(Leaf::new(&column.name, op, bounds).into())
            }
            (Method::Other(name), ..) => Err(self.unsupported(format!("method `{name}`"))),
            (method, ..) => Err(self.unsupported(format!(
                "`{method}` with {} argument(s) of unsupported form",
                args.len()
            ))),
        }
    }

    /// Resolves an operand that must be a plain field reference.
    fn field(&self, expr: &Expr, construct: &str) -> Result<&Column> {
        match expr {
            Expr::Field(field) => self.shape.column_or_err(&field.name),
            _ => Err(self.unsupported(format!("`{construct}` on an expression other than a field"))),
        }
    }

    fn cast(&self, column: &Column, ty: &Type, value: Value) -> Result<Value> {
        ty.cast(value.clone())
            .map_err(|_| Error::conversion(&self.shape.name, &column.member.name, &value, ty))
    }
}

/// Escapes `LIKE` wildcards so `text` matches literally. The escape
/// character is `\`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like(r"50%_off\"), r"50\%\_off\\");
    }
}
