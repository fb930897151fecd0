use super::Builder;
use crate::stmt::{Condition, Conjunction, Operator, Param};

use quill_core::{
    filter::{Group, Predicate},
    stmt::Value,
    Error, Result,
};

impl Builder<'_> {
    /// Lowers a translated predicate. Leaf values are bound under the leaf's
    /// parameter name, or the column name when the leaf is unbound.
    pub(super) fn condition(&self, predicate: &Predicate) -> Result<Condition> {
        Ok(match predicate {
            Predicate::Leaf(leaf) => {
                let column = self.shape.column_or_err(&leaf.field)?;
                let name = leaf.parameter.as_deref().unwrap_or(&column.name);

                Condition::Leaf {
                    column: column.name.clone(),
                    op: leaf.op,
                    param: Param::new(name, leaf.value.clone(), column.ty.clone()),
                }
            }
            Predicate::Group(Group {
                conjunction,
                children,
            }) => Condition::Group {
                conjunction: *conjunction,
                children: children
                    .iter()
                    .map(|child| self.condition(child))
                    .collect::<Result<_>>()?,
            },
        })
    }

    /// A filter matching every row lowers to no `WHERE` clause at all.
    pub(super) fn filter(&self, filter: Option<&Predicate>) -> Result<Option<Condition>> {
        match filter {
            Some(predicate) if !predicate.is_true() => Ok(Some(self.condition(predicate)?)),
            _ => Ok(None),
        }
    }

    /// Scopes a statement to the row's primary key. Fails when the shape has
    /// no key or the row leaves part of it unset.
    pub(super) fn key_condition(&self, row: &[Value], operation: &str) -> Result<Condition> {
        if !self.shape.has_primary_key() {
            return Err(Error::ambiguous_scope(&self.shape.name, operation));
        }

        let mut children = Vec::with_capacity(self.shape.primary_key.len());

        for &index in &self.shape.primary_key {
            let column = &self.shape.columns[index];

            if row[index].is_null() {
                return Err(Error::ambiguous_scope(&self.shape.name, operation));
            }

            children.push(Condition::Leaf {
                column: column.name.clone(),
                op: Operator::Eq,
                param: self.param(column, row[index].clone())?,
            });
        }

        Ok(Condition::Group {
            conjunction: Conjunction::And,
            children,
        })
    }

    /// Matches any of `keys`: an `IN` list for single-column keys, an `OR`
    /// of per-key `AND` groups for composite keys.
    pub(super) fn keys_condition(&self, keys: Vec<Value>) -> Result<Condition> {
        let pk = self.shape.primary_key_or_err("delete by primary key")?;

        if let [column] = &pk[..] {
            let values = keys
                .into_iter()
                .map(|key| self.cast(column, key))
                .collect::<Result<Vec<_>>>()?;

            return Ok(Condition::Leaf {
                column: column.name.clone(),
                op: Operator::In,
                param: Param::new(&column.name, Value::List(values), column.ty.clone()),
            });
        }

        let mut children = Vec::with_capacity(keys.len());

        for key in keys {
            let Value::List(values) = key else {
                return Err(self.err(format!(
                    "composite primary key needs a list of {} values",
                    pk.len()
                )));
            };

            if values.len() != pk.len() {
                return Err(self.err(format!(
                    "composite primary key needs a list of {} values; got {}",
                    pk.len(),
                    values.len()
                )));
            }

            let leaves = pk
                .iter()
                .zip(values)
                .map(|(column, value)| {
                    Ok(Condition::Leaf {
                        column: column.name.clone(),
                        op: Operator::Eq,
                        param: self.param(column, value)?,
                    })
                })
                .collect::<Result<_>>()?;

            children.push(Condition::Group {
                conjunction: Conjunction::And,
                children: leaves,
            });
        }

        Ok(Condition::Group {
            conjunction: Conjunction::Or,
            children,
        })
    }
}
