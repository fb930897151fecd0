//! Conversion of JSON payloads into values and records.

use super::{Record, Value};
use crate::{Error, Result};

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        Ok(match value {
            Json::Null => Value::Null,
            Json::Bool(value) => Value::Bool(value),
            Json::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Value::I64(value)
                } else if let Some(value) = number.as_u64() {
                    Value::U64(value)
                } else if let Some(value) = number.as_f64() {
                    Value::F64(value)
                } else {
                    crate::bail!("unsupported JSON number {number}")
                }
            }
            Json::String(value) => Value::String(value),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Json::Object(_) => crate::bail!("nested JSON objects cannot be bound as values"),
        })
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(fields) = value else {
            crate::bail!("expected a JSON object; value={value}");
        };

        let mut record = Record::with_capacity(fields.len());

        for (name, value) in fields {
            let value = Value::try_from(value).map_err(|err| err.context(format!("field `{name}`")))?;
            record.insert(name, value);
        }

        Ok(record)
    }
}

impl Record {
    /// Parses a JSON object into a record.
    pub fn from_json(src: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(src)?;
        Record::try_from(json)
    }
}
