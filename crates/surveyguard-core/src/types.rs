use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{utils::json_kind, RuleError};

/// A raw cell as exported by the survey tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Explicit null marker
    Null,
    Text(String),
}

impl RawValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Null => None,
            RawValue::Text(s) => Some(s.as_str()),
        }
    }

    /// Scalars are accepted as their text form, containers are not.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(RawValue::Null),
            Value::String(s) => Some(RawValue::Text(s.clone())),
            Value::Number(n) => Some(RawValue::Text(n.to_string())),
            Value::Bool(b) => Some(RawValue::Text(b.to_string())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

/// One exported record: column name to raw value, in export order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: IndexMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) -> &mut Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// `None` when the column is absent from this record.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered record set. A record's position is its `row_index`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<RawRecord>,
}

impl Dataset {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Read a dataset from a JSON array of objects.
    ///
    /// Field values must be strings or null. Numbers and booleans are
    /// accepted and kept as their text form.
    pub fn from_json(value: &Value) -> Result<Self, RuleError> {
        let rows = value.as_array().ok_or_else(|| {
            RuleError::DatasetShape(format!("expected an array, found {}", json_kind(value)))
        })?;

        rows.iter()
            .enumerate()
            .map(|(row_index, row)| {
                let fields = row.as_object().ok_or_else(|| {
                    RuleError::DatasetShape(format!(
                        "record {} is {}, expected an object",
                        row_index,
                        json_kind(row)
                    ))
                })?;
                fields
                    .iter()
                    .map(|(column, v)| {
                        let raw = RawValue::from_json(v).ok_or_else(|| {
                            RuleError::DatasetShape(format!(
                                "record {}, column '{}': {} is not a scalar value",
                                row_index,
                                column,
                                json_kind(v)
                            ))
                        })?;
                        Ok((column.clone(), raw))
                    })
                    .collect::<Result<RawRecord, RuleError>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn get(&self, row_index: usize) -> Option<&RawRecord> {
        self.records.get(row_index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of the column names of every record, sorted.
    pub fn columns(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.columns())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }
}

impl From<Vec<RawRecord>> for Dataset {
    fn from(records: Vec<RawRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<RawRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
