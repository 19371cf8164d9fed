//! Rule sets read from JSON or TOML.
//!
//! Both formats share one shape: a table keyed by column name whose values
//! are tables of rule fields. Document order becomes column order.
//!
//! ```toml
//! [id]
//! type = "str"
//! required = true
//! unique = true
//!
//! [age]
//! type = "int"
//! min = 0
//! max = 120
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{
    coercion::CoercedValue,
    columns::{Rule, RuleSet, TypeSpec},
    utils::json_kind,
    RuleError,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleConfig {
    #[serde(default)]
    required: bool,
    #[serde(default)]
    not_null: bool,
    #[serde(rename = "type")]
    type_label: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    len_min: Option<usize>,
    len_max: Option<usize>,
    allowed: Option<Vec<ConfigScalar>>,
    regex: Option<String>,
    #[serde(default)]
    unique: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigScalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<ConfigScalar> for CoercedValue {
    fn from(value: ConfigScalar) -> Self {
        match value {
            ConfigScalar::Bool(b) => CoercedValue::Boolean(b),
            ConfigScalar::Integer(i) => CoercedValue::Integer(i),
            ConfigScalar::Float(f) => CoercedValue::Float(f),
            ConfigScalar::Text(s) => CoercedValue::Text(s),
        }
    }
}

impl RuleConfig {
    fn into_rule(self, column: &str) -> Result<Rule, RuleError> {
        let type_spec = self
            .type_label
            .map(|label| {
                TypeSpec::from_label(&label).ok_or_else(|| RuleError::UnknownType {
                    column: column.to_string(),
                    label,
                })
            })
            .transpose()?;

        Ok(Rule {
            required: self.required,
            not_null: self.not_null,
            type_spec,
            min: self.min,
            max: self.max,
            len_min: self.len_min,
            len_max: self.len_max,
            allowed: self
                .allowed
                .map(|members| members.into_iter().map(CoercedValue::from).collect()),
            regex: self.regex,
            unique: self.unique,
        })
    }
}

impl RuleSet {
    /// Read a rule set from a JSON object of column rules.
    pub fn from_json(value: &Value) -> Result<Self, RuleError> {
        let columns = value.as_object().ok_or_else(|| {
            RuleError::RuleSetShape(format!("expected an object, found {}", json_kind(value)))
        })?;

        columns
            .iter()
            .map(|(column, rule)| {
                if !rule.is_object() {
                    return Err(RuleError::InvalidRule {
                        column: column.clone(),
                        message: format!("expected a table of rule fields, found {}", json_kind(rule)),
                    });
                }
                let config: RuleConfig =
                    serde_json::from_value(rule.clone()).map_err(|e| RuleError::InvalidRule {
                        column: column.clone(),
                        message: e.to_string(),
                    })?;
                Ok((column.clone(), config.into_rule(column)?))
            })
            .collect()
    }

    pub fn from_json_str(input: &str) -> Result<Self, RuleError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }

    /// Read a rule set from a TOML document, one table per column.
    pub fn from_toml_str(input: &str) -> Result<Self, RuleError> {
        let document: toml::Table = toml::from_str(input)?;

        document
            .into_iter()
            .map(|(column, rule)| {
                if !rule.is_table() {
                    return Err(RuleError::InvalidRule {
                        message: format!("expected a table of rule fields, found {}", rule.type_str()),
                        column,
                    });
                }
                let config: RuleConfig = rule.try_into().map_err(|e: toml::de::Error| {
                    RuleError::InvalidRule {
                        column: column.clone(),
                        message: e.to_string(),
                    }
                })?;
                let rule = config.into_rule(&column)?;
                Ok((column, rule))
            })
            .collect()
    }
}
