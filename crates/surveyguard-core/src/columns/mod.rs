pub mod config;
pub mod rule_builder;


use std::fmt;

use indexmap::IndexMap;

use crate::coercion::CoercedValue;

/// Target type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    Integer,
    Float,
    Boolean,
    Text,
    /// strftime-style pattern, e.g. `%Y-%m-%d`
    DateTime { format: String },
}

impl TypeSpec {
    /// Parse a configuration label: `int`, `float`, `bool`, `str` or
    /// `datetime:<format>`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "int" => Some(TypeSpec::Integer),
            "float" => Some(TypeSpec::Float),
            "bool" => Some(TypeSpec::Boolean),
            "str" => Some(TypeSpec::Text),
            other => other
                .strip_prefix("datetime:")
                .filter(|format| !format.is_empty())
                .map(|format| TypeSpec::DateTime {
                    format: format.to_string(),
                }),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeSpec::Integer | TypeSpec::Float)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Integer => write!(f, "int"),
            TypeSpec::Float => write!(f, "float"),
            TypeSpec::Boolean => write!(f, "bool"),
            TypeSpec::Text => write!(f, "str"),
            TypeSpec::DateTime { format } => write!(f, "datetime:{}", format),
        }
    }
}

/// Declarative constraints for one column. Absent fields are not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rule {
    pub required: bool,
    pub not_null: bool,
    pub type_spec: Option<TypeSpec>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub len_min: Option<usize>,
    pub len_max: Option<usize>,
    /// Members as written in the configuration, coerced to the column type
    /// when the rule is compiled
    pub allowed: Option<Vec<CoercedValue>>,
    pub regex: Option<String>,
    pub unique: bool,
}

/// Column name to rule, in the order issues are reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    columns: IndexMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule of `column`. A replaced column keeps its
    /// original position.
    pub fn insert(&mut self, column: impl Into<String>, rule: Rule) -> &mut Self {
        self.columns.insert(column.into(), rule);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Rule> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.columns.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}
