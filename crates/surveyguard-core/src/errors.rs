use thiserror::Error;

/// Configuration errors.
///
/// Raised once, before any record is processed. Problems found in the data
/// itself are never errors, they are reported as [`crate::Issue`]s.
#[derive(Error, Debug)]
pub enum RuleError {
    /// The dataset is not an ordered sequence of records
    #[error("Dataset must be a sequence of records: {0}")]
    DatasetShape(String),

    /// The rule set is not a mapping from column name to rule
    #[error("Rule set must map column names to rules: {0}")]
    RuleSetShape(String),

    /// A single column rule could not be read
    #[error("Rule for column '{column}' is malformed: {message}")]
    InvalidRule { column: String, message: String },

    /// A rule names a type label nobody understands
    #[error(
        "Unknown type label '{label}' for column '{column}'. Supported: int, float, bool, str, datetime:<format>"
    )]
    UnknownType { column: String, label: String },

    /// The regex pattern of a rule does not compile
    #[error("Invalid regex pattern '{pattern}' for column '{column}': {source}")]
    InvalidRegex {
        column: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No table registered under this name
    #[error("Table '{0}' not found in Validator")]
    TableNotFound(String),

    /// JSON syntax error while reading a rule set or a dataset
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML syntax error while reading a rule set
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}
