//! Typed coercion and rule validation for survey-style records.
//!
//! Raw string cells are coerced to the type their column declares, checked
//! against the column's rules, and every violation is reported as an
//! [`Issue`]. Bad data never stops a run; only configuration problems are
//! errors.
//!
//! ```
//! use serde_json::json;
//!
//! let issues = surveyguard_core::validate_json(
//!     &json!([{"age": "19"}, {"age": "-5"}]),
//!     &json!({"age": {"type": "int", "min": 0}}),
//! )
//! .unwrap();
//!
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].message(), "Value -5 < min 0.");
//! ```

pub mod coercion;
pub mod columns;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod results;
pub mod rules;
pub mod tables;
pub mod types;
pub mod utils;
pub mod validator;

pub use coercion::{CoercedValue, NullCanonicalizer, TypeCoercer};
pub use columns::{rule_builder::RuleBuilder, Rule, RuleSet, TypeSpec};
pub use config::{ValidationConfig, ValidationConfigBuilder};
pub use engine::{UniquenessTracker, ValidationEngine};
pub use errors::RuleError;
pub use results::{Issue, RuleKind, RuleResult, ValidationReport};
pub use tables::{record_table::RecordTable, Table};
pub use types::{Dataset, RawRecord, RawValue};
pub use validator::Validator;

use serde_json::Value;

/// Validate `dataset` against `rules` in one sequential pass.
///
/// Fails only when the rules cannot be compiled.
pub fn validate(dataset: &Dataset, rules: &RuleSet) -> Result<Vec<Issue>, RuleError> {
    let coercer = TypeCoercer::default();
    let columns = compiler::compile_rules(rules, &coercer)?;
    let engine = ValidationEngine::new(&columns, &coercer);
    Ok(engine.validate_records(dataset.records()))
}

/// [`validate`] for a JSON array of records and a JSON rule object.
pub fn validate_json(dataset: &Value, rules: &Value) -> Result<Vec<Issue>, RuleError> {
    let rules = RuleSet::from_json(rules)?;
    let dataset = Dataset::from_json(dataset)?;
    validate(&dataset, &rules)
}
