use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    coercion::TypeCoercer,
    compiler,
    config::ValidationConfig,
    engine::ValidationEngine,
    errors::RuleError,
    tables::Table,
    validator::ExecutableColumn,
    Dataset, Issue, RuleSet, ValidationReport,
};

/// A named dataset with its prepared rules.
///
/// The issues of the last run are kept until the next one.
pub struct RecordTable {
    table_name: String,
    dataset: Dataset,
    config: ValidationConfig,
    coercer: TypeCoercer,
    executable_columns: Box<[ExecutableColumn]>,
    last_issues: Vec<Issue>,
}

impl RecordTable {
    pub fn new(table_name: impl Into<String>, dataset: Dataset) -> Self {
        Self::with_config(table_name, dataset, ValidationConfig::default())
    }

    pub fn with_config(
        table_name: impl Into<String>,
        dataset: Dataset,
        config: ValidationConfig,
    ) -> Self {
        let coercer = config.coercer();
        Self {
            table_name: table_name.into(),
            dataset,
            config,
            coercer,
            executable_columns: Box::new([]),
            last_issues: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Issues found by the last call to [`Table::validate`].
    pub fn last_issues(&self) -> &[Issue] {
        &self.last_issues
    }

    pub fn executable_columns(&self) -> &[ExecutableColumn] {
        &self.executable_columns
    }
}

impl Table for RecordTable {
    /// Compile the rule set into executable columns
    fn prepare(&mut self, rules: &RuleSet) -> Result<(), RuleError> {
        self.executable_columns = compiler::compile_rules(rules, &self.coercer)?;

        let known = self.dataset.columns();
        for column in self.executable_columns.iter() {
            if !self.dataset.is_empty() && !known.iter().any(|c| c == column.get_name()) {
                warn!(
                    table = %self.table_name,
                    column = column.get_name(),
                    "column absent from every record, it is validated as null"
                );
            }
        }
        debug!(
            table = %self.table_name,
            columns = self.executable_columns.len(),
            "prepared rules"
        );
        Ok(())
    }

    /// Validate the dataset against the prepared rules
    fn validate(&mut self) -> Result<ValidationReport, RuleError> {
        let engine = ValidationEngine::new(&self.executable_columns, &self.coercer);
        let records = self.dataset.records();

        let issues = if self.config.should_partition(records.len()) {
            engine.validate_partitioned(records, self.config.partition_size())
        } else {
            engine.validate_records(records)
        };

        self.last_issues = issues.clone();
        Ok(ValidationReport::new(
            self.table_name.clone(),
            records.len(),
            issues,
        ))
    }

    /// Get a summary of configured rules
    fn get_rules(&self) -> IndexMap<String, Vec<String>> {
        self.executable_columns
            .iter()
            .map(|column| (column.get_name().to_string(), column.rule_names()))
            .collect()
    }
}
