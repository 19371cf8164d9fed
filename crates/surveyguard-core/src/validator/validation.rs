//! Registry of named tables.

use indexmap::IndexMap;
use tracing::info;

use crate::{errors::RuleError, RecordTable, Table, ValidationReport};

/// Main entry point for validating several tables.
///
/// Tables are validated in the order they were added. Each table carries
/// its own rules and configuration.
#[derive(Default)]
pub struct Validator {
    tables: IndexMap<String, RecordTable>,
}

impl Validator {
    /// Create a new empty validator.
    pub fn new() -> Self {
        Self {
            tables: IndexMap::new(),
        }
    }

    /// Add a prepared table under its own name.
    ///
    /// A table with the same name is replaced in place.
    pub fn add_table(&mut self, table: RecordTable) {
        let _ = self.tables.insert(table.name().to_string(), table);
    }

    pub fn table(&self, name: &str) -> Option<&RecordTable> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Validate a specific table by name.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidationReport)` - Validation completed, may contain issues
    /// * `Err(RuleError::TableNotFound)` - No table with this name exists
    pub fn validate_table(&mut self, name: &str) -> Result<ValidationReport, RuleError> {
        match self.tables.get_mut(name) {
            Some(table) => table.validate(),
            None => Err(RuleError::TableNotFound(name.to_string())),
        }
    }

    /// Validate all tables, stopping at the first error.
    pub fn validate_all(&mut self) -> Result<Vec<ValidationReport>, RuleError> {
        let mut reports = Vec::with_capacity(self.tables.len());
        for table in self.tables.values_mut() {
            reports.push(table.validate()?);
        }
        let failed = reports.iter().filter(|r| !r.is_passed()).count();
        info!(tables = reports.len(), failed, "validated all tables");
        Ok(reports)
    }
}
