use indexmap::IndexMap;

use crate::{RuleError, RuleSet, ValidationReport};

pub mod record_table;

pub trait Table {
    fn validate(&mut self) -> Result<ValidationReport, RuleError>;
    fn prepare(&mut self, rules: &RuleSet) -> Result<(), RuleError>;
    fn get_rules(&self) -> IndexMap<String, Vec<String>>;
}
