use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::{coercion::CoercedValue, RuleError};

/// The constraint an [`Issue`] reports on. Declaration order is the fixed
/// per-cell evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    NotNull,
    Type,
    Min,
    Max,
    LenMin,
    LenMax,
    Allowed,
    Regex,
    Unique,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::NotNull => "not_null",
            RuleKind::Type => "type",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::LenMin => "len_min",
            RuleKind::LenMax => "len_max",
            RuleKind::Allowed => "allowed",
            RuleKind::Regex => "regex",
            RuleKind::Unique => "unique",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rule violation for one cell, or one cross-row duplicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    row_index: usize,
    column: String,
    rule: RuleKind,
    value: CoercedValue,
    message: String,
}

impl Issue {
    pub(crate) fn new(
        row_index: usize,
        column: &str,
        rule: RuleKind,
        value: CoercedValue,
        message: String,
    ) -> Self {
        Self {
            row_index,
            column: column.to_string(),
            rule,
            value,
            message,
        }
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    pub fn value(&self) -> &CoercedValue {
        &self.value
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} | {} | {} | {}",
            self.row_index, self.column, self.rule, self.message
        )
    }
}

/// Outcome of validating one table.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub table_name: String,
    pub total_rows: usize,
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(table_name: String, total_rows: usize, issues: Vec<Issue>) -> Self {
        Self {
            table_name,
            total_rows,
            issues,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every issue, in row, column, rule order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn issues_for_row(&self, row_index: usize) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.row_index == row_index)
    }

    pub fn issues_for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.issues.iter().filter(move |i| i.column == column)
    }

    /// Issue counts per (column, rule), sorted by column then rule.
    pub fn summary(&self) -> Vec<RuleResult> {
        let mut counts: BTreeMap<(&str, RuleKind), usize> = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry((issue.column.as_str(), issue.rule)).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((column, rule), error_count)| {
                let error_percentage = if self.total_rows > 0 {
                    (error_count as f64 / self.total_rows as f64) * 100.
                } else {
                    0.0
                };
                RuleResult::new(column.to_string(), rule, error_count, error_percentage)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, RuleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub column: String,
    pub rule: RuleKind,
    pub error_count: usize,
    pub error_percentage: f64,
}

impl RuleResult {
    pub fn new(column: String, rule: RuleKind, error_count: usize, error_percentage: f64) -> Self {
        Self {
            column,
            rule,
            error_count,
            error_percentage,
        }
    }
}
