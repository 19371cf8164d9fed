use std::fmt;

use crate::{
    coercion::{CoercedValue, TypeCoercer},
    results::{Issue, RuleKind},
    rules::{Cell, CellRule, NotNullCheck, RequiredCheck, TypeCheck, UnicityCheck},
    RawValue, TypeSpec,
};

/// Compiled, executable rules of one column.
///
/// Checks run in a fixed order: `required`, `not_null`, `type`, the
/// value-dependent rules (`min`, `max`, `len_min`, `len_max`), then the rules
/// that also apply to uncastable raw text (`allowed`, `regex`). Uniqueness
/// is tracked across rows by the engine.
pub struct ExecutableColumn {
    /// Column name (must match the record keys)
    pub(crate) name: String,
    /// Type cells are coerced to; `str` when the rule declares none
    pub(crate) type_spec: TypeSpec,
    pub(crate) required: Option<RequiredCheck>,
    pub(crate) not_null: Option<NotNullCheck>,
    pub(crate) type_check: Option<TypeCheck>,
    /// Skipped when the value is uncastable
    pub(crate) value_rules: Vec<Box<dyn CellRule>>,
    /// Applied to typed values and to uncastable raw text
    pub(crate) raw_rules: Vec<Box<dyn CellRule>>,
    pub(crate) unicity_check: Option<UnicityCheck>,
}

impl fmt::Debug for ExecutableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableColumn")
            .field("name", &self.name)
            .field("type_spec", &self.type_spec)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl ExecutableColumn {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    pub fn has_unicity(&self) -> bool {
        self.unicity_check.is_some()
    }

    pub(crate) fn unicity_check(&self) -> Option<&UnicityCheck> {
        self.unicity_check.as_ref()
    }

    /// Names of the configured checks, in evaluation order.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(check) = &self.required {
            names.push(check.name().to_string());
        }
        if let Some(check) = &self.not_null {
            names.push(check.name().to_string());
        }
        if let Some(check) = &self.type_check {
            names.push(check.name().to_string());
        }
        names.extend(self.value_rules.iter().map(|r| r.name().to_string()));
        names.extend(self.raw_rules.iter().map(|r| r.name().to_string()));
        if let Some(check) = &self.unicity_check {
            names.push(check.name().to_string());
        }
        names
    }

    pub fn coerce(&self, coercer: &TypeCoercer, raw: Option<&RawValue>) -> CoercedValue {
        coercer.coerce(raw, &self.type_spec)
    }

    /// Run every per-cell check on one cell, appending issues in order.
    pub(crate) fn evaluate(
        &self,
        row_index: usize,
        raw: Option<&RawValue>,
        value: &CoercedValue,
        issues: &mut Vec<Issue>,
    ) {
        let cell = Cell::new(raw, value);

        if value.is_null() {
            let violation = match (&self.required, &self.not_null) {
                (Some(required), _) => required
                    .validate(&cell)
                    .map(|v| (RuleKind::Required, v)),
                (None, Some(not_null)) => not_null
                    .validate(&cell)
                    .map(|v| (RuleKind::NotNull, v)),
                (None, None) => None,
            };
            if let Some((kind, violation)) = violation {
                issues.push(Issue::new(
                    row_index,
                    &self.name,
                    kind,
                    violation.value,
                    violation.message,
                ));
            }
            return;
        }

        if let Some(type_check) = &self.type_check {
            self.push(row_index, type_check, &cell, issues);
        }
        if !value.is_uncastable() {
            for rule in &self.value_rules {
                self.push(row_index, rule.as_ref(), &cell, issues);
            }
        }
        for rule in &self.raw_rules {
            self.push(row_index, rule.as_ref(), &cell, issues);
        }
    }

    fn push(&self, row_index: usize, rule: &dyn CellRule, cell: &Cell<'_>, issues: &mut Vec<Issue>) {
        if let Some(violation) = rule.validate(cell) {
            issues.push(Issue::new(
                row_index,
                &self.name,
                rule.kind(),
                violation.value,
                violation.message,
            ));
        }
    }
}
