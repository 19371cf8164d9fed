//! Rule compilation module.
//!
//! Converts a declarative [`RuleSet`] into [`ExecutableColumn`]s with trait
//! objects for runtime validation. Every configuration error surfaces here,
//! before any record is read.

use regex::Regex;
use tracing::warn;

#[cfg(test)]
mod tests;

use crate::{
    coercion::TypeCoercer,
    columns::{Rule, RuleSet},
    rules::{
        numeric::numeric_bound, CellRule, IsInCheck, LengthCheck, NotNullCheck, RangeCheck,
        RegexMatch, RequiredCheck, TypeCheck, UnicityCheck,
    },
    validator::ExecutableColumn,
    RuleError, TypeSpec,
};

/// Compile every column of `rules`, keeping the rule set order.
pub fn compile_rules(
    rules: &RuleSet,
    coercer: &TypeCoercer,
) -> Result<Box<[ExecutableColumn]>, RuleError> {
    Ok(rules
        .iter()
        .map(|(name, rule)| compile_column(name, rule, coercer))
        .collect::<Result<Vec<_>, _>>()?
        .into_boxed_slice())
}

/// Compile a single column rule.
///
/// Fails on an invalid regex. Rules that can never fire are accepted with a
/// warning.
pub fn compile_column(
    name: &str,
    rule: &Rule,
    coercer: &TypeCoercer,
) -> Result<ExecutableColumn, RuleError> {
    let type_spec = rule.type_spec.clone().unwrap_or(TypeSpec::Text);

    let value_rules = compile_value_rules(name, rule);
    let raw_rules = compile_raw_rules(name, rule, &type_spec, coercer)?;

    Ok(ExecutableColumn {
        name: name.to_string(),
        required: rule.required.then(RequiredCheck::new),
        not_null: rule.not_null.then(NotNullCheck::new),
        type_check: rule.type_spec.clone().map(TypeCheck::new),
        value_rules,
        raw_rules,
        unicity_check: rule.unique.then(UnicityCheck::new),
        type_spec,
    })
}

/// Range and length rules, which need a castable value.
fn compile_value_rules(name: &str, rule: &Rule) -> Vec<Box<dyn CellRule>> {
    let mut executable_rules: Vec<Box<dyn CellRule>> = Vec::new();

    let numeric = rule.type_spec.as_ref().is_some_and(TypeSpec::is_numeric);
    if (rule.min.is_some() || rule.max.is_some()) && !numeric {
        warn!(
            column = name,
            "min/max set on a column without a numeric type, they will never fire"
        );
    }
    let min = rule.min.and_then(numeric_bound);
    let max = rule.max.and_then(numeric_bound);
    if rule.min.is_some() != min.is_some() || rule.max.is_some() != max.is_some() {
        warn!(column = name, "NaN numeric bound ignored");
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            warn!(column = name, min, max, "min is greater than max, every value will fail");
        }
    }
    if let Some(min) = min {
        executable_rules.push(Box::new(RangeCheck::min(min)));
    }
    if let Some(max) = max {
        executable_rules.push(Box::new(RangeCheck::max(max)));
    }

    if let (Some(len_min), Some(len_max)) = (rule.len_min, rule.len_max) {
        if len_min > len_max {
            warn!(
                column = name,
                len_min, len_max, "len_min is greater than len_max, every value will fail"
            );
        }
    }
    if let Some(len_min) = rule.len_min {
        executable_rules.push(Box::new(LengthCheck::min(len_min)));
    }
    if let Some(len_max) = rule.len_max {
        executable_rules.push(Box::new(LengthCheck::max(len_max)));
    }

    executable_rules
}

/// Membership and regex rules, which also apply to uncastable text.
fn compile_raw_rules(
    name: &str,
    rule: &Rule,
    type_spec: &TypeSpec,
    coercer: &TypeCoercer,
) -> Result<Vec<Box<dyn CellRule>>, RuleError> {
    let mut executable_rules: Vec<Box<dyn CellRule>> = Vec::new();

    if let Some(allowed) = &rule.allowed {
        let members: Vec<_> = allowed
            .iter()
            .map(|member| coercer.coerce_typed(member, type_spec))
            .collect();
        if members.iter().any(|m| !m.is_typed()) {
            warn!(
                column = name,
                column_type = %type_spec,
                "allowed members that do not cast to the column type only match raw text"
            );
        }
        executable_rules.push(Box::new(IsInCheck::new(members)));
    }

    if let Some(pattern) = &rule.regex {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidRegex {
            column: name.to_string(),
            pattern: pattern.clone(),
            source,
        })?;
        executable_rules.push(Box::new(RegexMatch::new(regex)));
    }

    Ok(executable_rules)
}
