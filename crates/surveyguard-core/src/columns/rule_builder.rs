use regex::Regex;

use crate::{
    coercion::CoercedValue,
    columns::{Rule, RuleSet, TypeSpec},
    RuleError,
};

/// Fluent builder for one column's [`Rule`].
///
/// ```
/// use surveyguard_core::{RuleBuilder, RuleSet, TypeSpec};
///
/// let mut age = RuleBuilder::new("age");
/// age.with_type(TypeSpec::Integer).between(Some(0.0), Some(120.0)).is_required();
///
/// let mut rules = RuleSet::new();
/// rules.add(age);
/// assert_eq!(rules.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    name: String,
    rule: Rule,
}

impl RuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: Rule::default(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Value must be present in the record and not null
    pub fn is_required(&mut self) -> &mut Self {
        self.rule.required = true;
        self
    }

    /// Value must not be null when the column is present
    pub fn is_not_null(&mut self) -> &mut Self {
        self.rule.not_null = true;
        self
    }

    /// Add uniqueness constraint
    pub fn is_unique(&mut self) -> &mut Self {
        self.rule.unique = true;
        self
    }

    pub fn with_type(&mut self, spec: TypeSpec) -> &mut Self {
        self.rule.type_spec = Some(spec);
        self
    }

    /// Set the type from a configuration label (`int`, `datetime:%Y-%m-%d`, ...)
    pub fn with_type_label(&mut self, label: &str) -> Result<&mut Self, RuleError> {
        let spec = TypeSpec::from_label(label).ok_or_else(|| RuleError::UnknownType {
            column: self.name.clone(),
            label: label.to_string(),
        })?;
        Ok(self.with_type(spec))
    }

    /// Set numeric range (both min and max)
    pub fn between(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        self.rule.min = min;
        self.rule.max = max;
        self
    }

    pub fn min(&mut self, min: f64) -> &mut Self {
        self.rule.min = Some(min);
        self
    }

    pub fn max(&mut self, max: f64) -> &mut Self {
        self.rule.max = Some(max);
        self
    }

    /// Set length constraints (both min and max)
    pub fn with_length_between(&mut self, min: Option<usize>, max: Option<usize>) -> &mut Self {
        self.rule.len_min = min;
        self.rule.len_max = max;
        self
    }

    pub fn with_min_length(&mut self, min: usize) -> &mut Self {
        self.rule.len_min = Some(min);
        self
    }

    pub fn with_max_length(&mut self, max: usize) -> &mut Self {
        self.rule.len_max = Some(max);
        self
    }

    /// Check if value is in a set of allowed values
    pub fn is_in<I, V>(&mut self, members: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CoercedValue>,
    {
        self.rule.allowed = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Match against a regex pattern
    pub fn with_regex(&mut self, pattern: impl Into<String>) -> Result<&mut Self, RuleError> {
        let pattern = pattern.into();
        // Validate regex at build time
        Regex::new(&pattern).map_err(|source| RuleError::InvalidRegex {
            column: self.name.clone(),
            pattern: pattern.clone(),
            source,
        })?;
        self.rule.regex = Some(pattern);
        Ok(self)
    }

    pub fn build(self) -> (String, Rule) {
        (self.name, self.rule)
    }
}

impl RuleSet {
    pub fn add(&mut self, builder: RuleBuilder) -> &mut Self {
        let (name, rule) = builder.build();
        self.insert(name, rule)
    }
}
