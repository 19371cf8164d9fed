use chrono::NaiveDateTime;

use crate::{
    coercion::CoercedValue,
    results::RuleKind,
    rules::{Cell, CellRule, Violation},
    TypeSpec,
};

/// Flags null cells, whether the column is absent or blank.
#[derive(Debug, Clone, Default)]
pub struct RequiredCheck {}

impl RequiredCheck {
    pub fn new() -> Self {
        Self {}
    }

    pub fn name(&self) -> &'static str {
        "RequiredCheck"
    }

    pub fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        cell.value.is_null().then(|| {
            Violation::new(cell.raw_value(), "Required value is missing.".to_string())
        })
    }
}

/// Flags null cells of a column that is present in the record.
#[derive(Debug, Clone, Default)]
pub struct NotNullCheck {}

impl NotNullCheck {
    pub fn new() -> Self {
        Self {}
    }

    pub fn name(&self) -> &'static str {
        "NotNullCheck"
    }

    pub fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        (cell.is_present() && cell.value.is_null())
            .then(|| Violation::new(cell.raw_value(), "Value must not be null.".to_string()))
    }
}

/// Flags values the coercer could not convert to the column type.
#[derive(Debug, Clone)]
pub struct TypeCheck {
    expected: TypeSpec,
}

impl TypeCheck {
    pub fn new(expected: TypeSpec) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &TypeSpec {
        &self.expected
    }
}

impl CellRule for TypeCheck {
    fn name(&self) -> &'static str {
        "TypeCheck"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Type
    }

    fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        match cell.value {
            CoercedValue::Uncastable(raw) => Some(Violation::new(
                cell.value.clone(),
                format!("Value '{}' is not of type {}.", raw, self.expected),
            )),
            _ => None,
        }
    }
}

/// Hashable identity of a coerced value in a `unique` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UniqueKey {
    Integer(i64),
    /// Bit pattern, `-0.0` folded into `0.0`
    Float(u64),
    Boolean(bool),
    Text(String),
    DateTime(NaiveDateTime),
    /// Raw text of an uncastable value
    Raw(String),
}

#[derive(Debug, Clone, Default)]
pub struct UnicityCheck {}

impl UnicityCheck {
    pub fn new() -> Self {
        Self {}
    }

    pub fn name(&self) -> &'static str {
        "UnicityCheck"
    }

    /// Key under which `value` is tracked. Nulls are never tracked.
    pub fn key(&self, value: &CoercedValue) -> Option<UniqueKey> {
        match value {
            CoercedValue::Null => None,
            CoercedValue::Integer(i) => Some(UniqueKey::Integer(*i)),
            CoercedValue::Float(f) => {
                let f = if *f == 0.0 { 0.0 } else { *f };
                Some(UniqueKey::Float(f.to_bits()))
            }
            CoercedValue::Boolean(b) => Some(UniqueKey::Boolean(*b)),
            CoercedValue::Text(s) => Some(UniqueKey::Text(s.clone())),
            CoercedValue::DateTime(dt) => Some(UniqueKey::DateTime(*dt)),
            CoercedValue::Uncastable(raw) => Some(UniqueKey::Raw(raw.clone())),
        }
    }

    pub fn violation(&self, value: &CoercedValue, first_row: usize) -> Violation {
        Violation::new(
            value.clone(),
            format!("Duplicate value {} (first seen at row {}).", value, first_row),
        )
    }
}
