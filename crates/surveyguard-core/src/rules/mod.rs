pub mod generic;
pub mod numeric;
pub mod string;

pub use generic::{NotNullCheck, RequiredCheck, TypeCheck, UnicityCheck, UniqueKey};
pub use numeric::RangeCheck;
pub use string::{IsInCheck, LengthCheck, RegexMatch};

use crate::{coercion::CoercedValue, results::RuleKind, RawValue};

/// One cell as seen by a rule: the raw input next to its coerced value.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    /// `None` when the column is absent from the record
    pub raw: Option<&'a RawValue>,
    pub value: &'a CoercedValue,
}

impl<'a> Cell<'a> {
    pub fn new(raw: Option<&'a RawValue>, value: &'a CoercedValue) -> Self {
        Self { raw, value }
    }

    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }

    pub fn raw_text(&self) -> Option<&'a str> {
        self.raw.and_then(RawValue::as_str)
    }

    /// The raw text as an issue value, `Null` when there is none.
    pub(crate) fn raw_value(&self) -> CoercedValue {
        self.raw_text()
            .map(|text| CoercedValue::Text(text.to_string()))
            .unwrap_or(CoercedValue::Null)
    }
}

/// A failed check, before it is attached to a row and a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub value: CoercedValue,
    pub message: String,
}

impl Violation {
    pub fn new(value: CoercedValue, message: String) -> Self {
        Self { value, message }
    }
}

/// A check applied to one non-null cell.
pub trait CellRule: Send + Sync {
    /// Returns the name of the rule.
    fn name(&self) -> &'static str;
    fn kind(&self) -> RuleKind;
    /// Returns a violation when the cell breaks the rule.
    fn validate(&self, cell: &Cell<'_>) -> Option<Violation>;
}
