use std::collections::HashSet;

use regex::Regex;

use crate::{
    coercion::CoercedValue,
    results::RuleKind,
    rules::{Cell, CellRule, Violation},
    utils::hasher::Xxh3Builder,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum LengthBound {
    Min(usize),
    Max(usize),
}

/// Character length of the text value, or of the trimmed raw string for
/// other types.
#[derive(Debug, Clone)]
pub struct LengthCheck {
    bound: LengthBound,
}

impl LengthCheck {
    pub fn min(min: usize) -> Self {
        Self {
            bound: LengthBound::Min(min),
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            bound: LengthBound::Max(max),
        }
    }

    fn length(cell: &Cell<'_>) -> usize {
        match cell.value.as_text() {
            Some(text) => text.chars().count(),
            None => match cell.raw_text() {
                Some(raw) => raw.trim().chars().count(),
                None => cell.value.to_string().chars().count(),
            },
        }
    }
}

impl CellRule for LengthCheck {
    fn name(&self) -> &'static str {
        "StringLengthCheck"
    }

    fn kind(&self) -> RuleKind {
        match self.bound {
            LengthBound::Min(_) => RuleKind::LenMin,
            LengthBound::Max(_) => RuleKind::LenMax,
        }
    }

    fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        let length = Self::length(cell);
        let message = match self.bound {
            LengthBound::Min(min) if length < min => {
                format!("Length {} < len_min {}.", length, min)
            }
            LengthBound::Max(max) if length > max => {
                format!("Length {} > len_max {}.", length, max)
            }
            _ => return None,
        };
        Some(Violation::new(cell.value.clone(), message))
    }
}

/// Membership in a fixed set of values.
///
/// Typed values are compared with the members coerced to the column type.
/// Uncastable values fall back to comparing their trimmed raw text with the
/// members' text form.
pub struct IsInCheck {
    members: Vec<CoercedValue>,
    member_texts: HashSet<String, Xxh3Builder>,
    display: String,
}

impl IsInCheck {
    pub fn new(members: Vec<CoercedValue>) -> Self {
        let mut member_texts = HashSet::with_hasher(Xxh3Builder);
        members.iter().for_each(|m| {
            let _ = member_texts.insert(m.to_string());
        });
        let display = members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            members,
            member_texts,
            display,
        }
    }

    pub fn members(&self) -> &[CoercedValue] {
        &self.members
    }

    fn contains(&self, value: &CoercedValue) -> bool {
        match value {
            CoercedValue::Uncastable(raw) => self.member_texts.contains(raw.trim()),
            typed => self.members.contains(typed),
        }
    }
}

impl CellRule for IsInCheck {
    fn name(&self) -> &'static str {
        "IsInCheck"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Allowed
    }

    fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        if self.contains(cell.value) {
            return None;
        }
        Some(Violation::new(
            cell.value.clone(),
            format!("Value {} not in allowed set [{}].", cell.value, self.display),
        ))
    }
}

/// Unanchored search of the pattern in the raw string.
pub struct RegexMatch {
    regex: Regex,
}

impl RegexMatch {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl CellRule for RegexMatch {
    fn name(&self) -> &'static str {
        "RegexMatch"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Regex
    }

    fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        let raw = match cell.raw_text() {
            Some(raw) => raw.to_string(),
            None => cell.value.to_string(),
        };
        if self.regex.is_match(&raw) {
            return None;
        }
        Some(Violation::new(
            cell.value.clone(),
            format!("Value '{}' does not match pattern '{}'.", raw, self.pattern()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawValue;

    fn validate(rule: &dyn CellRule, raw: &str, value: CoercedValue) -> Option<Violation> {
        let raw = RawValue::from(raw);
        rule.validate(&Cell::new(Some(&raw), &value))
    }

    #[test]
    fn test_length_on_text_value() {
        let rule = LengthCheck::min(1);
        assert!(validate(&rule, " A1 ", CoercedValue::Text("A1".into())).is_none());

        let rule = LengthCheck::max(3);
        let violation = validate(&rule, "abcd", CoercedValue::Text("abcd".into())).unwrap();
        assert_eq!(violation.message, "Length 4 > len_max 3.");
        assert_eq!(rule.kind(), RuleKind::LenMax);
    }

    #[test]
    fn test_length_counts_characters() {
        let rule = LengthCheck::max(4);
        assert!(validate(&rule, "été!", CoercedValue::Text("été!".into())).is_none());
    }

    #[test]
    fn test_length_on_typed_value_uses_trimmed_raw() {
        let rule = LengthCheck::min(3);
        let violation = validate(&rule, " 19 ", CoercedValue::Integer(19)).unwrap();
        assert_eq!(violation.message, "Length 2 < len_min 3.");
        assert_eq!(violation.value, CoercedValue::Integer(19));
    }

    #[test]
    fn test_is_in_typed() {
        let rule = IsInCheck::new(vec![CoercedValue::Integer(1), CoercedValue::Integer(2)]);
        assert!(validate(&rule, "1", CoercedValue::Integer(1)).is_none());

        let violation = validate(&rule, "3", CoercedValue::Integer(3)).unwrap();
        assert_eq!(violation.message, "Value 3 not in allowed set [1, 2].");
        assert_eq!(rule.kind(), RuleKind::Allowed);
    }

    #[test]
    fn test_is_in_uncastable_compares_raw_text() {
        let rule = IsInCheck::new(vec![
            CoercedValue::Uncastable("unknown".into()),
            CoercedValue::Integer(1),
        ]);
        assert!(validate(&rule, " unknown", CoercedValue::Uncastable(" unknown".into())).is_none());
        assert!(validate(&rule, "other", CoercedValue::Uncastable("other".into())).is_some());
    }

    #[test]
    fn test_is_in_text() {
        let rule = IsInCheck::new(vec!["active".into(), "inactive".into()]);
        assert!(validate(&rule, "active", CoercedValue::Text("active".into())).is_none());
        assert!(validate(&rule, "Active", CoercedValue::Text("Active".into())).is_some());
    }

    #[test]
    fn test_regex_unanchored_search() {
        let rule = RegexMatch::new(Regex::new(r"\d+").unwrap());
        assert!(validate(&rule, "abc123", CoercedValue::Text("abc123".into())).is_none());

        let violation = validate(&rule, "abc", CoercedValue::Text("abc".into())).unwrap();
        assert_eq!(violation.message, r"Value 'abc' does not match pattern '\d+'.");
    }

    #[test]
    fn test_regex_uses_untrimmed_raw() {
        let rule = RegexMatch::new(Regex::new(r"^[A-Z]\d$").unwrap());
        assert!(validate(&rule, "A1", CoercedValue::Text("A1".into())).is_none());
        assert!(validate(&rule, " A1", CoercedValue::Text("A1".into())).is_some());
    }

    #[test]
    fn test_regex_on_uncastable_value() {
        let rule = RegexMatch::new(Regex::new(r"^\d{4}-").unwrap());
        let value = CoercedValue::Uncastable("2024-13-01".into());
        assert!(validate(&rule, "2024-13-01", value).is_none());
    }
}
