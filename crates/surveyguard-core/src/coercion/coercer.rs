use crate::{
    coercion::{CoercedValue, NullCanonicalizer},
    utils::date_parser::parse_datetime,
    RawValue, TypeSpec,
};

const TRUTHY: [&str; 4] = ["yes", "true", "1", "y"];
const FALSY: [&str; 4] = ["no", "false", "0", "n"];

/// Converts raw cells into [`CoercedValue`]s.
///
/// Null detection runs first and wins over every type.
#[derive(Debug, Clone, Default)]
pub struct TypeCoercer {
    nulls: NullCanonicalizer,
}

impl TypeCoercer {
    pub fn new(nulls: NullCanonicalizer) -> Self {
        Self { nulls }
    }

    pub fn null_canonicalizer(&self) -> &NullCanonicalizer {
        &self.nulls
    }

    /// Coerce a cell. `None` means the column is absent from the record.
    pub fn coerce(&self, raw: Option<&RawValue>, spec: &TypeSpec) -> CoercedValue {
        match raw {
            Some(RawValue::Text(text)) => self.coerce_str(text, spec),
            None | Some(RawValue::Null) => CoercedValue::Null,
        }
    }

    pub fn coerce_str(&self, raw: &str, spec: &TypeSpec) -> CoercedValue {
        if self.nulls.is_null_token(raw) {
            return CoercedValue::Null;
        }
        let trimmed = raw.trim();
        let coerced = match spec {
            TypeSpec::Integer => parse_integer(trimmed).map(CoercedValue::Integer),
            TypeSpec::Float => parse_float(trimmed).map(CoercedValue::Float),
            TypeSpec::Boolean => parse_bool(trimmed).map(CoercedValue::Boolean),
            TypeSpec::Text => Some(CoercedValue::Text(trimmed.to_string())),
            TypeSpec::DateTime { format } => parse_datetime(raw, format).map(CoercedValue::DateTime),
        };
        coerced.unwrap_or_else(|| CoercedValue::Uncastable(raw.to_string()))
    }

    /// Coerce a value that may already be typed.
    ///
    /// A value whose variant matches `spec` comes back unchanged, text is
    /// trimmed like cell text, and any other value is coerced again from its
    /// text form.
    pub fn coerce_typed(&self, value: &CoercedValue, spec: &TypeSpec) -> CoercedValue {
        match (value, spec) {
            (CoercedValue::Null, _) => CoercedValue::Null,
            (CoercedValue::Text(text), TypeSpec::Text) => CoercedValue::Text(text.trim().to_string()),
            (CoercedValue::Integer(_), TypeSpec::Integer)
            | (CoercedValue::Float(_), TypeSpec::Float)
            | (CoercedValue::Boolean(_), TypeSpec::Boolean)
            | (CoercedValue::DateTime(_), TypeSpec::DateTime { .. }) => value.clone(),
            _ => self.coerce_str(&value.to_string(), spec),
        }
    }
}

/// Plain integers, or decimals with no fractional part (`"19.0"`).
fn parse_integer(input: &str) -> Option<i64> {
    if let Ok(i) = input.parse::<i64>() {
        return Some(i);
    }
    let f = parse_float(input)?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_float(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(input: &str) -> Option<bool> {
    let lowered = input.to_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}
