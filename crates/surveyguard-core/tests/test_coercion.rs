use chrono::NaiveDate;
use surveyguard_core::{CoercedValue, NullCanonicalizer, RawValue, TypeCoercer, TypeSpec};

fn datetime(format: &str) -> TypeSpec {
    TypeSpec::DateTime {
        format: format.to_string(),
    }
}

fn all_specs() -> Vec<TypeSpec> {
    vec![
        TypeSpec::Integer,
        TypeSpec::Float,
        TypeSpec::Boolean,
        TypeSpec::Text,
        datetime("%Y-%m-%d"),
    ]
}

#[test]
fn test_null_tokens_win_over_every_type() {
    let coercer = TypeCoercer::default();
    for spec in all_specs() {
        for token in ["", "   ", "na", "NA", "N/A", "n/a", "null", "Null", " NULL "] {
            assert_eq!(
                coercer.coerce(Some(&RawValue::from(token)), &spec),
                CoercedValue::Null,
                "{token:?} as {spec}"
            );
        }
        assert_eq!(coercer.coerce(None, &spec), CoercedValue::Null);
        assert_eq!(coercer.coerce(Some(&RawValue::Null), &spec), CoercedValue::Null);
    }
}

#[test]
fn test_custom_null_tokens() {
    let coercer = TypeCoercer::new(NullCanonicalizer::with_tokens(["-", "Missing"]));
    assert_eq!(coercer.coerce_str("-", &TypeSpec::Integer), CoercedValue::Null);
    assert_eq!(coercer.coerce_str("MISSING", &TypeSpec::Text), CoercedValue::Null);
    assert_eq!(coercer.coerce_str("n/a", &TypeSpec::Text), CoercedValue::Null);
    assert_eq!(
        TypeCoercer::default().coerce_str("-", &TypeSpec::Text),
        CoercedValue::Text("-".to_string())
    );
}

#[test]
fn test_booleans() {
    let coercer = TypeCoercer::default();
    for raw in ["yes", "Yes", "TRUE", "1", "y", "Y"] {
        assert_eq!(
            coercer.coerce_str(raw, &TypeSpec::Boolean),
            CoercedValue::Boolean(true),
            "{raw:?}"
        );
    }
    for raw in ["no", "No", "false", "0", "n", " N "] {
        assert_eq!(
            coercer.coerce_str(raw, &TypeSpec::Boolean),
            CoercedValue::Boolean(false),
            "{raw:?}"
        );
    }
    assert_eq!(
        coercer.coerce_str("maybe", &TypeSpec::Boolean),
        CoercedValue::Uncastable("maybe".to_string())
    );
}

#[test]
fn test_floats_reject_non_finite() {
    let coercer = TypeCoercer::default();
    assert_eq!(coercer.coerce_str("3.5", &TypeSpec::Float), CoercedValue::Float(3.5));
    assert_eq!(coercer.coerce_str("-2", &TypeSpec::Float), CoercedValue::Float(-2.0));
    for raw in ["nan", "inf", "-inf", "1e999"] {
        assert!(coercer.coerce_str(raw, &TypeSpec::Float).is_uncastable(), "{raw:?}");
    }
}

#[test]
fn test_text_is_trimmed() {
    let coercer = TypeCoercer::default();
    assert_eq!(
        coercer.coerce_str("  hello world ", &TypeSpec::Text),
        CoercedValue::Text("hello world".to_string())
    );
}

#[test]
fn test_datetimes() {
    let coercer = TypeCoercer::default();
    let expected = NaiveDate::from_ymd_opt(2024, 10, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        coercer.coerce_str("2024-10-01", &datetime("%Y-%m-%d")),
        CoercedValue::DateTime(expected)
    );
    assert_eq!(
        coercer.coerce_str("01/10/2024 00:00", &datetime("%d/%m/%Y %H:%M")),
        CoercedValue::DateTime(expected)
    );
    assert_eq!(
        coercer.coerce_str("2024-13-01", &datetime("%Y-%m-%d")),
        CoercedValue::Uncastable("2024-13-01".to_string())
    );
    assert_eq!(
        coercer.coerce_str("2024-02-30", &datetime("%Y-%m-%d")),
        CoercedValue::Uncastable("2024-02-30".to_string())
    );
}

#[test]
fn test_time_only_format() {
    let coercer = TypeCoercer::default();
    let expected = NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap()
        .and_hms_opt(13, 45, 0)
        .unwrap();
    assert_eq!(
        coercer.coerce_str("13:45", &datetime("%H:%M")),
        CoercedValue::DateTime(expected)
    );
}

#[test]
fn test_partial_datetime_formats() {
    let coercer = TypeCoercer::default();
    let at = |y: i32, m: u32, d: u32, h: u32| {
        CoercedValue::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    };
    assert_eq!(coercer.coerce_str("2024-10", &datetime("%Y-%m")), at(2024, 10, 1, 0));
    assert_eq!(coercer.coerce_str("2024", &datetime("%Y")), at(2024, 1, 1, 0));
    assert_eq!(coercer.coerce_str("10/2024", &datetime("%m/%Y")), at(2024, 10, 1, 0));
    assert_eq!(coercer.coerce_str("14", &datetime("%H")), at(1900, 1, 1, 14));
    assert!(coercer.coerce_str("2024-13", &datetime("%Y-%m")).is_uncastable());
}

#[test]
fn test_datetime_whitespace_is_not_trimmed() {
    let coercer = TypeCoercer::default();
    assert_eq!(
        coercer.coerce_str(" 2024-10-01", &datetime("%Y-%m-%d")),
        CoercedValue::Uncastable(" 2024-10-01".to_string())
    );
}

#[test]
fn test_coercion_is_idempotent() {
    let coercer = TypeCoercer::default();
    let samples = ["19", "3.5", "yes", "  text ", "2024-10-01", "x"];
    for spec in all_specs() {
        for raw in samples {
            let once = coercer.coerce_str(raw, &spec);
            if once.is_typed() {
                assert_eq!(coercer.coerce_typed(&once, &spec), once, "{raw:?} as {spec}");
            }
        }
    }
}

#[test]
fn test_coerce_typed_across_types() {
    let coercer = TypeCoercer::default();
    assert_eq!(
        coercer.coerce_typed(&CoercedValue::Integer(1), &TypeSpec::Boolean),
        CoercedValue::Boolean(true)
    );
    assert_eq!(
        coercer.coerce_typed(&CoercedValue::Integer(7), &TypeSpec::Float),
        CoercedValue::Float(7.0)
    );
    assert_eq!(
        coercer.coerce_typed(&CoercedValue::Boolean(false), &TypeSpec::Text),
        CoercedValue::Text("false".to_string())
    );
    assert_eq!(
        coercer.coerce_typed(&CoercedValue::Null, &TypeSpec::Integer),
        CoercedValue::Null
    );
}
